use std::f32::consts::TAU;

use nalgebra::Point3;

/// Evaluates `f` at `num_segments + 1` evenly spaced parameters from `t_start`
/// to `t_end`, both ends included.
pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Closed circle of the given radius in the XZ plane, centered on the origin.
/// The last point repeats the first.
pub fn circle_xz(radius: f32, num_segments: usize) -> Vec<Point3<f32>> {
    let f = |theta: f32| Point3::new(theta.cos() * radius, 0.0, theta.sin() * radius);
    path_iter_parametric(f, 0.0, TAU, num_segments).collect()
}
