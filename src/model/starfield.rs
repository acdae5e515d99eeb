use std::f32::consts::TAU;

use nalgebra::{Point3, Unit, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_STAR_COUNT: usize = 1500;
/// How far from the eye stars get drawn. Must stay inside the far clip plane.
pub const SKY_RADIUS: f32 = 400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub direction: Unit<Vector3<f32>>,
    pub color: Point3<f32>,
}

/// Background stars, uniformly spread over the sky sphere. Always drawn, so the
/// sky is never blank even without skybox textures.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let theta = rng.random::<f32>() * TAU;
                let phi = (1.0 - 2.0 * rng.random::<f32>()).acos();
                let direction = Unit::new_normalize(Vector3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                ));

                // Power law: lots of dim stars, a handful of bright ones
                let brightness = 0.25 + 0.75 * rng.random::<f32>().powf(4.0);
                // Slight warm/cool tint
                let tint = rng.random::<f32>() * 0.2 - 0.1;
                let color = Point3::new(
                    (brightness * (1.0 + tint)).min(1.0),
                    brightness,
                    (brightness * (1.0 - tint)).min(1.0),
                );

                Star { direction, color }
            })
            .collect();

        Starfield { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Star positions on a sphere around `eye`, so the sky never gets closer.
    pub fn positions_around(&self, eye: Point3<f32>) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.stars
            .iter()
            .map(move |star| (eye + star.direction.into_inner() * SKY_RADIUS, star.color))
    }
}
