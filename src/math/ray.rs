use nalgebra::{Isometry3, Point3, Unit, Vector3};

// Rays nearly parallel to an annulus plane are treated as misses
const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub dir: Unit<Vector3<f32>>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, dir: Vector3<f32>) -> Self {
        Ray {
            origin,
            dir: Unit::new_normalize(dir),
        }
    }

    /// Builds the ray starting at `origin` and passing through `through`.
    pub fn through(origin: Point3<f32>, through: Point3<f32>) -> Self {
        Self::new(origin, through - origin)
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.dir.into_inner() * t
    }

    /// Distance along the ray to the nearest forward intersection with the
    /// sphere. If the origin is inside the sphere, this is the exit point.
    ///
    /// The sign of the radius is ignored.
    pub fn intersect_sphere(&self, center: &Point3<f32>, radius: f32) -> Option<f32> {
        // Solve |o + t d - c|^2 = r^2 with |d| = 1
        let oc = self.origin - center;
        let b = oc.dot(self.dir.as_ref());
        let c = oc.norm_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    /// Distance along the ray to a flat annulus. The annulus lies in the local
    /// XY plane of `transform`, centered on the local origin.
    pub fn intersect_annulus(
        &self,
        transform: &Isometry3<f32>,
        inner_radius: f32,
        outer_radius: f32,
    ) -> Option<f32> {
        let local_origin = transform.inverse_transform_point(&self.origin);
        let local_dir = transform.inverse_transform_vector(self.dir.as_ref());

        if local_dir.z.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -local_origin.z / local_dir.z;
        if t < 0.0 {
            return None;
        }

        let hit = local_origin + local_dir * t;
        let r = hit.x.hypot(hit.y);
        if inner_radius <= r && r <= outer_radius {
            Some(t)
        } else {
            None
        }
    }
}
