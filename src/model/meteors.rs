use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const METEOR_COUNT: usize = 80;
pub const METEOR_RADIUS: f32 = 0.1;
/// Edge of the cube meteors spawn in, centered on the origin
pub const SPAWN_CUBE_SIZE: f32 = 50.0;
/// Meteors further than this from the origin get respawned
pub const WRAP_DISTANCE: f32 = 60.0;
/// Per-frame velocity components fall in ±half of this
pub const MAX_SPEED: f32 = 0.05;
/// Per-frame tumble about X and Y, in radians
pub const TUMBLE_STEP: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub position: Point3<f32>,
    /// Fixed at spawn
    pub velocity: Vector3<f32>,
    /// Euler angles about X and Y
    pub tumble: (f32, f32),
}

/// Ambient drifting debris. Meteors never bounce or despawn; one that strays
/// too far teleports to a fresh random point in the spawn cube and keeps its
/// velocity.
#[derive(Debug, Clone)]
pub struct MeteorField {
    meteors: Vec<Meteor>,
    rng: ChaCha8Rng,
}

fn random_in_cube<R: Rng>(rng: &mut R, size: f32) -> Vector3<f32> {
    Vector3::new(
        (rng.random::<f32>() - 0.5) * size,
        (rng.random::<f32>() - 0.5) * size,
        (rng.random::<f32>() - 0.5) * size,
    )
}

impl MeteorField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let meteors = (0..count)
            .map(|_| Meteor {
                position: Point3::from(random_in_cube(&mut rng, SPAWN_CUBE_SIZE)),
                velocity: random_in_cube(&mut rng, MAX_SPEED),
                tumble: (0.0, 0.0),
            })
            .collect();

        MeteorField { meteors, rng }
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn len(&self) -> usize {
        self.meteors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meteors.is_empty()
    }

    /// Moves every meteor one frame along its velocity. Returns how many
    /// had to be respawned.
    pub fn advance(&mut self) -> usize {
        let mut respawned = 0;
        for meteor in self.meteors.iter_mut() {
            meteor.position += meteor.velocity;
            meteor.tumble.0 += TUMBLE_STEP;
            meteor.tumble.1 += TUMBLE_STEP;

            if meteor.position.coords.norm() > WRAP_DISTANCE {
                meteor.position = Point3::from(random_in_cube(&mut self.rng, SPAWN_CUBE_SIZE));
                respawned += 1;
            }
        }
        respawned
    }

    #[cfg(test)]
    pub(crate) fn meteors_mut(&mut self) -> &mut [Meteor] {
        &mut self.meteors
    }
}
