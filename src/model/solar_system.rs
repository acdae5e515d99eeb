use nalgebra::Vector3;
use tracing::info;

use super::body::BodyID;
use super::catalog::{self, BODIES, EARTH, MOON, MOON_OFFSET, PLANETS, RINGS, SUN, SUN_GLOW_RADIUS};
use super::info::InfoTable;
use super::meteors::MeteorField;
use super::scene::{NodeID, PlanetHandle, SceneGraph};

/// Everything the viewer simulates: the scene graph, the facts behind it
/// and the free-floating meteors.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    pub scene: SceneGraph,
    pub info: InfoTable,
    pub meteors: MeteorField,
    pub sun: BodyID,
    pub glow: NodeID,
    pub planets: Vec<PlanetHandle>,
    pub moon: BodyID,
}

impl SolarSystem {
    pub fn build(meteor_count: usize, seed: u64) -> Self {
        let mut scene = SceneGraph::new();

        let sun = scene.add_fixed_body(catalog::spec(SUN).params());
        let glow = scene.add_glow(SUN_GLOW_RADIUS);

        let planets: Vec<PlanetHandle> = PLANETS
            .iter()
            .map(|&id| scene.create_planet(catalog::spec(id).params()))
            .collect();

        // Built like any planet, then hung off the earth instead
        let moon = scene.create_planet(catalog::spec(MOON).params()).body;
        scene.reparent_body(moon, EARTH, Vector3::from(MOON_OFFSET));

        for ring in RINGS.iter() {
            scene.add_ring(ring.owner, ring.params());
        }

        let mut info = InfoTable::new();
        for spec in BODIES.iter() {
            debug_assert_eq!(scene.body(spec.id).params.radius, spec.radius);
            scene.body_mut(spec.id).focus_class = spec.focus_class;
            info.insert(spec.id, &spec.info);
        }

        let meteors = MeteorField::new(meteor_count, seed);

        info!(
            "Built solar system: {} bodies, {} rings, {} meteors",
            scene.bodies().count(),
            scene.rings().count(),
            meteors.len()
        );

        SolarSystem {
            scene,
            info,
            meteors,
            sun,
            glow,
            planets,
            moon,
        }
    }

    /// Logical parent of a body, used to resolve picks on child meshes.
    pub fn parent_of(&self, body: BodyID) -> Option<BodyID> {
        self.scene.body(body).parent
    }

    /// Bodies that can be clicked: the sun, the planets and the moon.
    pub fn selectable(&self) -> impl Iterator<Item = BodyID> + '_ {
        self.scene
            .bodies()
            .filter(move |body| self.scene.is_in_scene(body.node))
            .map(|body| body.id)
    }
}
