use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};
use tracing::{debug, info, trace};

use super::camera::OrbitCamera;
use super::overlay::PanelOverlay;
use super::renderers::CompoundRenderer;
use super::skybox::Skybox;
use crate::assets::{TextureLoader, TextureSlot};
use crate::config::Config;
use crate::model::body::BodyID;
use crate::model::catalog::{GLOW_COLOR, SUN, SUN_COLOR};
use crate::model::meteors::METEOR_RADIUS;
use crate::model::panel::PanelLayout;
use crate::model::picking::{self, ClickOutcome, CursorHint};
use crate::model::scene::{annulus_mesh, NodeID, NodeKind, RingID, RING_SEGMENTS};
use crate::model::solar_system::SolarSystem;
use crate::model::starfield::Starfield;
use crate::model::state::SceneState;
use crate::model::update::advance_frame;

const ORBIT_COLOR: [f32; 3] = [0.25, 0.25, 0.25];
const METEOR_GREY: f32 = 0.67;
const HIGHLIGHT_COLOR: [f32; 3] = [1.0, 0.8, 0.0];
const HIGHLIGHT_SCALE: f32 = 1.3;

/// Owns the simulation and its kiss3d mirror. Every model node that is in
/// the scene gets a kiss3d group carrying its transform; meshes hang off
/// those groups.
pub struct View {
    // Simulation
    system: SolarSystem,
    state: SceneState,
    camera: OrbitCamera,
    starfield: Starfield,
    // Scene objects
    groups: HashMap<NodeID, SceneNode>,
    body_meshes: HashMap<BodyID, SceneNode>,
    ring_meshes: HashMap<RingID, SceneNode>,
    meteor_meshes: Vec<SceneNode>,
    skybox: Skybox,
    // Overlay
    panel: Option<PanelLayout>,
    overlay: PanelOverlay,
    hovered: Option<BodyID>,
    scale_factor: f32,
    // Misc
    textures: TextureLoader,
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(window: &mut Window, config: &Config, seed: u64) -> Self {
        let system = SolarSystem::build(config.scene.meteor_count, seed);
        let starfield = Starfield::generate(config.scene.star_count, seed.wrapping_add(1));

        let mut rig = config.camera.build_rig();
        rig.set_viewport(window.width(), window.height());
        let state = SceneState::new(rig.position());

        let mut renderer = CompoundRenderer::new();
        for path in system.scene.orbit_paths() {
            renderer.add_orbit_path(&path.points, Point3::from(ORBIT_COLOR));
        }

        let meteor_meshes = system
            .meteors
            .meteors()
            .iter()
            .map(|_| {
                let mut sphere = window.add_sphere(METEOR_RADIUS);
                sphere.set_color(METEOR_GREY, METEOR_GREY, METEOR_GREY);
                sphere
            })
            .collect();

        let mut view = View {
            system,
            state,
            camera: OrbitCamera::new(rig),
            starfield,
            groups: HashMap::new(),
            body_meshes: HashMap::new(),
            ring_meshes: HashMap::new(),
            meteor_meshes,
            skybox: Skybox::new(window),
            panel: None,
            overlay: PanelOverlay::new(window),
            hovered: None,
            scale_factor: window.scale_factor() as f32,
            textures: TextureLoader::new(),
            renderer,
        };
        view.create_scene_objects(window);
        view.request_textures(config);
        view.sync_scene_objects();

        info!(
            "Scene ready: {} nodes mirrored, {} stars",
            view.groups.len(),
            view.starfield.stars().len()
        );
        view
    }

    fn create_scene_objects(&mut self, window: &mut Window) {
        let scene = &self.system.scene;
        // Parents always come before their children in the arena
        for (id, node) in scene.nodes() {
            if !scene.is_in_scene(id) {
                continue;
            }

            let mut group = match node.parent.and_then(|p| self.groups.get_mut(&p)) {
                Some(parent) => parent.add_group(),
                None => window.add_group(),
            };

            match node.kind {
                NodeKind::OrbitContainer { .. } => {}
                NodeKind::Body(body_id) => {
                    let body = scene.body(body_id);
                    let mut sphere = group.add_sphere(body.params.radius);
                    if body_id == SUN {
                        sphere.set_color(SUN_COLOR.0, SUN_COLOR.1, SUN_COLOR.2);
                    }
                    self.body_meshes.insert(body_id, sphere);
                }
                NodeKind::Ring(ring_id) => {
                    let params = &scene.ring(ring_id).params;
                    let data = annulus_mesh(params.inner_radius, params.outer_radius, RING_SEGMENTS);
                    let faces = data
                        .faces
                        .iter()
                        .map(|f| Point3::new(f[0], f[1], f[2]))
                        .collect();
                    let mesh = Mesh::new(data.coords, faces, None, Some(data.uvs), false);
                    let mut ring = group.add_mesh(Rc::new(RefCell::new(mesh)), Vector3::repeat(1.0));
                    ring.enable_backface_culling(false);
                    self.ring_meshes.insert(ring_id, ring);
                }
                NodeKind::Glow { radius } => {
                    let mut shell = group.add_sphere(radius);
                    shell.set_color(GLOW_COLOR.0, GLOW_COLOR.1, GLOW_COLOR.2);
                    shell.set_surface_rendering_activation(false);
                    shell.set_lines_width(1.0);
                }
            }

            self.groups.insert(id, group);
        }
    }

    fn request_textures(&self, config: &Config) {
        for body in self.system.scene.bodies() {
            let path = config.assets.resolve(&body.params.texture);
            self.textures.request(TextureSlot::Body(body.id), path);
        }
        for ring in self.system.scene.rings() {
            let path = config.assets.resolve(&ring.params.texture);
            self.textures.request(TextureSlot::Ring(ring.id), path);
        }
        for (face, path) in config.assets.skybox_paths().enumerate() {
            self.textures.request(TextureSlot::Skybox(face), path);
        }
    }

    fn apply_loaded_textures(&mut self) {
        for loaded in self.textures.drain_results() {
            let name = loaded.name();
            match loaded.slot {
                TextureSlot::Body(id) => {
                    if let Some(mesh) = self.body_meshes.get_mut(&id) {
                        mesh.set_texture_from_memory(&loaded.bytes, &name);
                    }
                }
                TextureSlot::Ring(id) => {
                    if let Some(mesh) = self.ring_meshes.get_mut(&id) {
                        mesh.set_texture_from_memory(&loaded.bytes, &name);
                    }
                }
                TextureSlot::Skybox(face) => {
                    self.skybox.apply_texture(face, &loaded.bytes, &name);
                }
            }
            debug!("Applied texture {}", name);
        }
    }

    /// Copies model transforms onto the kiss3d nodes.
    fn sync_scene_objects(&mut self) {
        let scene = &self.system.scene;
        for (id, group) in self.groups.iter_mut() {
            let node = scene.node(*id);
            group.set_local_transformation(node.local_isometry());
            group.set_local_scale(node.scale.x, node.scale.y, node.scale.z);
            group.set_visible(scene.is_in_scene(*id));
        }

        for (mesh, meteor) in self
            .meteor_meshes
            .iter_mut()
            .zip(self.system.meteors.meteors())
        {
            mesh.set_local_translation(Translation3::from(meteor.position.coords));
            mesh.set_local_rotation(UnitQuaternion::from_euler_angles(
                meteor.tumble.0,
                meteor.tumble.1,
                0.0,
            ));
        }

        self.skybox.follow(self.camera.rig.position());
    }

    fn refresh_panel(&mut self) {
        let record = self
            .state
            .selected()
            .and_then(|body| self.system.info.get(body));
        self.panel =
            record.map(|r| PanelLayout::new(r, self.camera.rig.viewport(), self.scale_factor));
    }

    pub fn update(&mut self, now: f64) {
        advance_frame(&mut self.system, &mut self.state, &mut self.camera.rig, now);
        self.apply_loaded_textures();
        self.sync_scene_objects();
    }

    pub fn click(&mut self, cursor: Point2<f32>, now: f64) {
        let outcome = picking::handle_pointer(
            &self.system,
            &mut self.state,
            &mut self.camera.rig,
            self.panel.as_ref(),
            cursor,
            now,
        );
        debug!("Click at {}: {:?}", cursor, outcome);
        if outcome != ClickOutcome::OnPanel {
            self.refresh_panel();
        }
    }

    pub fn hover(&mut self, cursor: Point2<f32>) {
        let over_panel = self
            .panel
            .as_ref()
            .map_or(false, |p| p.contains(cursor.x, cursor.y));

        let hovered = if over_panel {
            None
        } else {
            let ray = self.camera.rig.ray_through_window(cursor.x, cursor.y);
            match picking::cursor_hint(&self.system, ray.as_ref()) {
                CursorHint::Pointer(body) => Some(body),
                CursorHint::Default => None,
            }
        };

        if hovered != self.hovered {
            trace!("Hover {:?} -> {:?}", self.hovered, hovered);
            self.hovered = hovered;
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.rig.set_viewport(width, height);
        self.refresh_panel();
    }

    pub fn prerender_scene(&mut self, window: &mut Window) {
        self.scale_factor = window.scale_factor() as f32;

        self.renderer
            .draw_stars(&self.starfield, self.camera.rig.position());

        if let Some(body) = self.hovered {
            let center = self.system.scene.body_world_position(body);
            let radius = self.system.scene.body(body).params.radius.abs();
            self.renderer
                .draw_highlight(center, radius * HIGHLIGHT_SCALE, Point3::from(HIGHLIGHT_COLOR));
        }

        self.overlay.draw(
            window,
            self.panel.as_ref(),
            self.camera.rig.viewport(),
            self.scale_factor,
        );
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(&mut self.camera),
            None,
            Some(&mut self.renderer),
            None,
        )
    }
}
