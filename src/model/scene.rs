use std::f32::consts::{FRAC_PI_2, TAU};

use nalgebra::{Isometry3, Point2, Point3, Translation3, UnitQuaternion, Vector3};

use super::body::{Body, BodyID, BodyParams, FocusClass};
use crate::math::path::{circle_xz, path_iter_parametric};

pub const ORBIT_PATH_SEGMENTS: usize = 128;
pub const RING_SEGMENTS: usize = 64;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeID(pub usize);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RingID(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Massless pivot; its accumulated angle revolves its child around the
    /// pivot's origin.
    OrbitContainer { angle: f64 },
    Body(BodyID),
    Ring(RingID),
    /// Translucent shell around the sun. Not pickable.
    Glow { radius: f32 },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeID>,
    /// False once removed from the scene; detached nodes are neither drawn
    /// nor updated.
    pub attached: bool,
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
    pub kind: NodeKind,
}

impl Node {
    fn new(parent: Option<NodeID>, kind: NodeKind) -> Self {
        Node {
            parent,
            attached: true,
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
            kind,
        }
    }

    pub fn local_isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingParams {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Extra tilt on top of lying flat in the owner's equatorial plane
    pub tilt: f32,
    pub texture: String,
}

#[derive(Debug, Clone)]
pub struct Ring {
    pub id: RingID,
    pub owner: BodyID,
    pub node: NodeID,
    pub params: RingParams,
}

/// Circular guide line in the root frame.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    pub owner: BodyID,
    pub points: Vec<Point3<f32>>,
}

/// What `create_planet` hands back: the body and the pivot that revolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetHandle {
    pub body: BodyID,
    pub orbit_container: NodeID,
}

/// Triangle mesh in plain arrays, ready to hand to a renderer.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub coords: Vec<Point3<f32>>,
    pub faces: Vec<[u16; 3]>,
    pub uvs: Vec<Point2<f32>>,
}

/// Flat annulus in the XY plane, UV-mapped the same way a planar projection
/// of the disc would be.
pub fn annulus_mesh(inner_radius: f32, outer_radius: f32, segments: usize) -> MeshData {
    let ring = |r: f32| {
        path_iter_parametric(
            move |theta: f32| Point3::new(theta.cos() * r, theta.sin() * r, 0.0),
            0.0,
            TAU,
            segments,
        )
    };

    let mut coords: Vec<_> = ring(inner_radius).collect();
    coords.extend(ring(outer_radius));

    let uvs = coords
        .iter()
        .map(|p| {
            let extent = if outer_radius == 0.0 { 1.0 } else { outer_radius };
            Point2::new((p.x / extent + 1.0) / 2.0, (p.y / extent + 1.0) / 2.0)
        })
        .collect();

    // Vertices 0..=segments are the inner edge, the rest the outer edge
    let stride = (segments + 1) as u16;
    let faces = (0..segments as u16)
        .flat_map(|i| {
            let (a, b) = (i, i + 1);
            let (c, d) = (i + stride, i + 1 + stride);
            [[a, c, d], [a, d, b]]
        })
        .collect();

    MeshData { coords, faces, uvs }
}

/// Arena-backed scene graph. Nodes only ever get added; removal just marks
/// them detached, so IDs stay valid for the lifetime of the graph.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    bodies: Vec<Body>,
    rings: Vec<Ring>,
    orbit_paths: Vec<OrbitPath>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_node(&mut self, parent: Option<NodeID>, kind: NodeKind) -> NodeID {
        let id = NodeID(self.nodes.len());
        self.nodes.push(Node::new(parent, kind));
        id
    }

    fn add_body(
        &mut self,
        params: BodyParams,
        parent_node: Option<NodeID>,
        orbit_container: Option<NodeID>,
    ) -> BodyID {
        let id = BodyID(self.bodies.len());
        let node = self.add_node(parent_node, NodeKind::Body(id));
        self.bodies.push(Body {
            id,
            params,
            focus_class: FocusClass::Small,
            node,
            orbit_container,
            parent: None,
            spin_angle: 0.0,
        });
        id
    }

    /// Adds a body at the scene root with no orbit of its own.
    pub fn add_fixed_body(&mut self, params: BodyParams) -> BodyID {
        self.add_body(params, None, None)
    }

    /// Adds a body on a circular orbit around the root origin: an orbit
    /// container at the root, the body inside it at `distance_from_parent`
    /// along +X, and a matching orbit path.
    pub fn create_planet(&mut self, params: BodyParams) -> PlanetHandle {
        let distance = params.distance_from_parent;
        let container = self.add_node(None, NodeKind::OrbitContainer { angle: 0.0 });
        let body = self.add_body(params, Some(container), Some(container));

        let node = self.bodies[body.0].node;
        self.nodes[node.0].translation = Vector3::new(distance, 0.0, 0.0);

        self.orbit_paths.push(OrbitPath {
            owner: body,
            points: circle_xz(distance, ORBIT_PATH_SEGMENTS),
        });

        PlanetHandle {
            body,
            orbit_container: container,
        }
    }

    /// Attaches a flat ring to a body. The ring starts out lying in the XZ
    /// plane (a quarter turn about X), then tips by `params.tilt` more.
    pub fn add_ring(&mut self, owner: BodyID, params: RingParams) -> RingID {
        let id = RingID(self.rings.len());
        let parent = self.bodies[owner.0].node;
        let node = self.add_node(Some(parent), NodeKind::Ring(id));
        self.nodes[node.0].rotation =
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2 + params.tilt);
        self.rings.push(Ring {
            id,
            owner,
            node,
            params,
        });
        id
    }

    pub fn add_glow(&mut self, radius: f32) -> NodeID {
        self.add_node(None, NodeKind::Glow { radius })
    }

    /// Takes a body out of whatever orbit container it was built in and hangs
    /// it directly under `new_parent` at a fixed local offset. The old
    /// container leaves the scene; its orbit path stays.
    pub fn reparent_body(&mut self, body: BodyID, new_parent: BodyID, offset: Vector3<f32>) {
        if let Some(container) = self.bodies[body.0].orbit_container.take() {
            self.nodes[container.0].attached = false;
        }

        let parent_node = self.bodies[new_parent.0].node;
        let node = self.bodies[body.0].node;
        self.nodes[node.0].parent = Some(parent_node);
        self.nodes[node.0].translation = offset;
        self.bodies[body.0].parent = Some(new_parent);
    }

    pub fn node(&self, id: NodeID) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeID) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeID, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeID(i), n))
    }

    pub fn body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: BodyID) -> &mut Body {
        &mut self.bodies[id.0]
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn ring(&self, id: RingID) -> &Ring {
        &self.rings[id.0]
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.rings.iter()
    }

    pub fn orbit_paths(&self) -> &[OrbitPath] {
        &self.orbit_paths
    }

    /// Whether the node and all of its ancestors are still in the scene.
    pub fn is_in_scene(&self, id: NodeID) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if !node.attached {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Rigid transform from the node's frame to the root frame. Scale is not
    /// included; only leaf nodes (the glow shell) are ever scaled.
    pub fn world_isometry(&self, id: NodeID) -> Isometry3<f32> {
        let node = &self.nodes[id.0];
        let local = node.local_isometry();
        match node.parent {
            Some(parent) => self.world_isometry(parent) * local,
            None => local,
        }
    }

    pub fn world_position(&self, id: NodeID) -> Point3<f32> {
        self.world_isometry(id) * Point3::origin()
    }

    pub fn body_world_position(&self, id: BodyID) -> Point3<f32> {
        self.world_position(self.bodies[id.0].node)
    }

    /// Accumulated revolution angle of an orbit container.
    pub fn orbit_angle(&self, container: NodeID) -> Option<f64> {
        match self.nodes[container.0].kind {
            NodeKind::OrbitContainer { angle } => Some(angle),
            _ => None,
        }
    }

    pub fn advance_orbit(&mut self, container: NodeID, delta: f64) {
        let node = &mut self.nodes[container.0];
        if let NodeKind::OrbitContainer { ref mut angle } = node.kind {
            *angle += delta;
            node.rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), *angle as f32);
        }
    }

    pub fn advance_spin(&mut self, body: BodyID, delta: f64) {
        let body = &mut self.bodies[body.0];
        body.spin_angle += delta;
        self.nodes[body.node.0].rotation =
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), body.spin_angle as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(radius: f32, distance: f32) -> BodyParams {
        BodyParams {
            radius,
            texture: String::from("planet.png"),
            distance_from_parent: distance,
            rotation_speed: 0.01,
            orbit_speed: 0.02,
        }
    }

    #[test]
    fn test_create_planet_inserts_container_and_path() {
        let mut graph = SceneGraph::new();
        let handle = graph.create_planet(params(0.2, 2.5));

        let body = graph.body(handle.body);
        assert_eq!(body.orbit_container, Some(handle.orbit_container));
        assert_eq!(graph.node(body.node).parent, Some(handle.orbit_container));
        assert_eq!(graph.orbit_angle(handle.orbit_container), Some(0.0));
        assert_relative_eq!(
            graph.body_world_position(handle.body),
            Point3::new(2.5, 0.0, 0.0)
        );

        let paths = graph.orbit_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].owner, handle.body);
        assert_eq!(paths[0].points.len(), ORBIT_PATH_SEGMENTS + 1);
    }

    #[test]
    fn test_degenerate_planet_is_accepted() {
        let mut graph = SceneGraph::new();
        let handle = graph.create_planet(params(-1.0, 0.0));
        assert_eq!(graph.body(handle.body).params.radius, -1.0);
        assert_relative_eq!(graph.body_world_position(handle.body), Point3::origin());
    }

    #[test]
    fn test_container_rotation_revolves_body() {
        let mut graph = SceneGraph::new();
        let handle = graph.create_planet(params(0.2, 2.0));

        // A quarter turn about +Y sends +X to -Z
        graph.advance_orbit(handle.orbit_container, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(
            graph.body_world_position(handle.body),
            Point3::new(0.0, 0.0, -2.0),
            epsilon = 1e-5
        );

        // Spinning the body itself doesn't move it
        graph.advance_spin(handle.body, 1.0);
        assert_relative_eq!(
            graph.body_world_position(handle.body),
            Point3::new(0.0, 0.0, -2.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_reparent_detaches_container() {
        let mut graph = SceneGraph::new();
        let earth = graph.create_planet(params(0.22, 3.5));
        let moon = graph.create_planet(params(0.06, 0.5));

        graph.reparent_body(moon.body, earth.body, Vector3::new(0.5, 0.0, 0.0));

        assert!(!graph.is_in_scene(moon.orbit_container));
        assert!(graph.is_in_scene(graph.body(moon.body).node));
        assert_eq!(graph.body(moon.body).orbit_container, None);
        assert_eq!(graph.body(moon.body).parent, Some(earth.body));
        assert_relative_eq!(
            graph.body_world_position(moon.body),
            Point3::new(4.0, 0.0, 0.0)
        );

        // The factory's orbit path is left in place
        assert_eq!(graph.orbit_paths().len(), 2);
    }

    #[test]
    fn test_ring_follows_owner() {
        let mut graph = SceneGraph::new();
        let saturn = graph.create_planet(params(0.4, 8.0));
        let ring = graph.add_ring(
            saturn.body,
            RingParams {
                inner_radius: 0.55,
                outer_radius: 0.75,
                tilt: 0.3,
                texture: String::from("ring.png"),
            },
        );

        let node = graph.ring(ring).node;
        assert_relative_eq!(graph.world_position(node), Point3::new(8.0, 0.0, 0.0));

        // The ring's normal is tipped 0.3 rad away from vertical
        let normal = graph.world_isometry(node) * Vector3::z();
        assert_relative_eq!(normal.y.abs(), 0.3f32.cos(), epsilon = 1e-5);
    }

    #[test]
    fn test_annulus_mesh() {
        let mesh = annulus_mesh(0.4, 0.45, 64);
        assert_eq!(mesh.coords.len(), 2 * 65);
        assert_eq!(mesh.uvs.len(), mesh.coords.len());
        assert_eq!(mesh.faces.len(), 2 * 64);

        for face in &mesh.faces {
            for &i in face {
                assert!((i as usize) < mesh.coords.len());
            }
        }
        for (i, pt) in mesh.coords.iter().enumerate() {
            let expected = if i <= 64 { 0.4 } else { 0.45 };
            assert_relative_eq!(pt.coords.norm(), expected, epsilon = 1e-5);
        }
    }
}
