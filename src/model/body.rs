use super::scene::NodeID;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

/// Construction parameters of a body. Nothing here is validated; zero or
/// negative values just produce degenerate geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParams {
    pub radius: f32,
    pub texture: String,
    pub distance_from_parent: f32,
    /// Spin per frame, in radians
    pub rotation_speed: f64,
    /// Revolution per frame (or per second, for the moon), in radians
    pub orbit_speed: f64,
}

/// How far the camera sits from a body while focused on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusClass {
    Star,
    GasGiant,
    Small,
}

impl FocusClass {
    pub fn distance(self) -> f32 {
        match self {
            FocusClass::Star => 3.0,
            FocusClass::GasGiant => 2.0,
            FocusClass::Small => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub params: BodyParams,
    pub focus_class: FocusClass,
    /// Node carrying the body's own transform (spin, offset from its pivot)
    pub node: NodeID,
    /// Pivot whose rotation revolves the body. None for the sun, and for the
    /// moon once it has been moved under the earth.
    pub orbit_container: Option<NodeID>,
    /// Logical parent body, used to resolve picks on child meshes
    pub parent: Option<BodyID>,
    /// Accumulated spin, never wrapped
    pub spin_angle: f64,
}
