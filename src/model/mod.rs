pub mod body;
pub mod camera;
pub mod catalog;
pub mod focus;
pub mod info;
pub mod meteors;
pub mod panel;
pub mod picking;
pub mod scene;
pub mod solar_system;
pub mod starfield;
pub mod state;
pub mod update;

pub use body::{Body, BodyID, BodyParams, FocusClass};
pub use camera::CameraRig;
pub use solar_system::SolarSystem;
pub use state::SceneState;
