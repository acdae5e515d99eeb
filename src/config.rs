use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::model::camera::CameraRig;
use crate::model::meteors::METEOR_COUNT;
use crate::model::starfield::DEFAULT_STAR_COUNT;

/// Viewer configuration, read from a RON file. Every section and field is
/// optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frames per second cap, 0 for none
    pub framerate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory texture paths are relative to
    pub root: PathBuf,
    /// Skybox directory, relative to `root`
    pub skybox_dir: PathBuf,
    /// Skybox faces in +X, -X, +Y, -Y, +Z, -Z order
    pub skybox_faces: [String; 6],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub meteor_count: usize,
    pub star_count: usize,
    /// Seed for meteors and stars; random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
    pub initial_position: [f32; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets: AssetConfig::default(),
            scene: SceneConfig::default(),
            camera: CameraConfig::default(),
            log_level: String::from("info"),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: String::from("Sistema Solar"),
            framerate_limit: 60,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            skybox_dir: PathBuf::from("textures/cubemap-space"),
            skybox_faces: ["right", "left", "top", "bottom", "front", "back"]
                .map(|face| format!("{}.png", face)),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            meteor_count: METEOR_COUNT,
            star_count: DEFAULT_STAR_COUNT,
            seed: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 2.0,
            max_distance: 40.0,
            damping: 0.05,
            initial_position: [0.0, 5.0, 15.0],
        }
    }
}

impl AssetConfig {
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn skybox_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.skybox_faces
            .iter()
            .map(move |face| self.root.join(&self.skybox_dir).join(face))
    }
}

impl CameraConfig {
    pub fn initial_position(&self) -> Point3<f32> {
        Point3::from(self.initial_position)
    }

    pub fn build_rig(&self) -> CameraRig {
        let mut rig = CameraRig::new(self.initial_position());
        rig.set_fovy(self.fov_degrees.to_radians());
        rig.set_clip_planes(self.near, self.far);
        rig.set_distance_limits(self.min_distance, self.max_distance);
        rig.set_damping(self.damping);
        rig
    }

    /// First field that would leave the camera unusable, with the reason.
    pub fn check(&self) -> Result<(), (&'static str, &'static str)> {
        let finite = [
            ("fov_degrees", self.fov_degrees),
            ("near", self.near),
            ("far", self.far),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("damping", self.damping),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err((*field, "must be finite"));
        }
        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(("fov_degrees", "must lie strictly between 0 and 180"));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(("far", "must be greater than near, which must be positive"));
        }
        if self.min_distance > self.max_distance {
            return Err(("max_distance", "must not be less than min_distance"));
        }
        if self.damping <= 0.0 || self.damping > 1.0 {
            return Err(("damping", "must lie in (0, 1]"));
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_owned(),
            source,
        })?;
        config
            .camera
            .check()
            .map_err(|(field, reason)| ConfigError::InvalidValue {
                path: path.to_owned(),
                field,
                reason,
            })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
