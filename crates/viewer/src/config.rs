//! Viewer configuration (window, camera, projection, textures, lights). Loaded from config.ron at startup.

use glam::Vec3;
use renderer::{Material, PointLight, Projection, ProjectionMode, SceneLights, Spotlight};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent viewer settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_title")]
    pub title: String,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Radians of camera rotation per pixel of mouse motion.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Camera speed in units per second.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Vertical field of view in degrees (perspective only).
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_ortho_half_extent")]
    pub ortho_half_extent: f32,
    /// Start in perspective; `false` starts orthographic.
    #[serde(default = "default_true")]
    pub start_perspective: bool,
    #[serde(default)]
    pub textures: TextureConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
}

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_title() -> String {
    "Still Life".to_string()
}
fn default_true() -> bool {
    true
}
fn default_sensitivity() -> f32 {
    0.002
}
fn default_move_speed() -> f32 {
    2.5
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_ortho_half_extent() -> f32 {
    10.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            title: default_title(),
            vsync: default_true(),
            sensitivity: default_sensitivity(),
            move_speed: default_move_speed(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            ortho_half_extent: default_ortho_half_extent(),
            start_perspective: default_true(),
            textures: TextureConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

/// Image file per material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub glass: PathBuf,
    pub tabletop: PathBuf,
    pub wood: PathBuf,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            glass: PathBuf::from("assets/textures/glass.png"),
            tabletop: PathBuf::from("assets/textures/gray.png"),
            wood: PathBuf::from("assets/textures/wood.png"),
        }
    }
}

impl TextureConfig {
    pub fn paths(&self) -> [(Material, &Path); 3] {
        [
            (Material::Glass, self.glass.as_path()),
            (Material::Tabletop, self.tabletop.as_path()),
            (Material::Wood, self.wood.as_path()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl From<PointLight> for PointLightConfig {
    fn from(light: PointLight) -> Self {
        Self {
            position: light.position.into(),
            color: light.color.into(),
            intensity: light.intensity,
        }
    }
}

impl From<PointLightConfig> for PointLight {
    fn from(config: PointLightConfig) -> Self {
        Self {
            position: Vec3::from(config.position),
            color: Vec3::from(config.color),
            intensity: config.intensity,
        }
    }
}

/// Spotlight with its cone given in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotlightConfig {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub inner_degrees: f32,
    pub outer_degrees: f32,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        let spot = SceneLights::default().spot;
        Self {
            position: spot.position.into(),
            direction: spot.direction.into(),
            color: spot.color.into(),
            intensity: spot.intensity,
            inner_degrees: 12.5,
            outer_degrees: 15.0,
        }
    }
}

impl From<SpotlightConfig> for Spotlight {
    fn from(config: SpotlightConfig) -> Self {
        Spotlight::from_degrees(
            Vec3::from(config.position),
            Vec3::from(config.direction),
            Vec3::from(config.color),
            config.intensity,
            config.inner_degrees,
            config.outer_degrees,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub key: PointLightConfig,
    pub fill: PointLightConfig,
    pub spot: SpotlightConfig,
}

impl Default for LightingConfig {
    fn default() -> Self {
        let lights = SceneLights::default();
        Self {
            key: lights.key.into(),
            fill: lights.fill.into(),
            spot: SpotlightConfig::default(),
        }
    }
}

impl From<LightingConfig> for SceneLights {
    fn from(config: LightingConfig) -> Self {
        Self {
            key: config.key.into(),
            fill: config.fill.into(),
            spot: config.spot.into(),
        }
    }
}

impl AppConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match Self::parse(&data) {
                Ok(c) => {
                    log::info!("Loaded config from {:?}", path);
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    pub fn projection(&self) -> Projection {
        Projection {
            mode: if self.start_perspective {
                ProjectionMode::Perspective
            } else {
                ProjectionMode::Orthographic
            },
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
            ortho_half_extent: self.ortho_half_extent,
        }
    }

    pub fn scene_lights(&self) -> SceneLights {
        self.lighting.into()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
