//! Configuration system
//!
//! Serde structures for the engine, the camera and the scene manager, stored
//! as TOML or RON. The format is picked from the file extension.

pub use serde::{Deserialize, Serialize};

use crate::ecs::components::CameraComponent;
use crate::ecs::systems::DEFAULT_MAX_DEPTH;
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its valid range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Core engine behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,

    /// Enable extra diagnostics
    pub debug_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: false,
        }
    }
}

impl EngineConfig {
    /// Validate engine settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }
}

/// Camera projection settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    /// Viewport width divided by height
    pub aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl CameraConfig {
    /// Validate camera settings.
    ///
    /// The frustum itself accepts any values; degenerate cameras are rejected
    /// here instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.near <= 0.0 {
            return Err(ConfigError::Invalid(format!("near plane must be positive, got {}", self.near)));
        }
        if self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "far plane ({}) must be beyond near plane ({})",
                self.far, self.near
            )));
        }
        if self.aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!("aspect ratio must be positive, got {}", self.aspect)));
        }
        Ok(())
    }

    /// Camera component with these projection parameters
    pub fn to_camera(&self) -> CameraComponent {
        CameraComponent::perspective(self.fov_degrees, self.near, self.far)
    }
}

/// Scene manager settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Test renderables against the camera frustum
    pub enable_culling: bool,

    /// Longest parent chain accepted by hierarchy walks
    pub max_hierarchy_depth: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            enable_culling: true,
            max_hierarchy_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SceneConfig {
    /// Validate scene settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hierarchy_depth == 0 {
            return Err(ConfigError::Invalid("max hierarchy depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine settings
    pub engine: EngineConfig,

    /// Camera settings
    pub camera: CameraConfig,

    /// Scene settings
    pub scene: SceneConfig,
}

impl Config for ApplicationConfig {}

impl ApplicationConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.camera.validate()?;
        self.scene.validate()
    }

    /// Load and validate a configuration file
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
