// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playground configuration.
//!
//! Settings are stored as RON and cover:
//! - Evaluation limits
//! - Code generation layout
//! - Canvas geometry used by the playground view

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "playground.ron";

/// Errors raised while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not valid RON for the settings
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File was written by an incompatible version
    #[error("Unsupported config version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Version this build understands
        expected: u32,
    },
}

/// Limits applied while evaluating a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Deepest chain of nested inputs followed before giving up
    pub max_depth: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Layout of generated code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// One level of indentation for block bodies
    pub indent_unit: String,
    /// Deepest chain of nested inputs rendered before emitting a placeholder
    pub max_depth: usize,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            max_depth: 256,
        }
    }
}

/// Canvas geometry for the playground view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Where nodes added from the catalog appear
    pub spawn_position: [f32; 2],
    /// Width and height of a node body
    pub node_size: [f32; 2],
    /// Radius of a port dot
    pub port_radius: f32,
    /// How close a pointer must be to grab a node
    pub grab_radius: f32,
    /// Draw the background grid
    pub show_grid: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            spawn_position: [300.0, 300.0],
            node_size: [160.0, 80.0],
            port_radius: 14.0,
            grab_radius: 40.0,
            show_grid: true,
        }
    }
}

/// All playground settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Format version
    pub version: u32,
    /// Evaluation limits
    pub evaluation: EvaluationConfig,
    /// Code generation layout
    pub codegen: CodegenConfig,
    /// Canvas geometry
    pub canvas: CanvasConfig,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            evaluation: EvaluationConfig::default(),
            codegen: CodegenConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl PlaygroundConfig {
    /// Parse settings from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlaygroundConfig = ron::from_str(content)?;
        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                expected: CONFIG_FORMAT_VERSION,
            });
        }
        Ok(config)
    }

    /// Render settings as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!("Loaded playground config from {}", path.display());
        Ok(config)
    }

    /// Load settings from a file, falling back to defaults when it is missing
    /// or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load playground config: {e}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content)?;
        tracing::info!("Saved playground config to {}", path.display());
        Ok(())
    }
}
