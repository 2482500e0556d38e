//! Session configuration
//!
//! Saved and loaded as RON or JSON. Every field has a default, so a config
//! file only needs to name what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Geometry and shading constants applied to every placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance ahead of the camera, along its local -Z axis
    pub standoff_distance: f32,
    /// Uniform scale of each placed plane
    pub scale: f32,
    /// Alpha of the white tint applied to each image
    pub tint_alpha: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            standoff_distance: 0.5,
            scale: 0.25,
            tint_alpha: 0.999,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub placement: PlacementConfig,
    /// Content names in cycle order. Images should be square.
    pub textures: Vec<String>,
    /// Directory texture names are resolved against
    pub asset_root: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            textures: vec![
                String::from("smile.png"),
                String::from("snowflake.png"),
                String::from("turtle.png"),
            ],
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl SessionConfig {
    /// Replace the content cycle
    #[must_use]
    pub fn with_textures<I, S>(mut self, textures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.textures = textures.into_iter().map(Into::into).collect();
        self
    }

    /// Set the standoff distance
    #[must_use]
    pub fn with_standoff_distance(mut self, distance: f32) -> Self {
        self.placement.standoff_distance = distance;
        self
    }

    /// Set the uniform placement scale
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.placement.scale = scale;
        self
    }

    /// Set the asset directory
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Check that every constant is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.placement;
        if !(p.standoff_distance.is_finite() && p.standoff_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "standoff_distance must be positive, got {}",
                p.standoff_distance
            )));
        }
        if !(p.scale.is_finite() && p.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scale must be positive, got {}",
                p.scale
            )));
        }
        if !(p.tint_alpha > 0.0 && p.tint_alpha <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "tint_alpha must be in (0, 1], got {}",
                p.tint_alpha
            )));
        }
        if self.textures.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "at least one texture is required",
            )));
        }
        if let Some(blank) = self.textures.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("texture #{blank} has an empty name")));
        }
        Ok(())
    }

    /// Save the config to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load and validate a config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Parse and validate a RON document
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json_string =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load and validate a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config, picking the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load_ron(path),
        }
    }
}

/// Errors that can occur while handling configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error
    Io(String),
    /// Parsing error
    Parse(String),
    /// Serialization error
    Serialize(String),
    /// A value is out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Serialize(e) => write!(f, "Serialization error: {e}"),
            Self::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.textures.len(), 3);
        assert!((config.placement.standoff_distance - 0.5).abs() < f32::EPSILON);
        assert!((config.placement.scale - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_ron() {
        let config = SessionConfig::from_ron_str(
            r#"(placement: (standoff_distance: 1.5), textures: ["a.png", "b.png"])"#,
        )
        .unwrap();

        assert!((config.placement.standoff_distance - 1.5).abs() < f32::EPSILON);
        assert!((config.placement.scale - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.textures, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SessionConfig::default().with_scale(0.1);
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(SessionConfig::from_ron_str(&ron_str).unwrap(), config);
    }

    #[test]
    fn test_json_file() {
        let path = std::env::temp_dir().join(format!("anchorplace-config-{}.json", std::process::id()));
        let config = SessionConfig::default().with_textures(["x.png"]);
        config.save_json(&path).unwrap();

        assert_eq!(SessionConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let empty = SessionConfig::default().with_textures(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(ConfigError::Invalid(_))));

        let negative = SessionConfig::default().with_standoff_distance(-0.5);
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let nan_scale = SessionConfig::default().with_scale(f32::NAN);
        assert!(matches!(nan_scale.validate(), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            SessionConfig::from_ron_str("(textures: [\"\"])"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SessionConfig::from_ron_str("(placement: oops"),
            Err(ConfigError::Parse(_))
        ));
    }
}
