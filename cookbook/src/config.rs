use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Window and input settings shared by every demo, read from a JSON5 file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub vsync: bool,
    pub clear_color: [f32; 3],
    pub camera_speed: f32,
    pub mouse_sensitivity: f32,
    pub resources: PathBuf,
    pub screenshot_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: None,
            vsync: true,
            clear_color: [0.1, 0.1, 0.1],
            camera_speed: 2.5,
            mouse_sensitivity: 0.1,
            resources: PathBuf::from("resources"),
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl DemoConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Input)?;

        text.parse()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.height == 0 {
            let msg = format!("window size {}x{} is empty", self.width, self.height);
            return Err(ConfigError::Invalid(msg));
        }

        if self.camera_speed < 0.0 || self.mouse_sensitivity < 0.0 {
            return Err(ConfigError::Invalid("negative camera setting".into()));
        }

        Ok(self)
    }
}

impl FromStr for DemoConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: DemoConfig = json5::from_str(s).map_err(ConfigError::Format)?;

        config.validate()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Input(std::io::Error),
    #[error("Malformed config: {0}")]
    Format(json5::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: DemoConfig = "{}".parse().unwrap();

        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn json5_syntax() {
        let config: DemoConfig = r#"{
            // comments and trailing commas are fine
            width: 1280,
            height: 720,
            title: 'Skybox',
            vsync: false,
            clear_color: [0.2, 0.3, 0.3],
            resources: "assets",
        }"#
        .parse()
        .unwrap();

        assert_eq!(config.width, 1280);
        assert_eq!(config.title.as_deref(), Some("Skybox"));
        assert!(!config.vsync);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3]);
        assert_eq!(config.resources, PathBuf::from("assets"));
        assert_eq!(config.camera_speed, 2.5);
    }

    #[test]
    fn zero_size_is_invalid() {
        let err = "{ width: 0 }".parse::<DemoConfig>().unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_field_is_format_error() {
        let err = "{ widht: 10 }".parse::<DemoConfig>().unwrap_err();

        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn missing_file() {
        let err = DemoConfig::load("no/such/config.json5").unwrap_err();

        assert!(matches!(err, ConfigError::Input(_)));
    }
}
