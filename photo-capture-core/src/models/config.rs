use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::camera_models::Facing;

pub const DEFAULT_ALBUM_NAME: &str = "MyAppPhotos";
pub const DEFAULT_GUIDANCE_TIP: &str = "Try turning slightly to the right and raising your chin";

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Album every committed shot is added to (default: "MyAppPhotos").
    pub album_name: String,

    /// Still capture quality passed to the camera, 0.0 exclusive to 1.0 (default: 0.8).
    pub capture_quality: f32,

    /// Facing used when the session starts (default: back).
    pub initial_facing: Facing,

    /// Text shown while the guidance overlay is enabled.
    pub guidance_tip: String,

    /// Ask the camera provider to delete the temporary file after a successful commit.
    pub discard_temp_after_commit: bool,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.album_name.trim().is_empty() {
            return Err("album name must not be empty".into());
        }
        if !(self.capture_quality > 0.0 && self.capture_quality <= 1.0) {
            return Err(format!("capture quality out of range: {}", self.capture_quality));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("failed to parse session config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            album_name: DEFAULT_ALBUM_NAME.to_string(),
            capture_quality: 0.8,
            initial_facing: Facing::Back,
            guidance_tip: DEFAULT_GUIDANCE_TIP.to_string(),
            discard_temp_after_commit: true,
        }
    }
}

/// Configuration for the placeholder enhancement task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    /// How long an enhancement suspends before resolving (default: 2000 ms).
    pub delay_ms: u64,
}

impl EnhancementConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.album_name, "MyAppPhotos");
        assert_eq!(config.initial_facing, Facing::Back);
        assert_eq!(EnhancementConfig::default().delay(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_bad_quality_and_empty_album() {
        let config = SessionConfig {
            capture_quality: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            album_name: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SessionConfig::from_json(r#"{ "album_name": "Portraits", "initial_facing": "front" }"#)
            .unwrap();
        assert_eq!(config.album_name, "Portraits");
        assert_eq!(config.initial_facing, Facing::Front);
        assert_eq!(config.capture_quality, 0.8);
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        assert!(SessionConfig::from_json(r#"{ "capture_quality": 0.0 }"#).is_err());
        assert!(SessionConfig::from_json("not json").is_err());
    }
}
