//! Configuration types for playback timing parameters.

use serde::{Deserialize, Serialize};

/// Default packet speed in path segments per second.
fn default_speed() -> f32 {
    1.2
}

/// Default packet lift above the floor plane.
fn default_height_offset() -> f32 {
    0.5
}

/// Default pause between a completed step and the next one in auto-play.
fn default_advance_delay() -> f32 {
    0.5
}

/// Global playback configuration.
///
/// One speed applies to every step; there is no per-step override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Packet speed in path segments per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Vertical offset added to every waypoint so the packet floats above the floor.
    #[serde(default = "default_height_offset")]
    pub height_offset: f32,
    /// Seconds between a step completing and the next step activating in auto-play.
    #[serde(default = "default_advance_delay")]
    pub advance_delay: f32,
    /// Minimum playing time after which a single-node (stationary) step completes.
    ///
    /// `None` keeps stationary steps manual-only: they never complete on their own
    /// and auto-play waits on them until the user moves on.
    #[serde(default)]
    pub min_dwell: Option<f32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            height_offset: default_height_offset(),
            advance_delay: default_advance_delay(),
            min_dwell: None,
        }
    }
}

impl PlaybackConfig {
    /// Time for the packet to cross a path with `nodes` entries at this speed.
    #[inline]
    pub fn traversal_time(&self, nodes: usize) -> f32 {
        nodes.saturating_sub(1) as f32 / self.speed
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !self.height_offset.is_finite() {
            return Err(ConfigError::InvalidHeightOffset);
        }
        if !(self.advance_delay.is_finite() && self.advance_delay >= 0.0) {
            return Err(ConfigError::InvalidAdvanceDelay(self.advance_delay));
        }
        if let Some(dwell) = self.min_dwell {
            if !(dwell.is_finite() && dwell > 0.0) {
                return Err(ConfigError::InvalidDwell(dwell));
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Packet speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),
    #[error("Height offset must be finite")]
    InvalidHeightOffset,
    #[error("Advance delay must be non-negative, got {0}")]
    InvalidAdvanceDelay(f32),
    #[error("Minimum dwell must be positive, got {0}")]
    InvalidDwell(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = PlaybackConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.speed, 1.2);
        assert_eq!(config.advance_delay, 0.5);
        assert!(config.min_dwell.is_none());
    }

    #[test]
    fn test_rejects_bad_speed() {
        for speed in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = PlaybackConfig {
                speed,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSpeed(_))
            ));
        }
    }

    #[test]
    fn test_rejects_negative_delay_and_dwell() {
        let config = PlaybackConfig {
            advance_delay: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAdvanceDelay(_))
        ));

        let config = PlaybackConfig {
            min_dwell: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDwell(_))));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{ "speed": 2.0 }"#).unwrap();
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.height_offset, 0.5);
        assert_eq!(config.advance_delay, 0.5);
    }

    #[test]
    fn test_traversal_time() {
        let config = PlaybackConfig {
            speed: 2.0,
            ..Default::default()
        };
        assert_eq!(config.traversal_time(5), 2.0);
        assert_eq!(config.traversal_time(1), 0.0);
        assert_eq!(config.traversal_time(0), 0.0);
    }
}
