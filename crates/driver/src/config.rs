//! Session configuration: every tunable constant, with defaults matching the
//! reference scene, loadable from JSON.

use serde::{Deserialize, Serialize};
use stardrift_input::InputConfig;
use stardrift_kernel::{MotionConfig, ObjectFieldConfig, StarfieldConfig};
use std::path::Path;

/// Errors from loading or validating a [`SessionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Camera intro and easing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub intro_start_z: f32,
    pub intro_end_z: f32,
    /// Seconds of simulated time the intro dolly takes.
    pub intro_duration: f32,
    /// Simulated seconds the intro advances per frame.
    pub frame_delta: f32,
    /// Z the camera rests at with no scroll.
    pub rest_z: f32,
    /// How far the camera dollies in at full scroll progress.
    pub scroll_dolly: f32,
    pub parallax_smoothing: f32,
    pub dolly_smoothing: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            intro_start_z: 300.0,
            intro_end_z: 25.0,
            intro_duration: 2.0,
            frame_delta: 0.016,
            rest_z: 25.0,
            scroll_dolly: 15.0,
            parallax_smoothing: 0.05,
            dolly_smoothing: 0.1,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Everything a [`crate::Session`] needs to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed RNG seed for reproducible scenes; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub starfield: StarfieldConfig,
    pub objects: ObjectFieldConfig,
    pub motion: MotionConfig,
    pub input: InputConfig,
    pub camera: CameraConfig,
    /// Seconds after the first frame before the overlay fade is requested.
    pub overlay_fade_delay: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starfield: StarfieldConfig::default(),
            objects: ObjectFieldConfig::default(),
            motion: MotionConfig::default(),
            input: InputConfig::default(),
            camera: CameraConfig::default(),
            overlay_fade_delay: 0.1,
        }
    }
}

impl SessionConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would make generation panic or the motion diverge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.starfield;
        ensure(s.count > 0, "starfield.count", "must be positive")?;
        ensure(s.min_radius >= 0.0, "starfield.min_radius", "must not be negative")?;
        ensure(s.min_radius < s.max_radius, "starfield.max_radius", "must exceed min_radius")?;
        ensure(s.min_size < s.max_size, "starfield.max_size", "must exceed min_size")?;
        ensure(
            (0.0..=1.0).contains(&s.tint_probability),
            "starfield.tint_probability",
            "must be within [0, 1]",
        )?;

        let o = &self.objects;
        ensure(o.count > 0, "objects.count", "must be positive")?;
        ensure(o.ring_count > 0, "objects.ring_count", "must be positive")?;
        ensure(o.min_scale > 0.0, "objects.min_scale", "must be positive")?;
        ensure(o.min_scale < o.max_scale, "objects.max_scale", "must exceed min_scale")?;
        ensure(o.max_rotation_speed > 0.0, "objects.max_rotation_speed", "must be positive")?;

        let c = &self.camera;
        ensure(c.intro_duration > 0.0, "camera.intro_duration", "must be positive")?;
        ensure(c.frame_delta > 0.0, "camera.frame_delta", "must be positive")?;
        ensure(
            c.parallax_smoothing > 0.0 && c.parallax_smoothing <= 1.0,
            "camera.parallax_smoothing",
            "must be within (0, 1]",
        )?;
        ensure(
            c.dolly_smoothing > 0.0 && c.dolly_smoothing <= 1.0,
            "camera.dolly_smoothing",
            "must be within (0, 1]",
        )?;
        ensure(
            c.rest_z - c.scroll_dolly > 0.0,
            "camera.scroll_dolly",
            "must leave the camera in front of the origin",
        )?;
        ensure(c.intro_end_z > 0.0, "camera.intro_end_z", "must be positive")?;
        ensure(
            c.fov_degrees > 0.0 && c.fov_degrees < 180.0,
            "camera.fov_degrees",
            "must be within (0, 180)",
        )?;
        ensure(c.near > 0.0 && c.near < c.far, "camera.near", "must be positive and below far")?;

        ensure(
            self.input.wheel_boost_duration >= 0.0,
            "input.wheel_boost_duration",
            "must not be negative",
        )?;
        ensure(self.overlay_fade_delay >= 0.0, "overlay_fade_delay", "must not be negative")?;
        Ok(())
    }
}

fn ensure(ok: bool, field: &'static str, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.objects.count, 69);
        assert_eq!(config.starfield.count, 500);
        assert_eq!(config.camera.intro_start_z, 300.0);
        assert_eq!(config.overlay_fade_delay, 0.1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SessionConfig::from_json_str(
            r#"{ "seed": 7, "objects": { "count": 12 }, "camera": { "intro_duration": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.objects.count, 12);
        assert_eq!(config.objects.max_scale, 2.3);
        assert_eq!(config.camera.intro_duration, 1.0);
        assert_eq!(config.camera.intro_end_z, 25.0);
        assert_eq!(config.starfield, StarfieldConfig::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SessionConfig::from_json_str("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SessionConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn invalid_values_name_the_field() {
        let err = SessionConfig::from_json_str(r#"{ "camera": { "intro_duration": 0.0 } }"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "camera.intro_duration"),
            other => panic!("unexpected error: {other}"),
        }

        let err = SessionConfig::from_json_str(
            r#"{ "starfield": { "min_radius": 300.0, "max_radius": 200.0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("starfield.max_radius"));

        let err = SessionConfig::from_json_str(r#"{ "starfield": { "tint_probability": 1.5 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("tint_probability"));

        let err = SessionConfig::from_json_str(
            r#"{ "camera": { "rest_z": 15.0, "scroll_dolly": 15.0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("camera.scroll_dolly"));

        let err = SessionConfig::from_json_str(r#"{ "objects": { "count": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("objects.count"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 99, "starfield": {{ "count": 50 }} }}"#).unwrap();
        let config = SessionConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.starfield.count, 50);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
