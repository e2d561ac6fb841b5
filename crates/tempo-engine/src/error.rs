use thiserror::Error;

/// A configuration value that would produce a broken animation.
///
/// Only raised by the explicit `validate()` calls; the runtime types accept
/// any numbers and degrade visually instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in ({min}, {max}), got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Errors surfaced to the host through the scene director and loaders.
#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no scene is registered for route {0:?}")]
    UnknownRoute(String),

    #[error("manifest route(s) missing a scene: {}", .0.join(", "))]
    MissingScene(Vec<String>),
}

/// Check that `value > 0`.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Check that `min < value < max`.
pub(crate) fn ensure_open_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ConfigError> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check() {
        assert!(ensure_positive("duration_ms", 1.0).is_ok());
        assert_eq!(
            ensure_positive("duration_ms", 0.0),
            Err(ConfigError::NotPositive { field: "duration_ms", value: 0.0 })
        );
    }

    #[test]
    fn missing_scene_lists_routes() {
        let err = ShowcaseError::MissingScene(vec!["/a".into(), "/b".into()]);
        assert_eq!(err.to_string(), "manifest route(s) missing a scene: /a, /b");
    }
}
