//! Error types for scene construction.
//!
//! Almost every failure here is recoverable: the offending record or moon is
//! skipped, the error is logged once and kept in the build report, and the
//! rest of the scene is still built.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    /// Record type has no entry in the visual config.
    #[error("no visual config for type '{type_name}' (record '{name}')")]
    UnknownType { type_name: String, name: String },

    /// Record type has a visual config but is not a celestial type the map
    /// knows how to place.
    #[error("unsupported type '{type_name}' (record '{name}')")]
    UnsupportedType { type_name: String, name: String },

    /// A dataset entry that is not a JSON object.
    #[error("dataset entry #{index} is not an object")]
    MalformedRecord { index: usize },

    /// Moons reference a planet that was never built.
    #[error("planet '{planet}' not found, skipping its {moons} moon(s)")]
    PlanetNotFound { planet: String, moons: usize },

    /// A single moon entry could not be turned into an orbiting body.
    #[error("moon #{index} of planet '{planet}' is malformed: {reason}")]
    MalformedMoon {
        planet: String,
        index: usize,
        reason: String,
    },

    /// Top-level JSON input could not be parsed at all.
    #[error("invalid JSON input: {0}")]
    Dataset(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let err = SceneError::UnknownType {
            type_name: "nebula".into(),
            name: "Crab".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nebula"));
        assert!(msg.contains("Crab"));
    }

    #[test]
    fn unsupported_type_is_not_a_missing_visual() {
        let err = SceneError::UnsupportedType {
            type_name: "nebula".into(),
            name: "Crab".into(),
        };
        assert_eq!(err.to_string(), "unsupported type 'nebula' (record 'Crab')");
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("[");
        let err = SceneError::from(parse.unwrap_err());
        assert!(matches!(err, SceneError::Dataset(_)));
        assert!(err.to_string().starts_with("invalid JSON input"));
    }
}
