use serde::{Deserialize, Serialize};

use crate::api::error::{Result, SessionError};
use crate::systems::vector::VectorColor;

/// Largest accepted `max_vector_vertices` (24 MiB of vertex floats).
pub const VECTOR_VERTICES_LIMIT: usize = 1 << 20;
/// Largest accepted `max_events`.
pub const EVENTS_LIMIT: usize = 1024;

/// Configuration for one page session, provided by the host as JSON.
///
/// Every field has a default matching the live portfolio page, so `{}` is a
/// complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for particle placement. Fixed seeds make layouts reproducible.
    pub seed: u64,
    /// Fixed simulation step in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Duration of the loading splash in milliseconds.
    pub loading_ms: f64,
    /// Maximum number of vector vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of session events per frame (default: 32).
    pub max_events: usize,
    pub field: FieldConfig,
    pub typewriter: TypewriterConfig,
    pub sections: SectionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fixed_dt: 1.0 / 60.0,
            loading_ms: 2000.0,
            max_vector_vertices: 65536,
            max_events: 32,
            field: FieldConfig::default(),
            typewriter: TypewriterConfig::default(),
            sections: SectionConfig::default(),
        }
    }
}

/// Particle field tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Velocity components are drawn from [-max_speed, max_speed] (units per frame).
    pub max_speed: f32,
    /// Radius drawn from [min, max).
    pub radius_range: (f32, f32),
    /// Opacity drawn from [min, max).
    pub opacity_range: (f32, f32),
    /// Pairs closer than this get a connecting line.
    pub link_distance: f32,
    /// Line opacity at distance zero.
    pub link_opacity: f32,
    pub link_width: f32,
    pub link_color: VectorColor,
    pub palette: Vec<VectorColor>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            max_speed: 0.25,
            radius_range: (1.0, 3.0),
            opacity_range: (0.2, 0.7),
            link_distance: 100.0,
            link_opacity: 0.1,
            link_width: 1.0,
            link_color: VectorColor::CYAN,
            palette: vec![VectorColor::CYAN, VectorColor::MAGENTA, VectorColor::YELLOW],
        }
    }
}

/// Typewriter phrases and cadence, all delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_full_ms: u32,
    pub pause_empty_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        let phrases = [
            "Full Stack Architect",
            "AI/ML Engineer",
            "Blockchain Developer",
            "DevOps Specialist",
            "UI/UX Designer",
            "Mobile Developer",
            "Cloud Architect",
            "Cybersecurity Expert",
            "Data Scientist",
            "Game Developer",
        ];
        Self {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            type_ms: 80,
            delete_ms: 30,
            pause_full_ms: 3000,
            pause_empty_ms: 500,
        }
    }
}

/// Page sections tracked for the navigation highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub ids: Vec<String>,
    /// Viewport-space line a section must span to become active.
    pub probe_y: f32,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            ids: ["hero", "about", "projects", "skills", "contact"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            probe_y: 100.0,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the components cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.typewriter.phrases.is_empty() {
            return Err(SessionError::EmptyPhrases);
        }
        if self.field.particle_count > 0 && self.field.palette.is_empty() {
            return Err(SessionError::EmptyPalette);
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(out_of_range("fixed_dt", self.fixed_dt));
        }
        if !(self.loading_ms.is_finite() && self.loading_ms >= 0.0) {
            return Err(out_of_range("loading_ms", self.loading_ms));
        }
        if self.max_vector_vertices > VECTOR_VERTICES_LIMIT {
            return Err(out_of_range("max_vector_vertices", self.max_vector_vertices));
        }
        if self.max_events > EVENTS_LIMIT {
            return Err(out_of_range("max_events", self.max_events));
        }
        // A zero delay would re-arm the typewriter forever inside one frame.
        let tw = &self.typewriter;
        for (field, ms) in [
            ("typewriter.type_ms", tw.type_ms),
            ("typewriter.delete_ms", tw.delete_ms),
            ("typewriter.pause_full_ms", tw.pause_full_ms),
            ("typewriter.pause_empty_ms", tw.pause_empty_ms),
        ] {
            if ms == 0 {
                return Err(out_of_range(field, ms));
            }
        }
        Ok(())
    }
}

fn out_of_range(field: &'static str, value: impl std::fmt::Display) -> SessionError {
    SessionError::OutOfRange {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.field.particle_count, 100);
        assert_eq!(config.typewriter.phrases.len(), 10);
    }

    #[test]
    fn parses_partial_overrides() {
        let json = r##"{
            "seed": 7,
            "typewriter": { "phrases": ["Hi", "Go"], "type_ms": 50 },
            "field": { "palette": ["#ff0000", "#00ff0080"] }
        }"##;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.typewriter.phrases, vec!["Hi", "Go"]);
        assert_eq!(config.typewriter.type_ms, 50);
        assert_eq!(config.typewriter.delete_ms, 30);
        assert_eq!(config.field.palette.len(), 2);
        assert_eq!(config.field.palette[0], VectorColor::RED);
        assert!((config.field.palette[1].a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn empty_phrases_rejected() {
        let err = SessionConfig::from_json(r#"{ "typewriter": { "phrases": [] } }"#).unwrap_err();
        assert!(matches!(err, SessionError::EmptyPhrases));
    }

    #[test]
    fn empty_palette_rejected() {
        let err = SessionConfig::from_json(r#"{ "field": { "palette": [] } }"#).unwrap_err();
        assert!(matches!(err, SessionError::EmptyPalette));
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = SessionConfig::from_json(r#"{ "field": { "palette": ["teal"] } }"#).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            SessionConfig::from_json("{ nope").unwrap_err(),
            SessionError::Config(_)
        ));
    }

    fn out_of_range_field(json: &str) -> &'static str {
        match SessionConfig::from_json(json).unwrap_err() {
            SessionError::OutOfRange { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_typewriter_delays_rejected() {
        let json = r#"{ "typewriter": { "phrases": ["Hi"], "type_ms": 0, "delete_ms": 0,
            "pause_full_ms": 0, "pause_empty_ms": 0 } }"#;
        assert_eq!(out_of_range_field(json), "typewriter.type_ms");
        assert_eq!(
            out_of_range_field(r#"{ "typewriter": { "pause_empty_ms": 0 } }"#),
            "typewriter.pause_empty_ms"
        );
    }

    #[test]
    fn oversized_buffers_rejected() {
        assert_eq!(
            out_of_range_field(r#"{ "max_vector_vertices": 18446744073709551615 }"#),
            "max_vector_vertices"
        );
        assert_eq!(out_of_range_field(r#"{ "max_events": 100000 }"#), "max_events");
        let mut config = SessionConfig::default();
        config.max_vector_vertices = VECTOR_VERTICES_LIMIT;
        config.max_events = EVENTS_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_fixed_dt_rejected() {
        assert_eq!(out_of_range_field(r#"{ "fixed_dt": 0.0 }"#), "fixed_dt");
        assert_eq!(out_of_range_field(r#"{ "fixed_dt": -0.01 }"#), "fixed_dt");
        let mut config = SessionConfig::default();
        config.fixed_dt = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(SessionError::OutOfRange { field: "fixed_dt", .. })
        ));
    }

    #[test]
    fn negative_loading_rejected() {
        assert_eq!(out_of_range_field(r#"{ "loading_ms": -1.0 }"#), "loading_ms");
    }
}
