use thiserror::Error;

/// Reasons a session refuses to mount.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("typewriter needs at least one phrase")]
    EmptyPhrases,

    #[error("particle palette needs at least one color")]
    EmptyPalette,

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("config field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
