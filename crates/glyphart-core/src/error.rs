//! Error types for Glyphart

use thiserror::Error;

use crate::types::RequestKind;

pub type Result<T> = std::result::Result<T, GlyphartError>;

/// Main error type for Glyphart
///
/// `Display` carries the full detail for logs. Anything shown to an end user
/// goes through [`GlyphartError::user_message`] instead.
#[derive(Debug, Error)]
pub enum GlyphartError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Font not found: {0}")]
    ResourceNotFound(String),

    #[error("{kind} render exceeded its {budget_ms} ms budget")]
    RenderTimeout { kind: RequestKind, budget_ms: u64 },

    #[error("Rendering failed: {0}")]
    RenderFailed(#[from] RenderError),

    #[error("A {in_flight} generation is already in progress")]
    Busy { in_flight: RequestKind },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GlyphartError {
    /// Short, user-safe text for the public `error` payload
    pub fn user_message(&self) -> String {
        match self {
            GlyphartError::Validation(err) => err.to_string(),
            GlyphartError::ResourceNotFound(name) => format!("Font \"{name}\" is not available"),
            GlyphartError::RenderTimeout { .. } => {
                "Generation took too long and was stopped. Try a smaller input.".to_string()
            },
            GlyphartError::RenderFailed(RenderError::Decode(_)) => {
                "The image could not be read. Use a valid PNG, JPEG, GIF, or BMP file.".to_string()
            },
            GlyphartError::RenderFailed(RenderError::OutputTooLarge { .. }) => {
                "The image is too tall to draw at this width. Try a smaller width.".to_string()
            },
            GlyphartError::RenderFailed(_) => "Generation failed. Please try again.".to_string(),
            GlyphartError::Busy { .. } => {
                "Please wait for the current generation to finish.".to_string()
            },
            GlyphartError::Config(_) => "Generation is misconfigured.".to_string(),
        }
    }

    /// Flow-control rejections are not faults
    pub fn is_busy(&self) -> bool {
        matches!(self, GlyphartError::Busy { .. })
    }
}

/// Input validation errors, all user-correctable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some {field}")]
    Empty { field: &'static str },

    #[error("The {field} is too long ({actual} of at most {max} characters)")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("The image is too large ({actual} of at most {max} bytes)")]
    TooLarge { max: usize, actual: usize },

    #[error("The {field} must be between {min} and {max} (got {actual})")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Unsupported {field}: \"{value}\"")]
    UnsupportedOption { field: &'static str, value: String },

    #[error("Unsupported image format; use PNG, JPEG, GIF, or BMP")]
    UnsupportedFormat,

    #[error("The {field} contains no usable characters")]
    InvalidCharacters { field: &'static str },
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Output would be {rows} rows, more than the {max} allowed")]
    OutputTooLarge { rows: u32, max: u32 },

    #[error("Render cancelled")]
    Cancelled,

    #[error("Backend error: {0}")]
    Backend(String),
}
