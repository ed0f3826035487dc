//! Finished art and what we know about how it was made

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::types::RequestKind;

/// One generation's output, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub ascii_text: String,
    pub metadata: Metadata,
    /// Milliseconds since the Unix epoch
    pub generated_at: u64,
}

impl RenderResult {
    pub fn new(ascii_text: String, metadata: Metadata) -> Self {
        let generated_at = metadata.timestamp();
        Self {
            ascii_text,
            metadata,
            generated_at,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.metadata.kind()
    }
}

/// Kind-specific record of inputs and output size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metadata {
    Text(TextMetadata),
    Image(ImageMetadata),
    Poem(PoemMetadata),
}

impl Metadata {
    pub fn kind(&self) -> RequestKind {
        match self {
            Metadata::Text(_) => RequestKind::Text,
            Metadata::Image(_) => RequestKind::Image,
            Metadata::Poem(_) => RequestKind::Poem,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            Metadata::Text(meta) => meta.timestamp,
            Metadata::Image(meta) => meta.timestamp,
            Metadata::Poem(meta) => meta.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetadata {
    pub text: String,
    pub font_name: String,
    pub color: String,
    pub animation: String,
    pub line_count: usize,
    pub char_count: usize,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub source_name: Option<String>,
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub char_set: String,
    pub line_count: usize,
    pub char_count: usize,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemMetadata {
    pub poem_text: String,
    pub font_name: String,
    pub keywords: Vec<String>,
    pub layout: String,
    pub decoration: String,
    pub color: String,
    pub animation: String,
    pub highlighted: usize,
    pub line_count: usize,
    pub char_count: usize,
    pub timestamp: u64,
}

/// Lines and characters in a piece of art, newlines excluded
pub fn measure(ascii: &str) -> (usize, usize) {
    if ascii.is_empty() {
        return (0, 0);
    }
    let lines = ascii.split('\n').count();
    let chars = ascii.chars().filter(|c| *c != '\n').count();
    (lines, chars)
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure() {
        assert_eq!(measure(""), (0, 0));
        assert_eq!(measure("##"), (1, 2));
        assert_eq!(measure("XP\nYQ"), (2, 4));
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let meta = Metadata::Text(TextMetadata {
            text: "HI".into(),
            font_name: "standard".into(),
            color: "none".into(),
            animation: "none".into(),
            line_count: 1,
            char_count: 2,
            timestamp: 7,
        });
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["fontName"], "standard");
        assert_eq!(value["lineCount"], 1);
        assert!(value.get("Text").is_none());
    }

    #[test]
    fn test_result_takes_metadata_timestamp() {
        let result = RenderResult::new(
            "x".into(),
            Metadata::Image(ImageMetadata {
                source_name: None,
                source_width: 4,
                source_height: 4,
                width: 2,
                char_set: "standard".into(),
                line_count: 1,
                char_count: 1,
                timestamp: 42,
            }),
        );
        assert_eq!(result.generated_at, 42);
        assert_eq!(result.kind(), RequestKind::Image);
    }
}
