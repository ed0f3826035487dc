//! Event names and payloads published by the coordinator
//!
//! Every event is named `{kind}:gen:{phase}` where `kind` is the wire name of
//! the request kind (`text`, `image`, `poetry`).

use serde_json::{json, Value};

use glyphart_core::{
    error::GlyphartError, request::GenerationRequest, result::RenderResult, types::RequestKind,
};

/// Where a submission is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Accepted; always first
    Start,
    /// Finished with art
    Complete,
    /// Finished without art
    Error,
    /// Turned away because another request was in flight
    Busy,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Complete => "complete",
            Phase::Error => "error",
            Phase::Busy => "busy",
        }
    }
}

/// `{kind}:gen:{phase}`
pub fn event_name(kind: RequestKind, phase: Phase) -> String {
    format!("{}:gen:{}", kind.wire_name(), phase.as_str())
}

/// Echo of an accepted request, with text cut to `echo_limit` characters and
/// image bytes reduced to a count
pub fn start_payload(request: &GenerationRequest, echo_limit: usize) -> Value {
    match request {
        GenerationRequest::Text(text) => json!({
            "kind": RequestKind::Text.wire_name(),
            "text": truncate(&text.text, echo_limit),
            "fontName": text.font_name,
            "color": text.color,
            "animation": text.animation,
        }),
        GenerationRequest::Image(image) => json!({
            "kind": RequestKind::Image.wire_name(),
            "sourceName": image.source.name,
            "sourceBytes": image.source.len(),
            "width": image.width,
            "charSet": image.char_set,
        }),
        GenerationRequest::Poem(poem) => json!({
            "kind": RequestKind::Poem.wire_name(),
            "poemText": truncate(&poem.poem_text, echo_limit),
            "fontName": poem.font_name,
            "keywords": poem.keywords,
            "layout": poem.layout.as_str(),
            "decoration": poem.decoration.as_str(),
            "color": poem.color,
            "animation": poem.animation,
        }),
    }
}

/// `{success: true, ascii, metadata}`
pub fn complete_payload(result: &RenderResult) -> Value {
    json!({
        "success": true,
        "ascii": result.ascii_text,
        "metadata": result.metadata,
    })
}

/// `{message}` with the user-safe message only
pub fn error_payload(error: &GlyphartError) -> Value {
    json!({ "message": error.user_message() })
}

/// `{message}` for a turned-away submission
pub fn busy_payload(error: &GlyphartError) -> Value {
    json!({ "message": error.user_message() })
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
