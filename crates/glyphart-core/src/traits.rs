//! The contracts the coordinator is written against
//!
//! Four traits, each a seam where a backend plugs in:
//!
//! - [`GlyphSource`] - Where font names become glyph tables
//! - [`InputValidator`] - Where raw input becomes trusted input
//! - [`Renderer`] - Where validated jobs become character art
//! - [`Notifier`] - Where outcomes get broadcast

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::glyph::GlyphTable;
use crate::request::{PoemRequest, RasterSource};
use crate::types::CharRamp;

/// Finds glyph tables by font name
///
/// Names are matched case-insensitively. An unknown name yields `None`;
/// deciding what that means is the caller's job.
pub trait GlyphSource: Send + Sync {
    fn get_font(&self, name: &str) -> Option<Arc<GlyphTable>>;

    /// Every font this source can serve
    fn font_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Which text field is being validated, and therefore which limits apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Banner,
    Poem,
    Keyword,
}

impl TextField {
    pub const fn label(self) -> &'static str {
        match self {
            TextField::Banner => "text",
            TextField::Poem => "poem",
            TextField::Keyword => "keyword",
        }
    }
}

/// Sanitizes and checks raw input before it reaches a renderer
pub trait InputValidator: Send + Sync {
    /// Clean up text and check it is usable; returns the cleaned text
    fn validate_text(&self, input: &str, field: TextField) -> std::result::Result<String, ValidationError>;

    /// Check an encoded image is acceptable to decode
    fn validate_image_source(&self, source: &RasterSource) -> std::result::Result<(), ValidationError>;

    /// Check a number falls inside an inclusive range
    fn validate_range(
        &self,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    ) -> std::result::Result<i64, ValidationError> {
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ValidationError::OutOfRange {
                field,
                min,
                max,
                actual: value,
            })
        }
    }

    /// Check a named option is one of the allowed values; returns it lowercased
    fn validate_choice(
        &self,
        field: &'static str,
        value: &str,
        allowed: &[&str],
    ) -> std::result::Result<String, ValidationError> {
        let normalized = value.trim().to_lowercase();
        if allowed.iter().any(|option| *option == normalized) {
            Ok(normalized)
        } else {
            Err(ValidationError::UnsupportedOption {
                field,
                value: value.to_string(),
            })
        }
    }
}

/// Callback invoked with an event name and its payload
pub type EventHandler = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Fire-and-forget broadcast of pipeline events
pub trait Notifier: Send + Sync {
    /// Deliver a payload to every handler subscribed to `event`
    fn publish(&self, event: &str, payload: Value);

    /// Register a handler; it stays registered while the returned handle lives
    fn subscribe(&self, event: &str, handler: EventHandler) -> Subscription;
}

/// Keeps a handler registered; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle that owns nothing
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Remove the handler now
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Cooperative cancellation flag shared between a coordinator and a render
///
/// Cancelling never interrupts work by force; long loops check
/// [`CancelToken::is_cancelled`] between steps and bail out.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One unit of work for a [`Renderer`], inputs already validated
#[derive(Debug, Clone)]
pub enum RenderJob {
    Text {
        text: String,
        font: Arc<GlyphTable>,
    },
    Image {
        source: RasterSource,
        width: u32,
        ramp: CharRamp,
    },
    Poem {
        request: PoemRequest,
        font: Arc<GlyphTable>,
    },
}

/// What a renderer hands back
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOutput {
    pub ascii: String,
    /// Decoded `(width, height)` for image jobs
    pub source_dimensions: Option<(u32, u32)>,
    /// Keyword tokens drawn as glyph art for poem jobs
    pub highlighted: usize,
}

impl RenderOutput {
    pub fn text(ascii: impl Into<String>) -> Self {
        Self {
            ascii: ascii.into(),
            ..Self::default()
        }
    }
}

/// Boxed future returned by [`Renderer::render`]
pub type RenderFuture<'a> = Pin<Box<dyn Future<Output = Result<RenderOutput>> + Send + 'a>>;

/// Turns jobs into character art
///
/// Rendering is asynchronous so expensive work (raster decode) can leave the
/// calling task, and so the coordinator can race it against a timer. A
/// renderer that outlives its budget should stop at its next checkpoint once
/// `cancel` fires.
pub trait Renderer: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    fn render(&self, job: RenderJob, cancel: CancelToken) -> RenderFuture<'_>;

    /// Flush any internal memo
    fn clear_cache(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct Strict;

    impl InputValidator for Strict {
        fn validate_text(&self, input: &str, _field: TextField) -> std::result::Result<String, ValidationError> {
            Ok(input.to_string())
        }

        fn validate_image_source(&self, _source: &RasterSource) -> std::result::Result<(), ValidationError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_range_check() {
        assert_eq!(Strict.validate_range("width", 80, 10, 300), Ok(80));
        assert_eq!(
            Strict.validate_range("width", 5, 10, 300),
            Err(ValidationError::OutOfRange {
                field: "width",
                min: 10,
                max: 300,
                actual: 5
            })
        );
    }

    #[test]
    fn test_default_choice_check_normalizes() {
        assert_eq!(
            Strict.validate_choice("color", " Fire ", &["none", "fire"]),
            Ok("fire".to_string())
        );
        assert!(Strict.validate_choice("color", "plaid", &["none"]).is_err());
    }

    #[test]
    fn test_subscription_cancels_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        subscription.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
