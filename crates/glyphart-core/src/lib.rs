//! Glyphart Core: the shared vocabulary of the character-art pipeline
//!
//! Text, images, and poems all travel the same road before they come out as
//! monospace art. This crate holds everything that road is paved with:
//!
//! 1. **Requests** - [`request`] defines the three kinds of work we accept
//! 2. **Glyph tables** - [`glyph::GlyphTable`] maps characters to rows of art
//! 3. **Results** - [`result::RenderResult`] carries finished art plus metadata
//! 4. **Caching** - [`cache::ResultCache`] remembers results under a [`cache_key::CacheKey`]
//! 5. **Configuration** - [`config::CoordinatorConfig`] sets budgets and bounds
//!
//! ## The Traits That Power Everything
//!
//! The coordinator never talks to a concrete backend. It talks to these:
//!
//! - [`GlyphSource`] - Finds a glyph table by font name
//! - [`InputValidator`] - Turns raw user input into something trustworthy
//! - [`Renderer`] - Turns a validated job into character art
//! - [`Notifier`] - Broadcasts what happened to whoever is listening
//!
//! ```rust
//! use glyphart_core::{cache::ResultCache, cache_key::CacheKey, request::TextRequest};
//!
//! let cache = ResultCache::new(8)?;
//! let key = CacheKey::for_text(&TextRequest::new("Hello"));
//! assert!(cache.lookup(&key).is_none());
//! assert_eq!(cache.statistics().misses, 1);
//! # Ok::<(), glyphart_core::GlyphartError>(())
//! ```

pub mod cache;
pub mod cache_key;
pub mod config;
pub mod error;
pub mod glyph;
pub mod request;
pub mod result;
pub mod traits;

pub use cache::{CacheStatistics, ResultCache};
pub use cache_key::CacheKey;
pub use config::CoordinatorConfig;
pub use error::{GlyphartError, RenderError, Result, ValidationError};
pub use glyph::GlyphTable;
pub use request::{keyword_stem, GenerationRequest, ImageRequest, PoemRequest, RasterSource, TextRequest};
pub use result::{Metadata, RenderResult};
pub use traits::{GlyphSource, InputValidator, Notifier, Renderer};

/// The data structures shared by every stage
pub mod types {
    use std::fmt;

    use serde::Serialize;

    use crate::error::RenderError;

    /// Which of the three generators a request belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RequestKind {
        Text,
        Image,
        #[serde(rename = "poetry")]
        Poem,
    }

    impl RequestKind {
        /// The name used on the wire (`{kind}:gen:start` and friends)
        pub const fn wire_name(self) -> &'static str {
            match self {
                RequestKind::Text => "text",
                RequestKind::Image => "image",
                RequestKind::Poem => "poetry",
            }
        }

        /// Whether results of this kind are memoized
        pub const fn is_cacheable(self) -> bool {
            !matches!(self, RequestKind::Image)
        }
    }

    impl fmt::Display for RequestKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.wire_name())
        }
    }

    /// Single-flight gate: at most one generation runs at a time
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum SessionState {
        #[default]
        Idle,
        InFlight(RequestKind),
    }

    impl SessionState {
        pub fn is_idle(self) -> bool {
            matches!(self, SessionState::Idle)
        }
    }

    /// Decoded pixels, row-major RGBA8
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Raster {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    }

    impl Raster {
        /// Wrap an RGBA buffer, checking it matches the stated dimensions
        pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
            let expected = width as usize * height as usize * 4;
            if width == 0 || height == 0 || pixels.len() != expected {
                return Err(RenderError::InvalidDimensions { width, height });
            }
            Ok(Self {
                width,
                height,
                pixels,
            })
        }

        /// A raster filled with one color
        pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, RenderError> {
            let count = width as usize * height as usize;
            let pixels = rgba.iter().copied().cycle().take(count * 4).collect();
            Self::from_rgba(width, height, pixels)
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        pub fn pixels(&self) -> &[u8] {
            &self.pixels
        }

        /// RGBA at `(x, y)`; callers stay in bounds
        pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
            let at = (y as usize * self.width as usize + x as usize) * 4;
            [
                self.pixels[at],
                self.pixels[at + 1],
                self.pixels[at + 2],
                self.pixels[at + 3],
            ]
        }
    }

    /// Ordered characters from densest to sparsest
    ///
    /// Luminance 0 lands on the first character, luminance 255 on the last.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharRamp {
        name: &'static str,
        glyphs: &'static str,
    }

    impl CharRamp {
        pub const STANDARD: CharRamp = CharRamp::new("standard", "@%#*+=-:. ");
        pub const SIMPLE: CharRamp = CharRamp::new("simple", "#+-. ");
        pub const BLOCKS: CharRamp = CharRamp::new("blocks", "█▓▒░ ");
        pub const DETAILED: CharRamp = CharRamp::new(
            "detailed",
            "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ",
        );
        pub const INVERTED: CharRamp = CharRamp::new("inverted", " .:-=+*#%@");

        pub const ALL: [CharRamp; 5] = [
            CharRamp::STANDARD,
            CharRamp::SIMPLE,
            CharRamp::BLOCKS,
            CharRamp::DETAILED,
            CharRamp::INVERTED,
        ];

        pub const fn new(name: &'static str, glyphs: &'static str) -> Self {
            Self { name, glyphs }
        }

        /// Look up a bundled ramp, ignoring case
        pub fn named(name: &str) -> Option<CharRamp> {
            Self::ALL
                .into_iter()
                .find(|ramp| ramp.name.eq_ignore_ascii_case(name.trim()))
        }

        /// Names of all bundled ramps
        pub fn names() -> Vec<&'static str> {
            Self::ALL.iter().map(|ramp| ramp.name).collect()
        }

        pub fn name(&self) -> &'static str {
            self.name
        }

        pub fn chars(&self) -> Vec<char> {
            self.glyphs.chars().collect()
        }
    }

    impl Default for CharRamp {
        fn default() -> Self {
            CharRamp::STANDARD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(RequestKind::Text.wire_name(), "text");
        assert_eq!(RequestKind::Image.wire_name(), "image");
        assert_eq!(RequestKind::Poem.wire_name(), "poetry");
        assert!(!RequestKind::Image.is_cacheable());
    }

    #[test]
    fn test_raster_rejects_short_buffer() {
        assert!(Raster::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(Raster::from_rgba(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_raster_pixel_lookup() {
        let mut pixels = vec![0u8; 2 * 2 * 4];
        pixels[12..16].copy_from_slice(&[9, 8, 7, 255]);
        let raster = Raster::from_rgba(2, 2, pixels).unwrap();
        assert_eq!(raster.pixel(1, 1), [9, 8, 7, 255]);
    }

    #[test]
    fn test_ramp_lookup() {
        assert_eq!(CharRamp::named("Blocks"), Some(CharRamp::BLOCKS));
        assert_eq!(CharRamp::named("nope"), None);
        assert_eq!(CharRamp::STANDARD.chars().last().copied(), Some(' '));
        assert_eq!(CharRamp::DETAILED.chars().len(), 70);
    }
}
