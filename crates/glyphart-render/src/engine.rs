//! The render engine: every algorithm behind one handle
//!
//! Text, raster, and poem rendering are plain functions; the engine adds a
//! small memo of keyword art so poems that repeat a keyword only draw it once.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use glyphart_core::{
    error::RenderError, request::PoemRequest, traits::CancelToken, types::CharRamp, GlyphTable,
};

use crate::poem::{compose_poem_with, PoemArt};
use crate::raster::{decode_raster, map_raster};
use crate::text::{compose_block, compose_text};

const DEFAULT_MEMO_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => unreachable!(),
};

/// Memo key: table fingerprint and uppercased token
type ArtKey = (u64, String);

/// Art for a decoded image along with the source size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArt {
    pub ascii: String,
    pub source_width: u32,
    pub source_height: u32,
}

/// Runs the rendering algorithms and remembers keyword art
pub struct RenderEngine {
    keyword_memo: Mutex<LruCache<ArtKey, Arc<Vec<String>>>>,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::with_memo_capacity(DEFAULT_MEMO_CAPACITY.get())
    }

    /// Engine whose keyword memo holds `capacity` entries (at least one)
    pub fn with_memo_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            keyword_memo: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Banner text as glyph art
    pub fn render_text(&self, text: &str, table: &GlyphTable) -> String {
        log::trace!("Composing {} chars with {}", text.chars().count(), table.name());
        compose_text(text, table)
    }

    /// Decode an encoded picture and map it onto `ramp`
    pub fn render_image(
        &self,
        bytes: &[u8],
        width: u32,
        ramp: CharRamp,
        cancel: &CancelToken,
    ) -> Result<ImageArt, RenderError> {
        let raster = decode_raster(bytes)?;
        if cancel.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        let ascii = map_raster(&raster, width, ramp, cancel)?;
        Ok(ImageArt {
            ascii,
            source_width: raster.width(),
            source_height: raster.height(),
        })
    }

    /// A poem with its keywords drawn in `table`
    pub fn render_poem(&self, request: &PoemRequest, table: &GlyphTable) -> PoemArt {
        compose_poem_with(
            &request.poem_text,
            &request.keywords,
            request.layout,
            request.decoration,
            |token| self.keyword_art(token, table),
        )
    }

    /// Drop every memoized keyword drawing
    pub fn clear_memo(&self) {
        self.keyword_memo.lock().clear();
    }

    /// Number of memoized keyword drawings
    pub fn memo_len(&self) -> usize {
        self.keyword_memo.lock().len()
    }

    fn keyword_art(&self, token: &str, table: &GlyphTable) -> Arc<Vec<String>> {
        let key = (table.fingerprint(), token.to_uppercase());
        if let Some(hit) = self.keyword_memo.lock().get(&key) {
            return Arc::clone(hit);
        }

        let art = Arc::new(compose_block(token, table));
        self.keyword_memo.lock().put(key, Arc::clone(&art));
        art
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}
