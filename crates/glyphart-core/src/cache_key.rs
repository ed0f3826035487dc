//! Canonical cache keys for memoized results
//!
//! A key is a length-prefixed serialization of the fields that decide what a
//! request renders to. Length prefixes keep distinct field tuples from ever
//! colliding ("ab" + "c" vs "a" + "bc"), and case folding makes requests that
//! render identically share one entry.

use std::fmt;

use crate::request::{PoemRequest, TextRequest};
use crate::types::RequestKind;

/// Stable, collision-free identity of a cacheable request
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    /// Which generator produced the entry
    pub kind: RequestKind,
    canonical: String,
}

impl CacheKey {
    /// Key for a banner request
    ///
    /// Banner text is drawn uppercase, so the text is folded the same way
    /// before it is keyed. Font, color, and animation names are folded too.
    pub fn for_text(request: &TextRequest) -> Self {
        Self::from_parts(
            RequestKind::Text,
            [
                request.text.to_uppercase(),
                fold(&request.font_name),
                fold(&request.color),
                fold(&request.animation),
            ],
        )
    }

    /// Key for a poem request
    ///
    /// Poem bodies keep their case: only keywords are drawn as glyphs, the
    /// rest of the text passes through verbatim.
    pub fn for_poem(request: &PoemRequest) -> Self {
        let mut keywords: Vec<String> = request.keywords.iter().map(|k| fold(k)).collect();
        keywords.sort_unstable();
        keywords.dedup();

        let mut parts = vec![
            request.poem_text.clone(),
            fold(&request.font_name),
            fold(&request.color),
            fold(&request.animation),
            request.layout.as_str().to_string(),
            request.decoration.as_str().to_string(),
            keywords.len().to_string(),
        ];
        parts.extend(keywords);
        Self::from_parts(RequestKind::Poem, parts)
    }

    /// Serialize arbitrary fields under a kind
    pub fn from_parts<I, S>(kind: RequestKind, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = String::from(kind.wire_name());
        for part in parts {
            let part = part.as_ref();
            canonical.push('|');
            canonical.push_str(&part.len().to_string());
            canonical.push(':');
            canonical.push_str(part);
        }
        Self { kind, canonical }
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}
