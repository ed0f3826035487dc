//! Where glyph tables live: the font library for Glyphart
//!
//! Fonts here are not files. Each one is a [`GlyphTable`] of hand-drawn rows,
//! compiled into the binary, so looking one up never touches the disk or the
//! network.
//!
//! ## Bundled fonts
//!
//! - `standard` - five rows of `#` marks
//! - `block` - `standard` drawn with solid blocks
//! - `small` - three rows of line art
//!
//! Extra tables can be registered at runtime and are served the same way.

pub mod bundled;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use glyphart_core::{
    error::{GlyphartError, Result},
    traits::GlyphSource,
    GlyphTable,
};

/// Your font library: keeps track of every glyph table by name
pub struct GlyphLibrary {
    tables: RwLock<BTreeMap<String, Arc<GlyphTable>>>,
}

impl GlyphLibrary {
    /// Starts with an empty library
    pub fn empty() -> Self {
        Self {
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Starts with every bundled font
    pub fn bundled() -> Self {
        let library = Self::empty();
        let standard = bundled::spaced("standard", bundled::STANDARD, 1);
        let block = standard.restyled("block", '#', '█');
        library.register(standard);
        library.register(block);
        library.register(bundled::spaced("small", bundled::SMALL, 0));
        library
    }

    /// Adds a table, replacing any other table of the same name
    pub fn register(&self, table: GlyphTable) -> Arc<GlyphTable> {
        let name = normalize(table.name());
        let table = Arc::new(table);
        if self
            .tables
            .write()
            .insert(name.clone(), Arc::clone(&table))
            .is_some()
        {
            log::debug!("Replaced glyph table {name}");
        } else {
            log::debug!("Registered glyph table {name} ({} rows)", table.height());
        }
        table
    }

    /// Looks up a table, failing with a descriptive error when it is absent
    pub fn require(&self, name: &str) -> Result<Arc<GlyphTable>> {
        self.get_font(name)
            .ok_or_else(|| GlyphartError::ResourceNotFound(name.trim().to_string()))
    }

    /// Removes a table; reports whether it was there
    pub fn unregister(&self, name: &str) -> bool {
        self.tables.write().remove(&normalize(name)).is_some()
    }

    /// Returns the number of tables currently registered
    pub fn font_count(&self) -> usize {
        self.tables.read().len()
    }
}

impl GlyphSource for GlyphLibrary {
    fn get_font(&self, name: &str) -> Option<Arc<GlyphTable>> {
        self.tables.read().get(&normalize(name)).cloned()
    }

    fn font_names(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }
}

impl Default for GlyphLibrary {
    fn default() -> Self {
        Self::bundled()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_library() {
        let library = GlyphLibrary::empty();
        assert_eq!(library.font_count(), 0);
        assert!(library.get_font("standard").is_none());
    }

    #[test]
    fn test_bundled_fonts_are_listed() {
        let library = GlyphLibrary::bundled();
        assert_eq!(library.font_names(), vec!["block", "small", "standard"]);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let library = GlyphLibrary::bundled();
        let font = library.get_font("  Standard ").unwrap();
        assert_eq!(font.height(), 5);
    }

    #[test]
    fn test_block_shares_standard_shape() {
        let library = GlyphLibrary::bundled();
        let standard = library.get_font("standard").unwrap();
        let block = library.get_font("block").unwrap();
        assert_eq!(standard.glyph_width('W'), block.glyph_width('W'));
        assert!(block.glyph('A').unwrap()[0].contains('█'));
    }

    #[test]
    fn test_require_reports_missing_font() {
        let library = GlyphLibrary::bundled();
        assert!(matches!(
            library.require("gothic"),
            Err(GlyphartError::ResourceNotFound(name)) if name == "gothic"
        ));
    }

    #[test]
    fn test_register_replaces_by_name() {
        let library = GlyphLibrary::bundled();
        library.register(GlyphTable::from_rows("Standard", &[('H', &["#"])]));
        assert_eq!(library.font_count(), 3);
        assert_eq!(library.get_font("standard").unwrap().height(), 1);
        assert!(library.unregister("STANDARD"));
        assert!(!library.unregister("standard"));
    }
}
