use glyphart_core::{cache_key::CacheKey, request::TextRequest, GlyphTable};
use proptest::prelude::*;

use crate::text::compose_text;

/// Letters, digits, and a few characters whose case mappings are uneven
fn table() -> GlyphTable {
    let mut glyphs: Vec<(char, Vec<String>)> = ('A'..='Z')
        .chain('0'..='9')
        .map(|ch| (ch, vec![ch.to_string(), ch.to_ascii_lowercase().to_string()]))
        .collect();
    for ch in ['\u{212A}', '\u{1E9E}', '\u{130}', '\u{3A3}'] {
        glyphs.push((ch, vec![ch.to_string(), "~".to_string()]));
    }
    GlyphTable::new("mixed", glyphs)
}

// Property: two banners that share a cache key are drawn identically
proptest! {
    #[test]
    fn prop_equal_keys_draw_equal_art(
        a in "\\PC{0,12}",
        flips in prop::collection::vec(any::<bool>(), 12),
    ) {
        // Recase some characters so colliding keys actually turn up
        let b: String = a
            .chars()
            .zip(flips.iter().cycle())
            .flat_map(|(ch, lower)| {
                if *lower {
                    ch.to_lowercase().collect::<Vec<_>>()
                } else {
                    ch.to_uppercase().collect::<Vec<_>>()
                }
            })
            .collect();
        let key_a = CacheKey::for_text(&TextRequest::new(a.as_str()));
        let key_b = CacheKey::for_text(&TextRequest::new(b.as_str()));
        if key_a == key_b {
            let table = table();
            prop_assert_eq!(compose_text(&a, &table), compose_text(&b, &table));
        }
    }

    #[test]
    fn prop_case_variants_share_key_and_art(text in "[a-zA-Z\\u{212A}\\u{DF}\\u{1E9E} ]{0,12}") {
        let upper = text.to_uppercase();
        prop_assert_eq!(
            CacheKey::for_text(&TextRequest::new(text.as_str())),
            CacheKey::for_text(&TextRequest::new(upper.as_str()))
        );
        let table = table();
        prop_assert_eq!(compose_text(&text, &table), compose_text(&upper, &table));
    }
}
