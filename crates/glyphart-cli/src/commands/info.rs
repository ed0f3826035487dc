//! Listings of what the bundled library offers

use glyphart::{
    fontdb::GlyphLibrary,
    traits::GlyphSource,
    types::CharRamp,
};

pub fn fonts() {
    let library = GlyphLibrary::bundled();
    println!("Fonts:");
    for name in library.font_names() {
        let rows = library.get_font(&name).map_or(0, |font| font.height());
        println!("  {name:<12} - {rows} rows");
    }
}

pub fn charsets() {
    println!("Character sets (densest first):");
    for ramp in CharRamp::ALL {
        println!("  {:<12} - \"{}\"", ramp.name(), ramp.chars().into_iter().collect::<String>());
    }
}
