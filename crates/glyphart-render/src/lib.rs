// this_file: crates/glyphart-render/src/lib.rs

//! Rendering for Glyphart: glyph composition, raster mapping, and poems
//!
//! The algorithms live in plain functions ([`compose_text`], [`map_raster`],
//! [`compose_poem`]) so they can be called and tested without a runtime.
//! [`RenderEngine`] bundles them with a keyword memo, and [`EngineRenderer`]
//! puts the engine behind the async `Renderer` trait the coordinator uses.

pub mod decorate;
pub mod engine;
pub mod poem;
pub mod raster;
pub mod renderer;
pub mod text;

pub use decorate::{align_rows, decorate, frame, motif_line};
pub use engine::{ImageArt, RenderEngine};
pub use poem::{compose_poem, PoemArt};
pub use raster::{decode_raster, map_raster};
pub use renderer::EngineRenderer;
pub use text::{compose_block, compose_text};

#[cfg(test)]
mod proptests;
