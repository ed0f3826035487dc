//! Glyphart - character art from text, images, and poems
//!
//! The [`GenerationCoordinator`] is the front door. It accepts one request at
//! a time, validates it, answers repeats from a bounded cache, renders the
//! rest under a timeout, and announces every outcome on a [`Notifier`].
//!
//! ```no_run
//! # async fn demo() -> glyphart::prelude::Result<()> {
//! use std::sync::Arc;
//! use glyphart::prelude::*;
//!
//! let bus = Arc::new(EventBus::new());
//! let _subscription = bus.subscribe(
//!     "text:gen:complete",
//!     Arc::new(|_event: &str, payload: &serde_json::Value| println!("{}", payload["ascii"])),
//! );
//!
//! let coordinator = GenerationCoordinator::builder().notifier(bus).build()?;
//! coordinator.submit_text(TextRequest::new("Hi").with_font("block")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Events are named `{kind}:gen:{phase}`; see [`events`] for the payloads.

pub mod coordinator;
pub mod events;
pub mod notifier;

pub use coordinator::{CoordinatorBuilder, GenerationCoordinator};
pub use notifier::EventBus;

pub use glyphart_core::{error, request, result, traits, types, CoordinatorConfig};
pub use glyphart_fontdb as fontdb;
pub use glyphart_input as input;
pub use glyphart_render as render;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{EventBus, GenerationCoordinator};
    pub use glyphart_core::{
        error::{GlyphartError, Result},
        request::{Decoration, GenerationRequest, ImageRequest, Layout, PoemRequest, RasterSource, TextRequest},
        result::RenderResult,
        traits::{Notifier, Subscription},
        types::{RequestKind, SessionState},
        CoordinatorConfig,
    };
}
