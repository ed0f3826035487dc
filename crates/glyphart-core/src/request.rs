//! The three kinds of work the pipeline accepts
//!
//! Requests are plain data. Defaults exist only where they are part of a
//! kind's contract (font, color, animation, width, character set, layout,
//! decoration); everything else must be supplied and is validated at the
//! coordinator boundary.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::RequestKind;

/// Font used when a request does not name one
pub const DEFAULT_FONT: &str = "standard";

/// Presentation colors a result may carry
pub const SUPPORTED_COLORS: &[&str] = &[
    "none", "rainbow", "fire", "ocean", "forest", "neon", "gold", "matrix",
];

/// Presentation animations a result may carry
pub const SUPPORTED_ANIMATIONS: &[&str] = &[
    "none", "typewriter", "fade", "glow", "bounce", "pulse", "wave",
];

/// Column count used when an image request does not give one
pub const DEFAULT_IMAGE_WIDTH: u32 = 80;
pub const MIN_IMAGE_WIDTH: u32 = 10;
pub const MAX_IMAGE_WIDTH: u32 = 300;

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_none() -> String {
    "none".to_string()
}

/// Banner text drawn with a glyph table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest {
    pub text: String,
    #[serde(default = "default_font")]
    pub font_name: String,
    #[serde(default = "default_none")]
    pub color: String,
    #[serde(default = "default_none")]
    pub animation: String,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: default_font(),
            color: default_none(),
            animation: default_none(),
        }
    }

    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }
}

/// Encoded image bytes plus an optional label for logs and echoes
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSource {
    pub name: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl RasterSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: None,
            bytes: bytes.into(),
        }
    }

    pub fn named(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: Some(name.into()),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image bytes are never worth printing
impl fmt::Debug for RasterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSource")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// An image to be mapped onto a character ramp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub source: RasterSource,
    /// Output width in characters
    pub width: u32,
    /// Name of a bundled character ramp
    pub char_set: String,
}

impl ImageRequest {
    pub fn new(source: RasterSource) -> Self {
        Self {
            source,
            width: DEFAULT_IMAGE_WIDTH,
            char_set: "standard".to_string(),
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_char_set(mut self, char_set: impl Into<String>) -> Self {
        self.char_set = char_set.into();
        self
    }
}

/// Horizontal alignment of a composed poem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Left,
    Center,
    Right,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Left, Layout::Center, Layout::Right];

    pub const fn as_str(self) -> &'static str {
        match self {
            Layout::Left => "left",
            Layout::Center => "center",
            Layout::Right => "right",
        }
    }
}

impl FromStr for Layout {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnsupportedOption {
                field: "layout",
                value: s.to_string(),
            })
    }
}

/// Frame or motif drawn around a composed poem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    #[default]
    None,
    Border,
    Stars,
    Waves,
    Dots,
}

impl Decoration {
    pub const ALL: [Decoration; 5] = [
        Decoration::None,
        Decoration::Border,
        Decoration::Stars,
        Decoration::Waves,
        Decoration::Dots,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Decoration::None => "none",
            Decoration::Border => "border",
            Decoration::Stars => "stars",
            Decoration::Waves => "waves",
            Decoration::Dots => "dots",
        }
    }
}

impl FromStr for Decoration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decoration::ALL
            .into_iter()
            .find(|decoration| decoration.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnsupportedOption {
                field: "decoration",
                value: s.to_string(),
            })
    }
}

/// A poem whose keywords get drawn as glyph art
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemRequest {
    pub poem_text: String,
    #[serde(default = "default_font")]
    pub font_name: String,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub decoration: Decoration,
    #[serde(default = "default_none")]
    pub color: String,
    #[serde(default = "default_none")]
    pub animation: String,
}

impl PoemRequest {
    pub fn new(poem_text: impl Into<String>) -> Self {
        Self {
            poem_text: poem_text.into(),
            font_name: default_font(),
            keywords: BTreeSet::new(),
            layout: Layout::default(),
            decoration: Decoration::default(),
            color: default_none(),
            animation: default_none(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }
}

/// Lowercased word characters of a token
///
/// Keywords are stored in this form and poem tokens are compared in it, so
/// "Knight," in a poem matches the keyword "knight".
pub fn keyword_stem(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Any request the coordinator accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Text(TextRequest),
    Image(ImageRequest),
    Poem(PoemRequest),
}

impl GenerationRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            GenerationRequest::Text(_) => RequestKind::Text,
            GenerationRequest::Image(_) => RequestKind::Image,
            GenerationRequest::Poem(_) => RequestKind::Poem,
        }
    }
}

impl From<TextRequest> for GenerationRequest {
    fn from(request: TextRequest) -> Self {
        GenerationRequest::Text(request)
    }
}

impl From<ImageRequest> for GenerationRequest {
    fn from(request: ImageRequest) -> Self {
        GenerationRequest::Image(request)
    }
}

impl From<PoemRequest> for GenerationRequest {
    fn from(request: PoemRequest) -> Self {
        GenerationRequest::Poem(request)
    }
}
