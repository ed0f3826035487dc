//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use glyphart::request::{
    Decoration, Layout, DEFAULT_FONT, DEFAULT_IMAGE_WIDTH, MAX_IMAGE_WIDTH, MIN_IMAGE_WIDTH,
};

/// Glyphart - character art from text, images, and poems
#[derive(Parser, Debug)]
#[command(name = "glyphart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print every pipeline event to stderr as a JSON line
    #[arg(long, global = true)]
    pub events: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw banner text with a glyph font
    #[command(alias = "t")]
    Text(TextArgs),

    /// Turn a PNG, JPEG, GIF, or BMP picture into characters
    #[command(alias = "i")]
    Image(ImageArgs),

    /// Render a poem with its keywords drawn as glyph art
    #[command(alias = "p")]
    Poem(PoemArgs),

    /// List the available fonts
    Fonts,

    /// List the character sets used for images
    Charsets,
}

/// Options shared by text and poem rendering
#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    /// Font name
    #[arg(short = 'f', long, default_value = DEFAULT_FONT)]
    pub font: String,

    /// Color theme recorded with the result
    #[arg(short = 'c', long, default_value = "none")]
    pub color: String,

    /// Animation recorded with the result
    #[arg(short = 'a', long, default_value = "none")]
    pub animation: String,
}

/// Arguments for the text command
#[derive(Args, Debug)]
pub struct TextArgs {
    /// Text to draw (reads stdin if omitted)
    pub text: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Print the full result payload as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the image command
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Picture file
    pub path: PathBuf,

    /// Output width in characters
    #[arg(
        short = 'w',
        long,
        default_value_t = DEFAULT_IMAGE_WIDTH,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_IMAGE_WIDTH)..=i64::from(MAX_IMAGE_WIDTH))
    )]
    pub width: u32,

    /// Character set (see `glyphart charsets`)
    #[arg(short = 's', long = "char-set", default_value = "standard")]
    pub char_set: String,

    /// Print the full result payload as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the poem command
#[derive(Args, Debug)]
pub struct PoemArgs {
    /// Poem text (reads --file, then stdin, if omitted)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the poem from a file
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// Word to draw as glyph art; repeat for more
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Alignment: left, center, right
    #[arg(short = 'l', long, default_value = "left")]
    pub layout: Layout,

    /// Decoration: none, border, stars, waves, dots
    #[arg(short = 'd', long, default_value = "none")]
    pub decoration: Decoration,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Print the full result payload as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_poem_arguments_parse() {
        let cli = Cli::parse_from([
            "glyphart", "poem", "roses are red", "-k", "roses", "-k", "red", "--layout", "center",
            "--decoration", "stars",
        ]);
        let Commands::Poem(args) = cli.command else {
            panic!("expected the poem command");
        };
        assert_eq!(args.keywords, vec!["roses", "red"]);
        assert_eq!(args.layout, Layout::Center);
        assert_eq!(args.decoration, Decoration::Stars);
        assert_eq!(args.style.font, "standard");
    }

    #[test]
    fn test_image_width_is_range_checked() {
        assert!(Cli::try_parse_from(["glyphart", "image", "cat.png", "--width", "5"]).is_err());
        let cli = Cli::try_parse_from(["glyphart", "image", "cat.png"]).unwrap();
        let Commands::Image(args) = cli.command else {
            panic!("expected the image command");
        };
        assert_eq!(args.width, 80);
    }
}
