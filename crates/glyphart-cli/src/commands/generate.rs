//! The text, image, and poem commands

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use glyphart::{
    events,
    request::{ImageRequest, PoemRequest, RasterSource, TextRequest},
    result::RenderResult,
    GenerationCoordinator,
};

use super::{CliError, Result};
use crate::cli::{ImageArgs, PoemArgs, TextArgs};

pub async fn text(coordinator: &GenerationCoordinator, args: TextArgs) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => read_stdin()?,
    };
    let request = TextRequest::new(text)
        .with_font(args.style.font)
        .with_color(args.style.color)
        .with_animation(args.style.animation);

    let result = coordinator.submit_text(request).await?;
    print_result(&result, args.json);
    Ok(())
}

pub async fn image(coordinator: &GenerationCoordinator, args: ImageArgs) -> Result<()> {
    let bytes = std::fs::read(&args.path).map_err(|source| CliError::Read {
        path: args.path.clone(),
        source,
    })?;
    let source = RasterSource::named(display_name(&args.path), bytes);
    let request = ImageRequest::new(source)
        .with_width(args.width)
        .with_char_set(args.char_set);

    let result = coordinator.submit_image(request).await?;
    print_result(&result, args.json);
    Ok(())
}

pub async fn poem(coordinator: &GenerationCoordinator, args: PoemArgs) -> Result<()> {
    let poem_text = match (args.text, &args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?,
        (None, None) => read_stdin()?,
    };
    let request = PoemRequest::new(poem_text)
        .with_keywords(args.keywords)
        .with_layout(args.layout)
        .with_decoration(args.decoration)
        .with_font(args.style.font)
        .with_color(args.style.color)
        .with_animation(args.style.animation);

    let result = coordinator.submit_poem(request).await?;
    print_result(&result, args.json);
    Ok(())
}

fn print_result(result: &Arc<RenderResult>, json: bool) {
    if json {
        let payload = events::complete_payload(result);
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(err) => log::warn!("Could not format result as JSON: {err}"),
        }
    } else {
        println!("{}", result.ascii_text);
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(CliError::Stdin)?;
    Ok(input)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
