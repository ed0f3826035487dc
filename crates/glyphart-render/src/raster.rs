//! Pictures turned into characters
//!
//! Decoding goes through the `image` crate; sampling is ours. The output grid
//! is `width` columns wide and half as tall as the aspect ratio suggests,
//! because terminal cells are roughly twice as tall as they are wide.

use glyphart_core::{
    error::RenderError,
    traits::CancelToken,
    types::{CharRamp, Raster},
};

/// Cells are about twice as tall as wide
const CELL_ASPECT: f64 = 0.5;

/// Most rows a single picture may produce
pub const MAX_OUTPUT_ROWS: u32 = 2000;

/// Decode PNG, JPEG, GIF, or BMP bytes into an RGBA raster
pub fn decode_raster(bytes: &[u8]) -> Result<Raster, RenderError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::trace!("Decoded {width}x{height} raster from {} bytes", bytes.len());
    Raster::from_rgba(width, height, rgba.into_raw())
}

/// Rows produced for a raster drawn `width` columns wide
pub fn output_rows(raster: &Raster, width: u32) -> u32 {
    let ratio = f64::from(raster.height()) / f64::from(raster.width());
    let rows = (f64::from(width) * ratio * CELL_ASPECT).floor();
    (rows as u32).max(1)
}

/// Draw a raster as `width` columns of ramp characters
///
/// Each output cell averages the block of source pixels it covers, takes the
/// plain mean of red, green, and blue as its luminance, and picks
/// `ramp[floor(luminance / 255 * (len - 1))]`. Alpha is ignored.
///
/// `cancel` is checked before every output row. Pictures so tall they would
/// need more than [`MAX_OUTPUT_ROWS`] rows are refused before any sampling.
pub fn map_raster(
    raster: &Raster,
    width: u32,
    ramp: CharRamp,
    cancel: &CancelToken,
) -> Result<String, RenderError> {
    if width == 0 {
        return Err(RenderError::InvalidDimensions {
            width,
            height: raster.height(),
        });
    }

    let glyphs = ramp.chars();
    let last = glyphs.len().saturating_sub(1);
    if glyphs.is_empty() {
        return Err(RenderError::Backend(format!("character set {} is empty", ramp.name())));
    }

    let rows = output_rows(raster, width);
    if rows > MAX_OUTPUT_ROWS {
        return Err(RenderError::OutputTooLarge {
            rows,
            max: MAX_OUTPUT_ROWS,
        });
    }
    let mut lines = Vec::with_capacity(rows as usize);

    for row in 0..rows {
        if cancel.is_cancelled() {
            log::debug!("Raster mapping cancelled at row {row} of {rows}");
            return Err(RenderError::Cancelled);
        }

        let (y0, y1) = span(row, rows, raster.height());
        let mut line = String::with_capacity(width as usize);
        for column in 0..width {
            let (x0, x1) = span(column, width, raster.width());
            let luminance = block_luminance(raster, x0..x1, y0..y1);
            let index = ((luminance / 255.0) * last as f64).floor() as usize;
            line.push(glyphs[index.min(last)]);
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Source pixels `[start, end)` covered by output cell `cell` of `cells`
fn span(cell: u32, cells: u32, source: u32) -> (u32, u32) {
    let start = (u64::from(cell) * u64::from(source) / u64::from(cells)) as u32;
    let end = (u64::from(cell + 1) * u64::from(source) / u64::from(cells)) as u32;
    let start = start.min(source - 1);
    (start, end.clamp(start + 1, source))
}

/// Mean of (r + g + b) / 3 over a pixel block
fn block_luminance(raster: &Raster, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> f64 {
    let mut sum = 0u64;
    let mut count = 0u64;
    for y in ys {
        for x in xs.clone() {
            let [r, g, b, _] = raster.pixel(x, y);
            sum += u64::from(r) + u64::from(g) + u64::from(b);
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    sum as f64 / (count * 3) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: u8) -> Raster {
        Raster::solid(width, height, [rgb, rgb, rgb, 255]).unwrap()
    }

    #[test]
    fn test_black_maps_to_densest_glyph() {
        let art = map_raster(&solid(40, 40, 0), 20, CharRamp::STANDARD, &CancelToken::new()).unwrap();
        assert!(art.chars().filter(|c| *c != '\n').all(|c| c == '@'));
    }

    #[test]
    fn test_white_maps_to_space() {
        let art = map_raster(&solid(40, 40, 255), 20, CharRamp::STANDARD, &CancelToken::new()).unwrap();
        assert!(art.chars().filter(|c| *c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_inverted_ramp_flips_ends() {
        let art = map_raster(&solid(10, 10, 0), 10, CharRamp::INVERTED, &CancelToken::new()).unwrap();
        assert!(art.chars().filter(|c| *c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_row_count_follows_aspect_ratio() {
        let art = map_raster(&solid(100, 50, 128), 80, CharRamp::SIMPLE, &CancelToken::new()).unwrap();
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|line| line.chars().count() == 80));
    }

    #[test]
    fn test_wide_raster_keeps_one_row() {
        let raster = solid(400, 2, 0);
        assert_eq!(output_rows(&raster, 10), 1);
    }

    #[test]
    fn test_extremely_tall_raster_is_refused() {
        let sliver = solid(1, 20_000, 0);
        assert!(matches!(
            map_raster(&sliver, 300, CharRamp::STANDARD, &CancelToken::new()),
            Err(RenderError::OutputTooLarge { rows: 3_000_000, max: MAX_OUTPUT_ROWS })
        ));

        let tallest = solid(1, 400, 0);
        assert_eq!(output_rows(&tallest, 10), MAX_OUTPUT_ROWS);
        let art = map_raster(&tallest, 10, CharRamp::STANDARD, &CancelToken::new()).unwrap();
        assert_eq!(art.lines().count(), 2000);
    }

    #[test]
    fn test_upsampling_small_raster() {
        // Left half black, right half white
        let mut pixels = Vec::new();
        for _ in 0..2 {
            pixels.extend_from_slice(&[0, 0, 0, 255, 255, 255, 255, 255]);
        }
        let raster = Raster::from_rgba(2, 2, pixels).unwrap();
        let art = map_raster(&raster, 10, CharRamp::SIMPLE, &CancelToken::new()).unwrap();
        assert_eq!(art, "#####     \n#####     \n#####     \n#####     \n#####     ");
    }

    #[test]
    fn test_mid_grey_lands_mid_ramp() {
        // 128 / 255 * 9 = 4.5, floored to index 4
        let art = map_raster(&solid(4, 8, 128), 4, CharRamp::STANDARD, &CancelToken::new()).unwrap();
        assert!(art.chars().filter(|c| *c != '\n').all(|c| c == '+'));
    }

    #[test]
    fn test_cancelled_token_stops_sampling() {
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            map_raster(&solid(10, 10, 0), 10, CharRamp::STANDARD, &cancel),
            Err(RenderError::Cancelled)
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_raster(b"definitely not a picture"),
            Err(RenderError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_png_round_trip() {
        let mut png = Vec::new();
        let buffer = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let raster = decode_raster(&png).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.pixel(2, 1), [255, 0, 0, 255]);
    }
}
