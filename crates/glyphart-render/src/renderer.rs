//! The engine behind the async `Renderer` seam

use std::sync::Arc;

use glyphart_core::{
    error::{RenderError, Result},
    traits::{CancelToken, RenderFuture, RenderJob, RenderOutput, Renderer},
};

use crate::engine::RenderEngine;

/// Renders jobs with a [`RenderEngine`]
///
/// Text and poem jobs are cheap and run on the calling task. Image jobs
/// decode and sample on tokio's blocking pool, so a runtime must be present.
#[derive(Clone, Default)]
pub struct EngineRenderer {
    engine: Arc<RenderEngine>,
}

impl EngineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: Arc<RenderEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<RenderEngine> {
        &self.engine
    }

    async fn render_job(&self, job: RenderJob, cancel: CancelToken) -> Result<RenderOutput> {
        match job {
            RenderJob::Text { text, font } => {
                Ok(RenderOutput::text(self.engine.render_text(&text, &font)))
            },
            RenderJob::Poem { request, font } => {
                let art = self.engine.render_poem(&request, &font);
                Ok(RenderOutput {
                    ascii: art.ascii,
                    source_dimensions: None,
                    highlighted: art.highlighted,
                })
            },
            RenderJob::Image {
                source,
                width,
                ramp,
            } => {
                let engine = Arc::clone(&self.engine);
                let art = tokio::task::spawn_blocking(move || {
                    engine.render_image(&source.bytes, width, ramp, &cancel)
                })
                .await
                .map_err(|e| RenderError::Backend(format!("raster worker stopped: {e}")))??;
                Ok(RenderOutput {
                    ascii: art.ascii,
                    source_dimensions: Some((art.source_width, art.source_height)),
                    highlighted: 0,
                })
            },
        }
    }
}

impl Renderer for EngineRenderer {
    fn name(&self) -> &'static str {
        "engine"
    }

    fn render(&self, job: RenderJob, cancel: CancelToken) -> RenderFuture<'_> {
        Box::pin(self.render_job(job, cancel))
    }

    fn clear_cache(&self) {
        self.engine.clear_memo();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphart_core::{request::RasterSource, types::CharRamp, GlyphTable, GlyphartError};

    fn encode_png(width: u32, height: u32, luma: u8) -> Vec<u8> {
        let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([luma, luma, luma, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_text_job() {
        let font = Arc::new(GlyphTable::from_rows("hash", &[('H', &["#"]), ('I', &["#"])]));
        let output = EngineRenderer::new()
            .render(
                RenderJob::Text {
                    text: "hi".into(),
                    font,
                },
                CancelToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(output.ascii, "##");
        assert_eq!(output.source_dimensions, None);
    }

    #[tokio::test]
    async fn test_image_job_reports_source_size() {
        let job = RenderJob::Image {
            source: RasterSource::new(encode_png(20, 10, 0)),
            width: 10,
            ramp: CharRamp::STANDARD,
        };
        let output = EngineRenderer::new().render(job, CancelToken::new()).await.unwrap();
        assert_eq!(output.source_dimensions, Some((20, 10)));
        assert_eq!(output.ascii, "@@@@@@@@@@\n@@@@@@@@@@");
    }

    #[tokio::test]
    async fn test_cancelled_image_job_fails() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let job = RenderJob::Image {
            source: RasterSource::new(encode_png(8, 8, 255)),
            width: 10,
            ramp: CharRamp::STANDARD,
        };
        let result = EngineRenderer::new().render(job, cancel).await;
        assert!(matches!(
            result,
            Err(GlyphartError::RenderFailed(RenderError::Cancelled))
        ));
    }
}
