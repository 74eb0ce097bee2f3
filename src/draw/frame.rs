//! Frame compositor: runs renderers over one pixel buffer in strict order.

use std::panic::AssertUnwindSafe;
use std::path::Path;

use async_trait::async_trait;
use futures::FutureExt;

use super::buffer::PixelBuffer;
use super::error::PaintError;
use super::paint::{PaintEngine, PaintResources};
use super::pattern::{FillStyle, MixMode};
use super::render;
use crate::util::Rect;

/// A widget that paints into the sub-rectangle it is given.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Label used in logs and in the failure placeholder.
    fn name(&self) -> &str;

    async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()>;
}

/// How a single [`Frame::draw`] call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Rendered,
    /// The renderer failed; its area now shows the placeholder and message.
    Contained(String),
    /// The requested area does not overlap the frame.
    Skipped,
}

/// One render pass worth of pixels plus the resources shapes draw with.
pub struct Frame {
    buffer: PixelBuffer,
    resources: PaintResources,
}

impl Frame {
    /// Creates an all-white frame.
    pub fn new(width: usize, height: usize, resources: PaintResources) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height),
            resources,
        }
    }

    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn resources(&self) -> &PaintResources {
        &self.resources
    }

    fn bounds(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.buffer.width() as i32,
            height: self.buffer.height() as i32,
        }
    }

    /// Runs `renderer` against `area`, containing errors and panics.
    ///
    /// A failing renderer leaves a checker placeholder with its error text in
    /// its own area; the rest of the frame is unaffected.
    pub async fn draw(&mut self, renderer: &dyn Renderer, area: Rect) -> DrawOutcome {
        let Some(area) = area.intersect(&self.bounds()) else {
            log::warn!(
                "Renderer '{}' area {:?} lies outside the frame, skipping",
                renderer.name(),
                area
            );
            return DrawOutcome::Skipped;
        };

        let result = {
            let mut paint = PaintEngine::new(&mut self.buffer, area, self.resources.clone());
            AssertUnwindSafe(renderer.render(&mut paint))
                .catch_unwind()
                .await
        };

        let message = match result {
            Ok(Ok(())) => {
                log::debug!("Renderer '{}' finished in {:?}", renderer.name(), area);
                return DrawOutcome::Rendered;
            }
            Ok(Err(err)) => format!("{err:#}"),
            Err(panic) => panic_message(panic.as_ref()),
        };

        log::warn!("Renderer '{}' failed: {}", renderer.name(), message);
        let text = format!("{}: {}", renderer.name(), message);
        self.paint_placeholder(area, &text);
        DrawOutcome::Contained(message)
    }

    fn paint_placeholder(&mut self, area: Rect, message: &str) {
        let mut paint = PaintEngine::new(&mut self.buffer, area, self.resources.clone());
        let (width, height) = (paint.width(), paint.height());
        paint
            .rect(0, 0, width, height)
            .fill(&mut paint, FillStyle::Checker, MixMode::Default);

        let font_size = 12.0_f64.min(height as f64 * 0.5).max(6.0);
        let label = paint
            .text(message)
            .at(4, 4)
            .size(font_size)
            .max_width((width - 8).max(1));
        let drawn = label
            .use_rect(&mut paint, |rect, paint| {
                rect.inset(-2).fill(paint, FillStyle::White, MixMode::Default);
            })
            .and_then(|label| label.render(&mut paint, FillStyle::Black, MixMode::Default));
        if let Err(err) = drawn {
            log::error!("Failed to draw placeholder text: {}", err);
        }
    }

    /// Packs the frame for the wire.
    pub fn export_packed(&self) -> Vec<u8> {
        self.buffer.export_packed()
    }

    /// Writes a two-tone PNG preview of the frame.
    pub fn write_preview(&self, path: &Path) -> Result<(), PaintError> {
        render::write_preview(&self.buffer, path)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        format!("panicked: {text}")
    } else if let Some(text) = panic.downcast_ref::<String>() {
        format!("panicked: {text}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::paint::tests::test_resources;
    use anyhow::bail;

    struct Solid;
    struct Broken;
    struct Panicking;

    #[async_trait]
    impl Renderer for Solid {
        fn name(&self) -> &str {
            "solid"
        }

        async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
            let (w, h) = (paint.width(), paint.height());
            paint
                .rect(0, 0, w, h)
                .fill(paint, FillStyle::Black, MixMode::Default);
            Ok(())
        }
    }

    #[async_trait]
    impl Renderer for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
            paint.set_pixel(0, 0, 0, MixMode::Default);
            bail!("weather service unavailable")
        }
    }

    #[async_trait]
    impl Renderer for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn render(&self, _paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
            panic!("index out of range")
        }
    }

    fn checker_at(frame: &Frame, x: i32, y: i32) -> bool {
        frame.buffer().get(x, y) == Some(FillStyle::Checker.pattern(x, y))
    }

    #[tokio::test]
    async fn renderer_fills_only_its_area() {
        let mut frame = Frame::new(32, 16, test_resources());
        let outcome = frame.draw(&Solid, Rect::new(8, 0, 8, 8).unwrap()).await;
        assert_eq!(outcome, DrawOutcome::Rendered);
        assert_eq!(frame.buffer().get(8, 0), Some(0));
        assert_eq!(frame.buffer().get(15, 7), Some(0));
        assert_eq!(frame.buffer().get(16, 0), Some(1));
        assert_eq!(frame.buffer().get(8, 8), Some(1));
    }

    #[tokio::test]
    async fn error_is_contained_with_placeholder() {
        let mut frame = Frame::new(64, 64, test_resources());
        frame.draw(&Solid, Rect::new(0, 0, 32, 64).unwrap()).await;
        let outcome = frame.draw(&Broken, Rect::new(32, 0, 32, 64).unwrap()).await;

        match outcome {
            DrawOutcome::Contained(message) => assert!(message.contains("unavailable")),
            other => panic!("unexpected outcome {other:?}"),
        }
        // sibling untouched, failing area shows the checker below the label
        assert_eq!(frame.buffer().get(10, 40), Some(0));
        assert!(checker_at(&frame, 40, 60));
        assert!(checker_at(&frame, 63, 50));
    }

    #[tokio::test]
    async fn panic_is_contained() {
        let mut frame = Frame::new(32, 32, test_resources());
        let outcome = frame.draw(&Panicking, Rect::new(0, 0, 32, 32).unwrap()).await;
        assert_eq!(
            outcome,
            DrawOutcome::Contained("panicked: index out of range".to_string())
        );
        assert!(checker_at(&frame, 30, 30));
    }

    #[tokio::test]
    async fn later_draws_composite_over_earlier_ones() {
        let mut frame = Frame::new(16, 16, test_resources());
        frame.draw(&Solid, Rect::new(0, 0, 16, 16).unwrap()).await;
        frame.draw(&Broken, Rect::new(4, 0, 4, 4).unwrap()).await;
        // the white checker block at (4..8, 0..4) replaces the solid fill
        assert_eq!(frame.buffer().get(4, 0), Some(1));
        assert_eq!(frame.buffer().get(3, 0), Some(0));
        assert_eq!(frame.buffer().get(8, 8), Some(0));
    }

    #[tokio::test]
    async fn out_of_frame_area_is_skipped() {
        let mut frame = Frame::new(16, 16, test_resources());
        let outcome = frame.draw(&Solid, Rect::new(20, 20, 4, 4).unwrap()).await;
        assert_eq!(outcome, DrawOutcome::Skipped);
        assert_eq!(frame.export_packed(), vec![0xFF; 32]);
    }
}
