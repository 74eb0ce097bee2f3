//! Photo panel: an imported image, dithered and framed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::dither::{self, DitherOptions, ImageSource};
use crate::draw::{FillStyle, MixMode, PaintEngine, Renderer};

pub struct PhotoWidget {
    source: Arc<dyn ImageSource>,
    options: DitherOptions,
    border: i32,
}

impl PhotoWidget {
    pub fn new(source: Arc<dyn ImageSource>, options: DitherOptions) -> Self {
        Self {
            source,
            options,
            border: 2,
        }
    }

    pub fn border(mut self, border: i32) -> Self {
        self.border = border;
        self
    }
}

#[async_trait]
impl Renderer for PhotoWidget {
    fn name(&self) -> &str {
        "photo"
    }

    async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
        let (width, height) = (paint.width(), paint.height());
        let image = dither::import(self.source.as_ref(), width, height, self.options).await?;
        image.composite(paint, 0, 0, MixMode::Default);

        if self.border > 0 {
            paint
                .rect(0, 0, width, height)
                .round(self.options.corner_radius)
                .outline(paint, FillStyle::Black, self.border, MixMode::Default);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::MemoryImageSource;
    use crate::draw::paint::tests::test_resources;
    use crate::draw::{DrawOutcome, Frame};
    use crate::util::Rect;

    fn gray_png(size: i32) -> Vec<u8> {
        let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, size, size).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.5, 0.5, 0.5);
        ctx.paint().unwrap();
        drop(ctx);
        let mut png = Vec::new();
        surface.write_to_png(&mut png).unwrap();
        png
    }

    #[tokio::test]
    async fn photo_is_dithered_into_its_area() {
        let source = Arc::new(MemoryImageSource::new("gray", gray_png(16)));
        let widget = PhotoWidget::new(source, DitherOptions::default()).border(0);
        let mut frame = Frame::new(32, 16, test_resources());
        let outcome = frame.draw(&widget, Rect::new(16, 0, 16, 16).unwrap()).await;
        assert_eq!(outcome, DrawOutcome::Rendered);

        let buffer = frame.buffer();
        let inked = (0..16)
            .flat_map(|y| (16..32).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.get(x, y) == Some(0))
            .count();
        // mid gray dithers to roughly half ink
        assert!((96..=160).contains(&inked), "inked {inked}");
        assert_eq!(buffer.get(0, 0), Some(1));
    }

    #[tokio::test]
    async fn decode_failure_is_contained() {
        let source = Arc::new(MemoryImageSource::new("broken", b"nope".to_vec()));
        let widget = PhotoWidget::new(source, DitherOptions::default());
        let mut frame = Frame::new(32, 32, test_resources());
        let outcome = frame.draw(&widget, Rect::new(0, 0, 32, 32).unwrap()).await;
        match outcome {
            DrawOutcome::Contained(message) => assert!(message.contains("decode")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
