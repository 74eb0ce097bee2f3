//! Large outlined clock with a dithered drop shadow.

use async_trait::async_trait;
use chrono::NaiveTime;

use crate::draw::{FillStyle, HAlign, MixMode, PaintEngine, Renderer, VAlign};

#[derive(Debug, Clone)]
pub struct ClockWidget {
    text: String,
    size: f64,
    shadow: i32,
    font_family: Option<String>,
}

impl ClockWidget {
    /// Shows `time` as `HH:MM`.
    pub fn new(time: NaiveTime) -> Self {
        Self::with_text(time.format("%H:%M").to_string())
    }

    /// Shows arbitrary text in the clock style.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 120.0,
            shadow: 8,
            font_family: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[async_trait]
impl Renderer for ClockWidget {
    fn name(&self) -> &str {
        "clock"
    }

    async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
        let (width, height) = (paint.width(), paint.height());
        paint
            .rect(0, 0, width, height)
            .fill(paint, FillStyle::Lightest, MixMode::Default);

        let mut text = paint
            .text(self.text.as_str())
            .at(width / 2, height / 2)
            .anchor(HAlign::Center, VAlign::Center)
            .size(self.size);
        if let Some(family) = &self.font_family {
            text = text.font_family(family);
        }

        // shadow, then a black/white double outline, then the dithered body
        text.translate(self.shadow, self.shadow)
            .render(paint, FillStyle::Dark, MixMode::Default)?
            .translate(-self.shadow, -self.shadow)
            .render_outline(paint, FillStyle::Black, 4, MixMode::Default)?
            .render_outline(paint, FillStyle::White, 2, MixMode::Default)?
            .render(paint, FillStyle::Medium, MixMode::Default)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawOutcome, Frame};
    use crate::draw::paint::tests::test_resources;
    use crate::util::Rect;

    #[test]
    fn formats_hours_and_minutes() {
        let clock = ClockWidget::new(NaiveTime::from_hms_opt(7, 5, 59).unwrap());
        assert_eq!(clock.text(), "07:05");
    }

    #[tokio::test]
    async fn paints_background_and_glyphs() {
        let mut frame = Frame::new(120, 60, test_resources());
        let clock = ClockWidget::with_text("12");
        let outcome = frame.draw(&clock, Rect::new(0, 0, 120, 60).unwrap()).await;
        assert_eq!(outcome, DrawOutcome::Rendered);
        // the 9x6 glyph block sits around the center; the outline ring is black
        let buffer = frame.buffer();
        assert_eq!(buffer.get(0, 0), Some(FillStyle::Lightest.pattern(0, 0)));
        assert_eq!(buffer.get(52, 30), Some(0));
    }
}
