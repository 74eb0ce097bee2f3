//! Decorative band built from layered pattern fills.

use async_trait::async_trait;

use crate::draw::{FillStyle, MixMode, PaintEngine, Renderer};

/// Checker fog with a soft inner panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct FogWidget {
    inset: i32,
}

impl FogWidget {
    pub fn new() -> Self {
        Self { inset: 5 }
    }

    pub fn inset(mut self, inset: i32) -> Self {
        self.inset = inset;
        self
    }
}

#[async_trait]
impl Renderer for FogWidget {
    fn name(&self) -> &str {
        "fog"
    }

    async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
        let (width, height) = (paint.width(), paint.height());
        paint
            .rect(0, 0, width, height)
            .fill(paint, FillStyle::Checker, MixMode::Default)
            .fill(paint, FillStyle::Medium, MixMode::Lighten)
            .inset(self.inset)
            .fill(paint, FillStyle::Lightest, MixMode::Default)
            .fill(paint, FillStyle::Checker, MixMode::Lighten)
            .fill(paint, FillStyle::Dark, MixMode::Lighten);
        Ok(())
    }
}
