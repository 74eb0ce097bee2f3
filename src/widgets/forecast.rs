//! Multi-day forecast strip: rounded cards with icons, trend arrows and labels.

use async_trait::async_trait;

use crate::draw::{FillStyle, HAlign, MixMode, PaintEngine, PaintError, Renderer, VAlign};

#[rustfmt::skip]
const SUN: [&str; 12] = [
    ".....##.....",
    ".#...##...#.",
    "..#......#..",
    "....####....",
    "...######...",
    "##.######.##",
    "##.######.##",
    "...######...",
    "....####....",
    "..#......#..",
    ".#...##...#.",
    ".....##.....",
];

#[rustfmt::skip]
const CLOUD: [&str; 12] = [
    "............",
    "............",
    "....####....",
    "...######...",
    "..########..",
    ".##########.",
    "############",
    "############",
    ".##########.",
    "............",
    "............",
    "............",
];

#[rustfmt::skip]
const RAIN: [&str; 12] = [
    "....####....",
    "...######...",
    "..########..",
    ".##########.",
    "############",
    ".##########.",
    "............",
    "..#...#...#.",
    ".#...#...#..",
    "............",
    "...#...#....",
    "..#...#.....",
];

fn icon_bits(art: &[&str]) -> Vec<u8> {
    art.iter()
        .flat_map(|row| row.chars().map(|c| u8::from(c == '#')))
        .collect()
}

/// Sky condition shown as an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sky {
    Clear,
    Cloudy,
    Rain,
}

impl Sky {
    fn icon(self) -> Vec<u8> {
        match self {
            Sky::Clear => icon_bits(&SUN),
            Sky::Cloudy => icon_bits(&CLOUD),
            Sky::Rain => icon_bits(&RAIN),
        }
    }
}

/// Temperature direction compared to the previous day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Steady,
}

impl Trend {
    fn rotation(self) -> f64 {
        match self {
            Trend::Rising => 0.0,
            Trend::Falling => 180.0,
            Trend::Steady => 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayForecast {
    pub label: String,
    pub high: i32,
    pub low: i32,
    pub sky: Sky,
    pub trend: Trend,
}

/// One rounded card per day, laid out left to right.
#[derive(Debug, Clone)]
pub struct ForecastStrip {
    days: Vec<DayForecast>,
    radius: i32,
    shadow: i32,
}

impl ForecastStrip {
    pub fn new(days: Vec<DayForecast>) -> Self {
        Self {
            days,
            radius: 6,
            shadow: 3,
        }
    }

    /// Corner radius of each card; negative values notch the corners.
    pub fn radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// A fixed week of sample data.
    pub fn sample() -> Self {
        let days = [
            ("Mon", 14, 6, Sky::Clear, Trend::Rising),
            ("Tue", 16, 8, Sky::Cloudy, Trend::Rising),
            ("Wed", 11, 7, Sky::Rain, Trend::Falling),
            ("Thu", 11, 5, Sky::Cloudy, Trend::Steady),
            ("Fri", 13, 6, Sky::Clear, Trend::Rising),
        ];
        Self::new(
            days.into_iter()
                .map(|(label, high, low, sky, trend)| DayForecast {
                    label: label.to_string(),
                    high,
                    low,
                    sky,
                    trend,
                })
                .collect(),
        )
    }

    fn label(
        paint: &mut PaintEngine<'_>,
        text: &str,
        x: i32,
        y: i32,
        max_width: i32,
    ) -> Result<(), PaintError> {
        if paint.resources().bitmap_fonts.is_empty() {
            paint
                .text(text)
                .at(x, y)
                .anchor(HAlign::Center, VAlign::Top)
                .size(12.0)
                .render(paint, FillStyle::Black, MixMode::Default)?;
        } else {
            paint
                .bit_text(text)
                .at(x, y)
                .anchor(HAlign::Center, VAlign::Top)
                .max_width(max_width)
                .max_height(24)
                .render(paint, FillStyle::Black, MixMode::Default)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Renderer for ForecastStrip {
    fn name(&self) -> &str {
        "forecast"
    }

    async fn render(&self, paint: &mut PaintEngine<'_>) -> anyhow::Result<()> {
        if self.days.is_empty() {
            return Ok(());
        }
        let (width, height) = (paint.width(), paint.height());
        let column = width / self.days.len() as i32;
        let card_w = column - 8;
        let card_h = height - 8 - self.shadow;

        for (index, day) in self.days.iter().enumerate() {
            let left = index as i32 * column + 4;
            let center = left + card_w / 2;

            let card = paint.rect(left, 4, card_w, card_h).round(self.radius);
            card.translate(self.shadow, self.shadow)
                .fill(paint, FillStyle::Dark, MixMode::Default)
                .translate(-self.shadow, -self.shadow)
                .fill(paint, FillStyle::White, MixMode::Default)
                .outline(paint, FillStyle::Black, 2, MixMode::Default);

            Self::label(paint, &day.label, center, 10, card_w - 8)?;

            paint
                .icon(&day.sky.icon())
                .at(center, card_h / 2)
                .anchor(HAlign::Center, VAlign::Center)
                .fill(paint, FillStyle::Black, MixMode::Default);

            let temps = format!("{}/{}", day.high, day.low);
            Self::label(paint, &temps, center, card_h - 30, card_w - 8)?;

            paint
                .triangle(left + card_w - 14, card_h - 14, 8)
                .rotate(day.trend.rotation())
                .fill(paint, FillStyle::Black, MixMode::Default);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::bitmap_text::tests::box_fonts;
    use crate::draw::paint::tests::test_resources;
    use crate::draw::{DrawOutcome, Frame};
    use crate::util::Rect;

    #[test]
    fn icons_are_square() {
        for sky in [Sky::Clear, Sky::Cloudy, Sky::Rain] {
            assert_eq!(sky.icon().len(), 144);
        }
    }

    #[tokio::test]
    async fn cards_have_outline_and_shadow() {
        let mut frame = Frame::new(400, 120, test_resources());
        let outcome = frame
            .draw(&ForecastStrip::sample(), Rect::new(0, 0, 400, 120).unwrap())
            .await;
        assert_eq!(outcome, DrawOutcome::Rendered);
        let buffer = frame.buffer();
        // first card spans x 4..76, y 4..113; its outline sits on the left edge
        assert_eq!(buffer.get(4, 60), Some(0));
        assert_eq!(buffer.get(10, 60), Some(1));
        // rounded corner leaves the very corner pixel white
        assert_eq!(buffer.get(4, 4), Some(1));
        // shadow peeks out below the card
        let shadow_row = (4..76).filter(|&x| buffer.get(x, 115) == Some(0)).count();
        assert!(shadow_row > 0);
    }

    #[tokio::test]
    async fn bitmap_labels_are_used_when_fonts_are_loaded() {
        let resources = test_resources().with_bitmap_fonts(box_fonts());
        let mut frame = Frame::new(400, 120, resources);
        let outcome = frame
            .draw(&ForecastStrip::sample(), Rect::new(0, 0, 400, 120).unwrap())
            .await;
        assert_eq!(outcome, DrawOutcome::Rendered);
    }
}
