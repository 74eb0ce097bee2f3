//! Demo widgets and the dashboard layout used by the CLI.
//!
//! Widgets take plain values; fetching weather, calendars or photos is left
//! to whoever builds them.

pub mod clock;
pub mod fog;
pub mod forecast;
pub mod photo;

pub use clock::ClockWidget;
pub use fog::FogWidget;
pub use forecast::{DayForecast, ForecastStrip, Sky, Trend};
pub use photo::PhotoWidget;

use crate::draw::{DrawOutcome, Frame, Renderer};
use crate::util::Rect;

/// A renderer and the frame area it owns.
pub struct Placement {
    pub renderer: Box<dyn Renderer>,
    pub area: Rect,
}

impl Placement {
    pub fn new(renderer: impl Renderer + 'static, area: Rect) -> Self {
        Self {
            renderer: Box::new(renderer),
            area,
        }
    }
}

/// Splits a `width × height` frame into the demo dashboard: a fog band on
/// top, the clock beside an optional photo, and the forecast strip below.
pub fn dashboard(
    width: i32,
    height: i32,
    clock: ClockWidget,
    photo: Option<PhotoWidget>,
    forecast: ForecastStrip,
) -> Vec<Placement> {
    let band = (height / 12).max(8);
    let middle = height * 5 / 10;
    let photo_width = width * 2 / 5;

    let mut placements = vec![Placement::new(FogWidget::new(), rect(0, 0, width, band))];
    match photo {
        Some(photo) => {
            placements.push(Placement::new(
                clock,
                rect(0, band, width - photo_width, middle),
            ));
            placements.push(Placement::new(
                photo,
                rect(width - photo_width, band, photo_width, middle),
            ));
        }
        None => placements.push(Placement::new(clock, rect(0, band, width, middle))),
    }
    placements.push(Placement::new(
        forecast,
        rect(0, band + middle, width, height - band - middle),
    ));
    placements
}

fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
    Rect {
        x,
        y,
        width: width.max(1),
        height: height.max(1),
    }
}

/// Draws every placement in order and reports how each one ended.
pub async fn render_all(frame: &mut Frame, placements: &[Placement]) -> Vec<DrawOutcome> {
    let mut outcomes = Vec::with_capacity(placements.len());
    for placement in placements {
        outcomes.push(frame.draw(placement.renderer.as_ref(), placement.area).await);
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::paint::tests::test_resources;

    #[test]
    fn dashboard_tiles_the_frame_without_overlap() {
        let placements = dashboard(
            800,
            480,
            ClockWidget::with_text("12:00"),
            None,
            ForecastStrip::sample(),
        );
        let covered: i64 = placements.iter().map(|p| p.area.area()).sum();
        assert_eq!(covered, 800 * 480);
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                assert!(a.area.intersect(&b.area).is_none());
            }
        }
    }

    #[tokio::test]
    async fn render_all_runs_in_order() {
        let mut frame = Frame::new(200, 120, test_resources());
        let placements = dashboard(
            200,
            120,
            ClockWidget::with_text("1"),
            None,
            ForecastStrip::sample(),
        );
        let outcomes = render_all(&mut frame, &placements).await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| *o == DrawOutcome::Rendered));
    }
}
