//! Snowfall renderer.

use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::Canvas,
};
use snowfall_core::{Bounds, FlakeState};

use crate::color::flake_color;
use crate::flakes::Flakes;

/// Virtual pixels covered by one terminal cell horizontally.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Virtual pixels covered by one terminal cell vertically.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Pixel size of a terminal area of `width` x `height` cells, or `None` if
/// the area is empty.
pub fn viewport_size(width: u16, height: u16) -> Option<(f64, f64)> {
    if width == 0 || height == 0 {
        return None;
    }
    Some((
        f64::from(width) * CELL_WIDTH_PX,
        f64::from(height) * CELL_HEIGHT_PX,
    ))
}

/// Draws flake snapshots onto a terminal frame.
#[derive(Debug, Clone)]
pub struct SnowfallRenderer {
    /// Background colour filling the whole canvas.
    background: Color,
    /// Flake colour, pre-blended with the background.
    flake_color: Color,
    /// Glyph set used by the canvas.
    marker: Marker,
}

impl SnowfallRenderer {
    /// Create a renderer for the given background colour and marker.
    pub fn new(background: [u8; 3], marker: Marker) -> Self {
        let [r, g, b] = background;
        Self {
            background: Color::Rgb(r, g, b),
            flake_color: flake_color(background),
            marker,
        }
    }

    /// Clear `area` and paint every flake. `bounds` is the simulation's
    /// visible area and is stretched over the whole of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, flakes: &[FlakeState], bounds: Bounds) {
        let (width, height) = (bounds.width(), bounds.height());
        let shape = Flakes {
            flakes,
            height,
            color: self.flake_color,
        };

        let canvas = Canvas::default()
            .marker(self.marker)
            .background_color(self.background)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| ctx.draw(&shape));

        frame.render_widget(canvas, area);
    }

    pub fn background(&self) -> Color {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn draw(flakes: &[FlakeState], bounds: Bounds) -> Vec<(u16, u16, Color)> {
        let renderer = SnowfallRenderer::new([0, 0, 0], Marker::Braille);
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                renderer.render(frame, area, flakes, bounds);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut painted = Vec::new();
        for y in 0..5 {
            for x in 0..10 {
                let cell = &buffer[(x, y)];
                if cell.symbol() != " " {
                    painted.push((x, y, cell.fg));
                }
            }
        }
        painted
    }

    #[test]
    fn test_viewport_size() {
        assert_eq!(viewport_size(10, 5), Some((80.0, 80.0)));
        assert_eq!(viewport_size(0, 5), None);
        assert_eq!(viewport_size(10, 0), None);
    }

    #[test]
    fn test_empty_snapshot_paints_nothing() {
        let bounds = Bounds::new(80.0, 80.0).unwrap();
        assert!(draw(&[], bounds).is_empty());
    }

    #[test]
    fn test_single_flake_paints_one_cell() {
        let bounds = Bounds::new(80.0, 80.0).unwrap();
        let flake = FlakeState {
            x: 44.0,
            y: 40.0,
            size: 1,
        };
        let painted = draw(&[flake], bounds);
        assert_eq!(painted.len(), 1);
        assert_eq!(painted[0].2, Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_flakes_outside_bounds_are_skipped() {
        let bounds = Bounds::new(80.0, 80.0).unwrap();
        let flake = FlakeState {
            x: 200.0,
            y: 300.0,
            size: 3,
        };
        assert!(draw(&[flake], bounds).is_empty());
    }

    #[test]
    fn test_background_fills_area() {
        let renderer = SnowfallRenderer::new([5, 10, 20], Marker::Dot);
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        let bounds = Bounds::new(32.0, 32.0).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                renderer.render(frame, area, &[], bounds);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].bg, Color::Rgb(5, 10, 20));
        assert_eq!(buffer[(3, 1)].bg, Color::Rgb(5, 10, 20));
    }
}
