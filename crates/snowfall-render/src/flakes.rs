//! Canvas shape for a flake snapshot.

use ratatui::{
    style::Color,
    widgets::canvas::{Painter, Shape},
};
use snowfall_core::FlakeState;

/// A set of flakes drawn as filled squares.
///
/// Flake coordinates grow downwards from the top-left corner; the canvas
/// grows upwards, so `height` is used to flip the y axis.
#[derive(Debug, Clone)]
pub struct Flakes<'a> {
    pub flakes: &'a [FlakeState],
    pub height: f64,
    pub color: Color,
}

impl Shape for Flakes<'_> {
    fn draw(&self, painter: &mut Painter) {
        for flake in self.flakes {
            for dx in 0..flake.size {
                for dy in 0..flake.size {
                    let x = flake.x + f64::from(dx);
                    let y = self.height - (flake.y + f64::from(dy));
                    if let Some((px, py)) = painter.get_point(x, y) {
                        painter.paint(px, py, self.color);
                    }
                }
            }
        }
    }
}
