//! Color utility functions for flake rendering.

use ratatui::style::Color;

/// Opacity of a flake over the background.
pub const FLAKE_OPACITY: f32 = 0.5;

const WHITE: [u8; 3] = [255, 255, 255];

/// Alpha-blend `fg` over `bg`. Terminals have no alpha, so the blend is
/// resolved up front.
pub fn blend(fg: [u8; 3], bg: [u8; 3], alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
    Color::Rgb(mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2]))
}

/// Flake fill: white at [`FLAKE_OPACITY`] over `background`.
pub fn flake_color(background: [u8; 3]) -> Color {
    blend(WHITE, background, FLAKE_OPACITY)
}
