use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::registry::CaseRegistry;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Named colours: registry string → Color32
// ---------------------------------------------------------------------------

/// Parse a CSS/SVG colour name (`"orange"`) or `#rrggbb`.
pub fn parse_color(name: &str) -> Option<Color32> {
    let name = name.trim();
    if name.starts_with('#') {
        return Color32::from_hex(name).ok();
    }
    palette::named::from_str(&name.to_ascii_lowercase())
        .map(|c: Srgb<u8>| Color32::from_rgb(c.red, c.green, c.blue))
}

/// Colour for a case: its configured name, or its palette slot when the name
/// is not recognised.
pub fn case_color(registry: &CaseRegistry, case_id: &str, name: &str) -> Color32 {
    parse_color(name).unwrap_or_else(|| {
        let slot = registry.position(case_id).unwrap_or(0);
        generate_palette(registry.len().max(1))
            .get(slot)
            .copied()
            .unwrap_or(Color32::GRAY)
    })
}
