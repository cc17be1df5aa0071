use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
// Color mapping: cause label → Color32
// ---------------------------------------------------------------------------

/// Assigns each cause of death a stable, distinct colour for the line
/// chart. Both sexes of a cause share its hue; the line style tells them
/// apart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the dataset's causes, in canonical order so
    /// the hues stay stable across filter changes.
    pub fn new<'a>(causes: impl Iterator<Item = &'a str>) -> Self {
        let causes: Vec<&str> = causes.collect();
        let palette = generate_palette(causes.len());
        let mapping: BTreeMap<String, Color32> = causes
            .into_iter()
            .zip(palette)
            .map(|(cause, color)| (cause.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a cause.
    pub fn color_for(&self, cause: &str) -> Color32 {
        self.mapping
            .get(cause)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn unknown_cause_falls_back_to_default() {
        let map = ColorMap::new(["Cancer", "Stroke"].into_iter());
        assert_ne!(map.color_for("Cancer"), map.color_for("Stroke"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
