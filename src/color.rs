//! Card colors: a stable value -> color assignment scoped to one dataset.

use crate::ColorPolicy;
use ratatui::style::Color;
use std::collections::HashMap;

/// Saturation and lightness of hash-derived card colors (pastel backgrounds).
const HASH_SATURATION: f64 = 0.60;
const HASH_LIGHTNESS: f64 = 0.85;

/// Value -> color mapping for the color-by column.
///
/// With [`ColorPolicy::Palette`] an unseen value takes the next palette entry
/// (wrapping after the last one) and keeps it until [`ColorAssignment::reset`].
/// With [`ColorPolicy::Hash`] the color is recomputed from the value on every
/// call and nothing is stored.
#[derive(Debug, Clone)]
pub struct ColorAssignment {
    policy: ColorPolicy,
    palette: Vec<Color>,
    assigned: HashMap<String, Color>,
    next: usize,
}

impl ColorAssignment {
    pub fn new(policy: ColorPolicy, palette: Vec<Color>) -> Self {
        Self {
            policy,
            palette,
            assigned: HashMap::new(),
            next: 0,
        }
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Color for `value`, assigning one on first encounter.
    pub fn color_of(&mut self, value: &str) -> Color {
        if self.policy == ColorPolicy::Hash || self.palette.is_empty() {
            return hash_color(value);
        }
        if let Some(color) = self.assigned.get(value) {
            return *color;
        }
        let color = self.palette[self.next % self.palette.len()];
        self.next += 1;
        self.assigned.insert(value.to_string(), color);
        color
    }

    /// Color already assigned to `value`, without assigning one.
    pub fn peek(&self, value: &str) -> Option<Color> {
        match self.policy {
            ColorPolicy::Hash => Some(hash_color(value)),
            ColorPolicy::Palette if self.palette.is_empty() => Some(hash_color(value)),
            ColorPolicy::Palette => self.assigned.get(value).copied(),
        }
    }

    /// Number of distinct values that have been given a palette color.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Forget every assignment. Only done when a new dataset replaces the old one.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.next = 0;
    }
}

/// Hue in degrees: each character contributes its leading UTF-16 code unit
/// (the high surrogate outside the BMP), summed modulo 360.
pub fn hue_of(value: &str) -> u16 {
    let sum: u64 = value
        .chars()
        .map(|c| c.encode_utf16(&mut [0u16; 2])[0] as u64)
        .sum();
    (sum % 360) as u16
}

/// Stateless pastel color derived from the value's hue.
pub fn hash_color(value: &str) -> Color {
    let (r, g, b) = hsl_to_rgb(hue_of(value) as f64, HASH_SATURATION, HASH_LIGHTNESS);
    Color::Rgb(r, g, b)
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r1), to_byte(g1), to_byte(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<Color> {
        vec![Color::Red, Color::Green, Color::Blue]
    }

    #[test]
    fn test_palette_first_seen_order() {
        let mut colors = ColorAssignment::new(ColorPolicy::Palette, palette());
        assert_eq!(colors.color_of("X"), Color::Red);
        assert_eq!(colors.color_of("Y"), Color::Green);
        assert_eq!(colors.color_of("X"), Color::Red);
        assert_eq!(colors.assigned_count(), 2);
    }

    #[test]
    fn test_palette_wraps() {
        let mut colors = ColorAssignment::new(ColorPolicy::Palette, palette());
        for v in ["a", "b", "c"] {
            colors.color_of(v);
        }
        assert_eq!(colors.color_of("d"), Color::Red);
        assert_eq!(colors.color_of("c"), Color::Blue);
    }

    #[test]
    fn test_distinct_up_to_palette_size() {
        let mut colors = ColorAssignment::new(ColorPolicy::Palette, palette());
        let assigned: Vec<Color> = ["p", "q", "r"].iter().map(|v| colors.color_of(v)).collect();
        for i in 0..assigned.len() {
            for j in (i + 1)..assigned.len() {
                assert_ne!(assigned[i], assigned[j]);
            }
        }
    }

    #[test]
    fn test_reset_starts_over() {
        let mut colors = ColorAssignment::new(ColorPolicy::Palette, palette());
        colors.color_of("X");
        colors.color_of("Y");
        colors.reset();
        assert_eq!(colors.peek("Y"), None);
        assert_eq!(colors.color_of("Y"), Color::Red);
    }

    #[test]
    fn test_peek_does_not_assign() {
        let mut colors = ColorAssignment::new(ColorPolicy::Palette, palette());
        assert_eq!(colors.peek("X"), None);
        assert_eq!(colors.assigned_count(), 0);
        colors.color_of("X");
        assert_eq!(colors.peek("X"), Some(Color::Red));
    }

    #[test]
    fn test_hash_policy_is_stateless() {
        let mut colors = ColorAssignment::new(ColorPolicy::Hash, palette());
        let first = colors.color_of("Oslo");
        colors.color_of("Bergen");
        assert_eq!(colors.color_of("Oslo"), first);
        assert_eq!(colors.assigned_count(), 0);
        assert_eq!(first, hash_color("Oslo"));
    }

    #[test]
    fn test_hash_collisions_are_possible() {
        assert_eq!(hue_of("ab"), hue_of("ba"));
        assert_eq!(hash_color("ab"), hash_color("ba"));
    }

    #[test]
    fn test_hue_of() {
        assert_eq!(hue_of(""), 0);
        assert_eq!(hue_of("A"), 65);
        assert!(hue_of("a much longer value with many characters") < 360);
        // U+1F600 counts as its high surrogate 0xD83D
        assert_eq!(hue_of("\u{1F600}"), (0xD83D % 360) as u16);
        assert_eq!(hue_of("é"), 0xE9);
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(hsl_to_rgb(0.0, 0.6, 0.85), (240, 194, 194));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
    }

    #[test]
    fn test_empty_palette_falls_back_to_hash() {
        let mut colors = ColorAssignment::new(ColorPolicy::Palette, Vec::new());
        assert_eq!(colors.color_of("x"), hash_color("x"));
    }
}
