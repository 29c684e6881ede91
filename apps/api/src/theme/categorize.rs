//! Perceptual color categorization — buckets scanned colors into text,
//! background, and accent pools.
//!
//! The thresholds are a heuristic, not ground truth: dark or strongly
//! saturated mid-dark colors read as foreground ink, very light or
//! near-gray colors read as page background, the rest are accents.
//! Misclassifications are absorbed by the harmonizer's contrast passes,
//! so no further rules belong here.

use std::collections::BTreeSet;

use crate::theme::color::{Color, Hsl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    Text,
    Background,
    Accent,
}

pub fn categorize(color: Color) -> ColorCategory {
    let Hsl { s, l, .. } = color.to_hsl();
    if l < 30.0 || (l < 50.0 && s > 70.0) {
        ColorCategory::Text
    } else if l > 85.0 || s < 10.0 {
        ColorCategory::Background
    } else {
        ColorCategory::Accent
    }
}

/// The three categorized pools plus the full candidate set. Built once per
/// document and read-only afterward; the harmonizer never mutates pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPools {
    pub text: Vec<Color>,
    pub background: Vec<Color>,
    pub accent: Vec<Color>,
    /// Union of the pools, deduplicated and sorted.
    pub all: Vec<Color>,
}

impl ColorPools {
    /// Buckets an already deduplicated, sorted candidate set. Pool order
    /// follows the input order, so pools stay sorted too.
    pub fn from_scanned(all: Vec<Color>) -> Self {
        let mut text = Vec::new();
        let mut background = Vec::new();
        let mut accent = Vec::new();

        for &color in &all {
            match categorize(color) {
                ColorCategory::Text => text.push(color),
                ColorCategory::Background => background.push(color),
                ColorCategory::Accent => accent.push(color),
            }
        }

        Self {
            text,
            background,
            accent,
            all,
        }
    }

    /// Builds pools from pre-assigned buckets, deriving `all` as the
    /// deduplicated sorted union. Used by fallback synthesis, which assigns
    /// buckets positionally rather than by threshold.
    pub fn from_parts(text: Vec<Color>, background: Vec<Color>, accent: Vec<Color>) -> Self {
        let union: BTreeSet<Color> = text
            .iter()
            .chain(background.iter())
            .chain(accent.iter())
            .copied()
            .collect();

        Self {
            text,
            background,
            accent,
            all: union.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> Color {
        Color::parse(hex).unwrap()
    }

    #[test]
    fn test_dark_colors_are_text() {
        assert_eq!(categorize(color("#000000")), ColorCategory::Text);
        assert_eq!(categorize(color("#1a1a2e")), ColorCategory::Text);
    }

    #[test]
    fn test_saturated_mid_dark_colors_are_text() {
        // l ≈ 33 with full saturation: reads as ink despite not being dark
        assert_eq!(categorize(color("#00a99d")), ColorCategory::Text);
    }

    #[test]
    fn test_light_colors_are_background() {
        assert_eq!(categorize(color("#ffffff")), ColorCategory::Background);
        assert_eq!(categorize(color("#f5f5f5")), ColorCategory::Background);
    }

    #[test]
    fn test_near_gray_colors_are_background() {
        // s = 0 at mid lightness: gray page furniture, not ink or accent
        assert_eq!(categorize(color("#808080")), ColorCategory::Background);
        assert_eq!(categorize(color("#4d4d4d")), ColorCategory::Background);
    }

    #[test]
    fn test_mid_tones_are_accent() {
        assert_eq!(categorize(color("#3a6ea5")), ColorCategory::Accent);
        // s ≈ 70.5 but l ≈ 53.5 misses the text rule's l < 50
        assert_eq!(categorize(color("#dc3545")), ColorCategory::Accent);
    }

    #[test]
    fn test_from_scanned_preserves_input_order_per_pool() {
        let pools = ColorPools::from_scanned(vec![
            color("#000000"),
            color("#3a6ea5"),
            color("#ffffff"),
        ]);
        assert_eq!(pools.text, vec![color("#000000")]);
        assert_eq!(pools.accent, vec![color("#3a6ea5")]);
        assert_eq!(pools.background, vec![color("#ffffff")]);
        assert_eq!(pools.all.len(), 3);
    }

    #[test]
    fn test_from_scanned_empty_input_yields_empty_pools() {
        let pools = ColorPools::from_scanned(Vec::new());
        assert!(pools.text.is_empty());
        assert!(pools.background.is_empty());
        assert!(pools.accent.is_empty());
        assert!(pools.all.is_empty());
    }

    #[test]
    fn test_from_parts_derives_sorted_deduplicated_union() {
        let pools = ColorPools::from_parts(
            vec![color("#000000")],
            vec![color("#ffffff"), color("#000000")],
            vec![color("#3a6ea5")],
        );
        assert_eq!(
            pools.all,
            vec![color("#000000"), color("#3a6ea5"), color("#ffffff")]
        );
        // Pools themselves keep their given contents
        assert_eq!(pools.background.len(), 2);
    }
}
