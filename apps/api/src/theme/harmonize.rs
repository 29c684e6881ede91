//! Palette harmonization — the core algorithm. Selects role colors from the
//! categorized pools, enforces hue separation and lightness conventions,
//! runs bounded contrast-correction loops, and guarantees the success role
//! stays distinguishable from primary.
//!
//! One construction pass per document, no state across calls, never fails:
//! every input produces a complete palette. Contrast targets are
//! best-effort — the loop is capped and callers must not assume a target
//! ratio was reached.

use serde_json::Value;
use tracing::{debug, warn};

use crate::theme::analyzer::AnalyzerError;
use crate::theme::categorize::ColorPools;
use crate::theme::color::{contrast_ratio, hue_distance, Color, Hsl};
use crate::theme::palette::{RoleKey, ThemePalette};

// ────────────────────────────────────────────────────────────────────────────
// Tuning constants
// ────────────────────────────────────────────────────────────────────────────

/// Iteration cap for the contrast-correction loop. Convergence within 10
/// steps is not guaranteed for extreme inputs; the best candidate seen is
/// returned regardless.
pub const MAX_CONTRAST_ADJUST_STEPS: u32 = 10;

const LIGHTNESS_STEP: f64 = 5.0;
const SATURATION_BOOST: f64 = 10.0;

/// WCAG AAA for body text, AA for secondary text and colored roles.
const TEXT_CONTRAST_TARGET: f64 = 7.0;
const SECONDARY_TEXT_CONTRAST_TARGET: f64 = 4.5;
const ROLE_CONTRAST_TARGET: f64 = 4.5;

const MIN_HUE_SEPARATION: f64 = 30.0;
const MIN_SUCCESS_PRIMARY_CONTRAST: f64 = 1.5;

/// 20 steps of 5 span the whole lightness range, so the separation walk can
/// always reach pure black or white.
const MAX_SEPARATION_STEPS: u32 = 20;

const DEFAULT_PRIMARY: Color = Color::new(0x3a, 0x6e, 0xa5);
const DEFAULT_BACKGROUND: Color = Color::new(0xff, 0xff, 0xff);
const TEXT_SEED: Color = Color::new(0x00, 0x00, 0x00);
const TEXT_SECONDARY_SEED: Color = Color::new(0x66, 0x66, 0x66);
const SUCCESS_SEED: Color = Color::new(0x28, 0xa7, 0x45);
const WARNING_SEED: Color = Color::new(0xff, 0xc1, 0x07);
const ERROR_SEED: Color = Color::new(0xdc, 0x35, 0x45);
const INFO_SEED: Color = Color::new(0x17, 0xa2, 0xb8);
const DROPDOWN_FALLBACK: Color = Color::new(0x33, 0x33, 0x33);

const WHITE: Color = Color::new(0xff, 0xff, 0xff);
const BLACK: Color = Color::new(0x00, 0x00, 0x00);

// ────────────────────────────────────────────────────────────────────────────
// Local harmonization
// ────────────────────────────────────────────────────────────────────────────

/// Builds a complete palette from categorized pools.
pub fn harmonize(pools: &ColorPools) -> ThemePalette {
    // Role selection. Primary leans on ink colors, secondary and accent on
    // brand accents, with positional fallbacks into the full candidate set
    // and literal defaults for documents that yielded nothing usable.
    let primary = clamp_primary_lightness(
        pools
            .text
            .first()
            .or_else(|| pools.all.first())
            .copied()
            .unwrap_or(DEFAULT_PRIMARY),
    );

    let secondary_seed = pools
        .accent
        .first()
        .or_else(|| pools.all.get(1))
        .copied()
        .unwrap_or_else(|| rotate_hue(primary, 180.0));
    let secondary = enforce_hue_separation(secondary_seed, primary);

    let accent = pools
        .accent
        .get(1)
        .or_else(|| pools.all.get(2))
        .copied()
        .unwrap_or_else(|| rotate_hue(primary, 120.0));

    let background = pools
        .background
        .first()
        .copied()
        .unwrap_or(DEFAULT_BACKGROUND);

    // Text derivation, then a contrast pass over every colored role.
    let text = correct_contrast(TEXT_SEED, background, TEXT_CONTRAST_TARGET);
    let text_secondary = correct_contrast(
        TEXT_SECONDARY_SEED,
        background,
        SECONDARY_TEXT_CONTRAST_TARGET,
    );

    let primary = correct_contrast(primary, background, ROLE_CONTRAST_TARGET);
    let secondary = correct_contrast(secondary, background, ROLE_CONTRAST_TARGET);
    let accent = correct_contrast(accent, background, ROLE_CONTRAST_TARGET);

    let border = derive_border(primary);

    let success = correct_contrast(SUCCESS_SEED, background, ROLE_CONTRAST_TARGET);
    let warning = correct_contrast(WARNING_SEED, background, ROLE_CONTRAST_TARGET);
    let error = correct_contrast(ERROR_SEED, background, ROLE_CONTRAST_TARGET);
    let info = correct_contrast(INFO_SEED, background, ROLE_CONTRAST_TARGET);
    let success = ensure_success_distinct(success, primary, background);

    ThemePalette {
        primary,
        secondary,
        accent,
        background,
        text,
        text_secondary,
        border,
        success,
        warning,
        error,
        info,
        all_colors: pools.all.clone(),
        dropdown_background: dropdown_background(&pools.all),
    }
}

/// Primaries outside l ∈ [20, 80] are reassigned to 30 (too dark) or 70
/// (too light) rather than clamped to the boundary.
fn clamp_primary_lightness(color: Color) -> Color {
    let hsl = color.to_hsl();
    if hsl.l < 20.0 {
        hsl.with_lightness(30.0).to_color()
    } else if hsl.l > 80.0 {
        hsl.with_lightness(70.0).to_color()
    } else {
        color
    }
}

fn rotate_hue(color: Color, degrees: f64) -> Color {
    let hsl = color.to_hsl();
    hsl.with_hue(hsl.h + degrees).to_color()
}

/// Anti-similarity guarantee: a secondary within 30° of primary's hue is
/// forced onto the complement.
fn enforce_hue_separation(secondary: Color, primary: Color) -> Color {
    let primary_hue = primary.to_hsl().h;
    let secondary_hsl = secondary.to_hsl();
    if hue_distance(secondary_hsl.h, primary_hue) < MIN_HUE_SEPARATION {
        debug!(
            "secondary hue {:.0}° too close to primary {:.0}°, forcing complement",
            secondary_hsl.h, primary_hue
        );
        secondary_hsl.with_hue(primary_hue + 180.0).to_color()
    } else {
        secondary
    }
}

/// Border is a washed-out primary: saturation down 30 (floor 0), lightness
/// up 30 (capped at 95 so it never disappears into a white page).
fn derive_border(primary: Color) -> Color {
    let hsl = primary.to_hsl();
    Hsl::new(hsl.h, (hsl.s - 30.0).max(0.0), (hsl.l + 30.0).min(95.0)).to_color()
}

fn dropdown_background(all: &[Color]) -> Color {
    all.get(2).copied().unwrap_or(DROPDOWN_FALLBACK)
}

// ────────────────────────────────────────────────────────────────────────────
// Contrast-correction loop
// ────────────────────────────────────────────────────────────────────────────

/// Steps `color` toward `target_ratio` against `background`: lightness
/// moves 5 per step in the direction fixed once by the background's
/// perceived brightness, switching to saturation boosts once lightness
/// saturates at its boundary. Never fails — after the iteration cap the
/// best candidate seen is returned even when the target was not reached.
pub fn correct_contrast(color: Color, background: Color, target_ratio: f64) -> Color {
    let mut best = color;
    let mut best_ratio = contrast_ratio(color, background);
    if best_ratio >= target_ratio {
        return color;
    }

    let lighten = background.is_dark();
    let mut hsl = color.to_hsl();

    for _ in 0..MAX_CONTRAST_ADJUST_STEPS {
        let lightness_saturated = if lighten { hsl.l >= 100.0 } else { hsl.l <= 0.0 };
        hsl = if lightness_saturated {
            hsl.with_saturation((hsl.s + SATURATION_BOOST).min(100.0))
        } else if lighten {
            hsl.with_lightness(hsl.l + LIGHTNESS_STEP)
        } else {
            hsl.with_lightness(hsl.l - LIGHTNESS_STEP)
        };

        let candidate = hsl.to_color();
        let ratio = contrast_ratio(candidate, background);
        if ratio >= target_ratio {
            return candidate;
        }
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }

    best
}

// ────────────────────────────────────────────────────────────────────────────
// Success/primary distinctness
// ────────────────────────────────────────────────────────────────────────────

/// Success must stay visually distinguishable from primary for any input.
/// Equality or a ratio under 1.5 forces a triadic rotation off primary's
/// hue plus a fresh background correction; if that still leaves the two at
/// similar luminance, the lightness walk below finishes the job.
fn ensure_success_distinct(success: Color, primary: Color, background: Color) -> Color {
    if success != primary && contrast_ratio(success, primary) >= MIN_SUCCESS_PRIMARY_CONTRAST {
        return success;
    }
    debug!("success indistinguishable from primary, rotating hue");
    let rotated = success
        .to_hsl()
        .with_hue(primary.to_hsl().h + 120.0)
        .to_color();
    let corrected = correct_contrast(rotated, background, ROLE_CONTRAST_TARGET);
    separate_lightness(corrected, primary)
}

/// Walks success's lightness toward whichever extreme contrasts more with
/// primary. One of black/white always clears the 1.5 floor, and the walk
/// can reach either from any start, so this terminates with the floor held.
fn separate_lightness(success: Color, primary: Color) -> Color {
    if contrast_ratio(success, primary) >= MIN_SUCCESS_PRIMARY_CONTRAST {
        return success;
    }
    let lighten = contrast_ratio(primary, WHITE) >= contrast_ratio(primary, BLACK);
    let mut hsl = success.to_hsl();
    let mut current = success;
    for _ in 0..MAX_SEPARATION_STEPS {
        hsl = hsl.with_lightness(if lighten {
            hsl.l + LIGHTNESS_STEP
        } else {
            hsl.l - LIGHTNESS_STEP
        });
        current = hsl.to_color();
        if contrast_ratio(current, primary) >= MIN_SUCCESS_PRIMARY_CONTRAST {
            return current;
        }
    }
    current
}

// ────────────────────────────────────────────────────────────────────────────
// External candidate adoption
// ────────────────────────────────────────────────────────────────────────────

/// Validates and corrects an untrusted analyzer candidate.
///
/// Rejections (`AnalyzerError::Invalid`) send the pipeline back to local
/// synthesis: a missing or unparseable role, or a candidate whose success
/// equals its primary. Accepted candidates still get the white-on-white
/// text guard and the success/primary distinctness guard, and always carry
/// locally derived `allColors`/`dropdownBackground` — the external service
/// never controls those.
pub fn adopt_candidate(
    candidate: &Value,
    pools: &ColorPools,
) -> Result<ThemePalette, AnalyzerError> {
    let object = candidate
        .as_object()
        .ok_or_else(|| AnalyzerError::Invalid("candidate is not a JSON object".to_string()))?;

    for key in RoleKey::ALL {
        if !object.contains_key(key.as_str()) {
            return Err(AnalyzerError::Invalid(format!(
                "missing role {:?}",
                key.as_str()
            )));
        }
    }

    let role = |key: RoleKey| -> Result<Color, AnalyzerError> {
        let raw = object
            .get(key.as_str())
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AnalyzerError::Invalid(format!("role {:?} is not a string", key.as_str()))
            })?;
        Color::parse(raw).map_err(|_| {
            AnalyzerError::Invalid(format!(
                "role {:?} is not a hex color: {raw:?}",
                key.as_str()
            ))
        })
    };

    let primary = role(RoleKey::Primary)?;
    let secondary = role(RoleKey::Secondary)?;
    let accent = role(RoleKey::Accent)?;
    let background = role(RoleKey::Background)?;
    let mut text = role(RoleKey::Text)?;
    let text_secondary = role(RoleKey::TextSecondary)?;
    let border = role(RoleKey::Border)?;
    let success = role(RoleKey::Success)?;
    let warning = role(RoleKey::Warning)?;
    let error = role(RoleKey::Error)?;
    let info = role(RoleKey::Info)?;

    if success == primary {
        return Err(AnalyzerError::Invalid("success equals primary".to_string()));
    }

    // Near-white text on a near-white background is corrected, not rejected.
    if background.to_hsl().l > 80.0 && text.to_hsl().l > 80.0 {
        warn!("analyzer suggested light-on-light text, forcing black");
        text = TEXT_SEED;
    }

    let success = ensure_success_distinct(success, primary, background);

    Ok(ThemePalette {
        primary,
        secondary,
        accent,
        background,
        text,
        text_secondary,
        border,
        success,
        warning,
        error,
        info,
        all_colors: pools.all.clone(),
        dropdown_background: dropdown_background(&pools.all),
    })
}
