//! Prompt assembly for the external palette analyzer.

use crate::theme::analyzer::AnalysisRequest;
use crate::theme::color::Color;

/// Asks for exactly the eleven role keys as flat hex strings. The candidate
/// is validated and corrected after parsing, so the prompt only has to get
/// the shape right, not the accessibility math.
const PALETTE_ANALYSIS_PROMPT: &str = r##"You are a design assistant choosing a UI color palette for a document-derived theme.

Colors extracted from the document, grouped by usage:
- Text (ink) colors: {text_colors}
- Background colors: {background_colors}
- Accent colors: {accent_colors}

Document: {document_hint}

Choose a harmonious palette that stays faithful to the document's colors. Prefer extracted colors for primary, secondary, and accent; keep text readable against the background; make success clearly distinguishable from primary.

Respond with a JSON object containing exactly these keys, each a 6-digit hex color string like "#3a6ea5":
"primary", "secondary", "accent", "background", "text", "textSecondary", "border", "success", "warning", "error", "info"

No other keys, no explanations."##;

pub fn build_palette_prompt(request: &AnalysisRequest) -> String {
    PALETTE_ANALYSIS_PROMPT
        .replace("{text_colors}", &join_hex(&request.text_colors))
        .replace("{background_colors}", &join_hex(&request.background_colors))
        .replace("{accent_colors}", &join_hex(&request.accent_colors))
        .replace("{document_hint}", &request.document_hint)
}

fn join_hex(colors: &[Color]) -> String {
    if colors.is_empty() {
        return "(none)".to_string();
    }
    colors
        .iter()
        .map(|c| c.hex())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::categorize::ColorPools;

    #[test]
    fn test_prompt_interpolates_all_pools() {
        let pools = ColorPools::from_scanned(vec![
            Color::parse("#000000").unwrap(),
            Color::parse("#00a99d").unwrap(),
            Color::parse("#ffffff").unwrap(),
        ]);
        let request = AnalysisRequest::new(&pools, "resume");
        let prompt = build_palette_prompt(&request);
        assert!(prompt.contains("#000000, #00a99d"));
        assert!(prompt.contains("#ffffff"));
        assert!(prompt.contains("Document: resume"));
        assert!(!prompt.contains('{'), "unreplaced placeholder left behind");
        // The quoted example survives the raw-string delimiters intact
        assert!(prompt.contains("like \"#3a6ea5\":"));
    }

    #[test]
    fn test_empty_pools_render_as_none() {
        let request = AnalysisRequest::new(&ColorPools::from_scanned(vec![]), "empty");
        let prompt = build_palette_prompt(&request);
        assert!(prompt.contains("Text (ink) colors: (none)"));
    }
}
