//! The palette record — the flat role-color JSON contract consumed by the
//! theme layer.

use serde::{Deserialize, Serialize};

use crate::theme::color::Color;

/// The fixed semantic role vocabulary. Candidate validation iterates this
/// to check completeness; the strings are the wire field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKey {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    TextSecondary,
    Border,
    Success,
    Warning,
    Error,
    Info,
}

impl RoleKey {
    pub const ALL: [RoleKey; 11] = [
        RoleKey::Primary,
        RoleKey::Secondary,
        RoleKey::Accent,
        RoleKey::Background,
        RoleKey::Text,
        RoleKey::TextSecondary,
        RoleKey::Border,
        RoleKey::Success,
        RoleKey::Warning,
        RoleKey::Error,
        RoleKey::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKey::Primary => "primary",
            RoleKey::Secondary => "secondary",
            RoleKey::Accent => "accent",
            RoleKey::Background => "background",
            RoleKey::Text => "text",
            RoleKey::TextSecondary => "textSecondary",
            RoleKey::Border => "border",
            RoleKey::Success => "success",
            RoleKey::Warning => "warning",
            RoleKey::Error => "error",
            RoleKey::Info => "info",
        }
    }
}

/// One color per role plus the candidate set and the dropdown surface.
///
/// Every role is a plain struct field, so a palette cannot exist with a
/// role unset. Colors serialize as `#rrggbb` strings; the whole record
/// serializes camelCase to match the consuming theme provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub all_colors: Vec<Color>,
    pub dropdown_background: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> Color {
        Color::parse(hex).unwrap()
    }

    fn sample_palette() -> ThemePalette {
        ThemePalette {
            primary: color("#3a6ea5"),
            secondary: color("#a53a6e"),
            accent: color("#6ea53a"),
            background: color("#ffffff"),
            text: color("#000000"),
            text_secondary: color("#666666"),
            border: color("#9db8d2"),
            success: color("#28a745"),
            warning: color("#ffc107"),
            error: color("#dc3545"),
            info: color("#17a2b8"),
            all_colors: vec![color("#000000"), color("#3a6ea5"), color("#ffffff")],
            dropdown_background: color("#ffffff"),
        }
    }

    #[test]
    fn test_serializes_to_flat_camel_case_record() {
        let value = serde_json::to_value(sample_palette()).unwrap();
        let object = value.as_object().unwrap();

        for key in RoleKey::ALL {
            let field = object
                .get(key.as_str())
                .unwrap_or_else(|| panic!("missing field {}", key.as_str()));
            let hex = field.as_str().unwrap();
            assert!(Color::parse(hex).is_ok(), "{hex} is not a valid color");
        }

        assert!(object.get("allColors").unwrap().is_array());
        assert_eq!(
            object.get("dropdownBackground").unwrap().as_str().unwrap(),
            "#ffffff"
        );
        // Exactly the contract fields, nothing extra
        assert_eq!(object.len(), 13);
    }

    #[test]
    fn test_role_strings_match_wire_names() {
        assert_eq!(RoleKey::TextSecondary.as_str(), "textSecondary");
        assert_eq!(RoleKey::Primary.as_str(), "primary");
        assert_eq!(RoleKey::ALL.len(), 11);
    }

    #[test]
    fn test_deserializes_back_from_contract_json() {
        let palette = sample_palette();
        let json = serde_json::to_string(&palette).unwrap();
        let back: ThemePalette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
    }
}
