// Theme Extraction Engine
// Implements: color token scanning, categorization, fallback synthesis,
// optional external analysis, harmonization with contrast correction.
// All LLM calls go through llm_client — no direct Anthropic SDK calls here.

pub mod analyzer;
pub mod categorize;
pub mod color;
pub mod extract;
pub mod fallback;
pub mod handlers;
pub mod harmonize;
pub mod palette;
pub mod prompts;
pub mod scanner;

// Re-export the public API consumed by the handlers.
pub use extract::extract_theme;
pub use palette::ThemePalette;
