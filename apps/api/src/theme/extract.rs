//! End-to-end extraction pipeline: scan the document text, build pools (or
//! synthesize them), optionally consult the external analyzer, harmonize.

use tracing::{info, warn};

use crate::theme::analyzer::{AnalysisRequest, PaletteAnalyzer};
use crate::theme::categorize::ColorPools;
use crate::theme::fallback::{synthesize_pools, MIN_SCANNED_COLORS};
use crate::theme::harmonize::{adopt_candidate, harmonize};
use crate::theme::palette::ThemePalette;
use crate::theme::scanner::scan_pages;

/// Which path produced the palette. Reported in logs, never in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Scanned,
    Fallback,
    AiAssisted,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Scanned => "scanned colors",
            Provenance::Fallback => "fallback synthesis",
            Provenance::AiAssisted => "external analyzer",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub palette: ThemePalette,
    pub provenance: Provenance,
}

/// Runs the whole pipeline for one document. Infallible by construction:
/// every failure mode degrades to a more local strategy, bottoming out at
/// deterministic synthesis from the document name.
pub async fn extract_theme(
    pages: &[String],
    doc_name: &str,
    doc_hint: &str,
    analyzer: Option<&dyn PaletteAnalyzer>,
) -> ExtractionOutcome {
    let scanned = scan_pages(pages);

    // Too few usable colors means the document gives us nothing to
    // harmonize, so pools are synthesized from the document name instead.
    let (pools, provenance) = if scanned.len() < MIN_SCANNED_COLORS {
        info!(
            "only {} usable colors in {doc_name:?}, synthesizing pools",
            scanned.len()
        );
        (synthesize_pools(doc_name), Provenance::Fallback)
    } else {
        (ColorPools::from_scanned(scanned), Provenance::Scanned)
    };

    if let Some(analyzer) = analyzer {
        let request = AnalysisRequest::new(&pools, doc_hint);
        match analyzer.analyze(&request).await {
            Ok(candidate) => match adopt_candidate(&candidate, &pools) {
                Ok(palette) => {
                    return ExtractionOutcome {
                        palette,
                        provenance: Provenance::AiAssisted,
                    }
                }
                Err(e) => warn!("discarding analyzer candidate: {e}"),
            },
            Err(e) => warn!("external analysis skipped: {e}"),
        }
    }

    ExtractionOutcome {
        palette: harmonize(&pools),
        provenance,
    }
}
