//! Axum route handlers for the Theme API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::document::{base_name, extract_pages};
use crate::errors::AppError;
use crate::state::AppState;
use crate::theme::{extract_theme, ThemePalette};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    pub pages: Vec<String>,
    pub doc_name: String,
    /// Free-text description forwarded to the analyzer. Defaults to doc_name.
    #[serde(default)]
    pub hint: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/themes/extract
///
/// Multipart PDF upload: a required "file" part and an optional "hint" part.
/// Returns the harmonized palette as flat JSON. Never fails on document
/// content — only on a malformed request.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ThemePalette>, AppError> {
    let mut file_name = String::from("document.pdf");
    let mut data: Option<bytes::Bytes> = None;
    let mut hint = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if let Some(fname) = field.file_name() {
                    file_name = fname.to_string();
                }
                data = Some(field.bytes().await.map_err(multipart_err)?);
            }
            "hint" => hint = field.text().await.map_err(multipart_err)?,
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::Validation("missing 'file' part".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let doc_name = base_name(&file_name);
    let pages = extract_pages(&data).await;
    let hint = if hint.trim().is_empty() {
        doc_name.clone()
    } else {
        hint
    };

    let outcome = extract_theme(&pages, &doc_name, &hint, state.analyzer.as_deref()).await;
    info!(
        "extracted theme for {doc_name:?} via {}",
        outcome.provenance.as_str()
    );

    Ok(Json(outcome.palette))
}

/// POST /api/v1/themes/extract-text
///
/// Same pipeline without the PDF step: callers that already hold the text
/// layer submit pages directly.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(request): Json<ExtractTextRequest>,
) -> Result<Json<ThemePalette>, AppError> {
    if request.doc_name.trim().is_empty() {
        return Err(AppError::Validation("doc_name cannot be empty".to_string()));
    }

    let hint = if request.hint.trim().is_empty() {
        request.doc_name.clone()
    } else {
        request.hint.clone()
    };

    let outcome = extract_theme(
        &request.pages,
        &request.doc_name,
        &hint,
        state.analyzer.as_deref(),
    )
    .await;
    info!(
        "extracted theme for {:?} via {}",
        request.doc_name,
        outcome.provenance.as_str()
    );

    Ok(Json(outcome.palette))
}

fn multipart_err(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("malformed multipart body: {e}"))
}
