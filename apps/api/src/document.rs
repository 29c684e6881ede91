//! Uploaded-document handling: PDF text extraction and name normalization.

use tracing::warn;

/// Pulls the text layer out of a PDF and splits it into pages on form
/// feeds. Parsing is CPU-bound and panics on some real-world font
/// encodings, so it runs inside `spawn_blocking` (owned bytes for the
/// 'static closure bound) with the `JoinError` treated like a parse
/// error. Neither failure is fatal: the raw bytes are scanned lossily
/// instead, which still finds color tokens in uncompressed streams.
pub async fn extract_pages(data: &[u8]) -> Vec<String> {
    let bytes = data.to_vec();
    let parsed =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    match parsed {
        Ok(Ok(text)) => text.split('\x0c').map(str::to_string).collect(),
        Ok(Err(e)) => {
            warn!("PDF text extraction failed ({e}), scanning raw bytes instead");
            vec![String::from_utf8_lossy(data).into_owned()]
        }
        Err(e) => {
            warn!("PDF text extraction panicked ({e}), scanning raw bytes instead");
            vec![String::from_utf8_lossy(data).into_owned()]
        }
    }
}

/// Derives the synthesis seed from an uploaded file name: path components
/// and the final extension go, everything else stays. Multi-dot names lose
/// only the last extension. Empty input becomes "document".
pub fn base_name(file_name: &str) -> String {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    if stem.is_empty() {
        "document".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_strips_extension() {
        assert_eq!(base_name("resume.pdf"), "resume");
        assert_eq!(base_name("resume.PDF"), "resume");
    }

    #[test]
    fn test_base_name_keeps_inner_dots() {
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("v2.final.pdf"), "v2.final");
    }

    #[test]
    fn test_base_name_drops_path_components() {
        assert_eq!(base_name("uploads/2024/resume.pdf"), "resume");
        assert_eq!(base_name("C:\\Users\\me\\resume.pdf"), "resume");
    }

    #[test]
    fn test_base_name_edge_cases() {
        assert_eq!(base_name(""), "document");
        assert_eq!(base_name("noext"), "noext");
        assert_eq!(base_name(".hidden"), ".hidden");
        assert_eq!(base_name("trailing."), "trailing");
    }

    #[tokio::test]
    async fn test_garbage_bytes_fall_back_to_lossy_scan() {
        let pages = extract_pages(b"not a pdf, but it mentions #ff0000").await;
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("#ff0000"));
    }

    /// Minimal one-page PDF whose only font declares an encoding the
    /// parser aborts on instead of returning an Err. Offsets are computed
    /// while assembling so the xref table stays valid.
    fn bogus_encoding_pdf() -> Vec<u8> {
        let content = b"BT /F1 12 Tf 72 720 Td (accent #00a99d) Tj ET";
        let objects: Vec<Vec<u8>> = vec![
            b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec(),
            b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_vec(),
            b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
              /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>\nendobj\n"
                .to_vec(),
            [
                format!("4 0 obj\n<< /Length {} >>\nstream\n", content.len()).into_bytes(),
                content.to_vec(),
                b"\nendstream\nendobj\n".to_vec(),
            ]
            .concat(),
            b"5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
              /Encoding /BogusEncoding >>\nendobj\n"
                .to_vec(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for object in &objects {
            offsets.push(pdf.len());
            pdf.extend_from_slice(object);
        }
        let xref_start = pdf.len();
        pdf.extend_from_slice(b"xref\n0 6\n0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!("trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF")
                .as_bytes(),
        );
        pdf
    }

    #[tokio::test]
    async fn test_parser_panic_degrades_to_lossy_scan() {
        let pages = extract_pages(&bogus_encoding_pdf()).await;
        assert_eq!(pages.len(), 1);
        // The content stream is uncompressed, so the raw scan still sees it
        assert!(pages[0].contains("#00a99d"));
    }
}
