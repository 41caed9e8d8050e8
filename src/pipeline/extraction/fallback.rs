use tracing::warn;

use super::types::PdfEngine;
use super::ExtractionError;

/// Fallback engine: lopdf's page-level text extraction.
///
/// More tolerant of structural damage than the primary engine because
/// it works page by page; a page that fails to decode is skipped with
/// a warning instead of failing the document.
pub struct LopdfEngine;

impl PdfEngine for LopdfEngine {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let doc = lopdf::Document::load_mem(pdf_bytes)
            .map_err(|e| ExtractionError::Engine(e.to_string()))?;

        let pages = doc
            .get_pages()
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(page = page_number, error = %e, "page decode failed, skipping");
                    String::new()
                }
            })
            .collect();

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::test_pdf::make_test_pdf;

    #[test]
    fn extracts_text_from_digital_pdf() {
        let pdf_bytes = make_test_pdf(&["Contractors must carry liability insurance"]);
        let pages = LopdfEngine.extract_pages(&pdf_bytes).unwrap();

        let full_text = pages.join("\n");
        assert!(
            full_text.contains("Contractors") || full_text.contains("insurance"),
            "expected policy text, got: {full_text}"
        );
    }

    #[test]
    fn one_entry_per_page() {
        let pdf_bytes = make_test_pdf(&["First", "Second"]);
        let pages = LopdfEngine.extract_pages(&pdf_bytes).unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn invalid_pdf_returns_engine_error() {
        let result = LopdfEngine.extract_pages(b"%PDF-1.4 truncated garbage");
        assert!(matches!(result, Err(ExtractionError::Engine(_))));
    }
}
