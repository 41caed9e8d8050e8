use super::types::PdfEngine;
use super::ExtractionError;

/// Primary engine: the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfExtractEngine;

impl PdfEngine for PdfExtractEngine {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::Engine(e.to_string()))
    }
}
