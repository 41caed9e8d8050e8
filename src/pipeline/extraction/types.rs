use super::ExtractionError;

/// PDF text-layer engine abstraction (allows mocking for tests).
///
/// Engines return one string per page, in page order. An engine that
/// parses the document but finds no text returns empty strings, not an
/// error; errors mean the engine could not read the document at all.
pub trait PdfEngine {
    fn name(&self) -> &'static str;

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}
