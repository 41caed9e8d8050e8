use tracing::{debug, warn};

use super::sanitize::clean_text;
use super::types::PdfEngine;
use super::ExtractionError;
use crate::config::MIN_TEXT_CHARS;

/// Runs PDF engines in order until one yields usable text.
///
/// An engine error or an empty text layer both fall through to the
/// next engine; only the final cleaned text is judged against the
/// minimum length.
pub struct TextExtractor {
    engines: Vec<Box<dyn PdfEngine + Send + Sync>>,
}

impl TextExtractor {
    pub fn new(engines: Vec<Box<dyn PdfEngine + Send + Sync>>) -> Self {
        Self { engines }
    }

    /// Primary engine first, lopdf as the fallback.
    pub fn with_default_engines() -> Self {
        Self::new(vec![
            Box::new(super::pdf::PdfExtractEngine),
            Box::new(super::fallback::LopdfEngine),
        ])
    }

    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut raw_text = None;

        for engine in &self.engines {
            match engine.extract_pages(pdf_bytes) {
                Ok(pages) => {
                    let joined = pages.join("\n");
                    if joined.trim().is_empty() {
                        debug!(engine = engine.name(), "engine found no text layer");
                        continue;
                    }
                    debug!(
                        engine = engine.name(),
                        pages = pages.len(),
                        chars = joined.len(),
                        "text layer extracted"
                    );
                    raw_text = Some(joined);
                    break;
                }
                Err(e) => {
                    warn!(engine = engine.name(), error = %e, "engine failed, trying next");
                }
            }
        }

        let raw = raw_text.ok_or(ExtractionError::NoText)?;
        let cleaned = clean_text(&raw);

        if cleaned.is_empty() {
            return Err(ExtractionError::NoText);
        }
        let chars = cleaned.chars().count();
        if chars < MIN_TEXT_CHARS {
            return Err(ExtractionError::InsufficientText { chars });
        }
        Ok(cleaned)
    }
}
