pub mod fallback;
#[cfg(test)]
pub(crate) mod test_pdf;
pub mod orchestrator;
pub mod pdf;
pub mod sanitize;
pub mod types;

pub use fallback::LopdfEngine;
pub use orchestrator::TextExtractor;
pub use pdf::PdfExtractEngine;
pub use sanitize::clean_text;
pub use types::PdfEngine;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("no machine-readable text layer found")]
    NoText,

    #[error("extracted text too short to be meaningful: {chars} characters")]
    InsufficientText { chars: usize },

    #[error("PDF engine failed: {0}")]
    Engine(String),
}
