pub mod ambiguity;
pub mod extraction;
pub mod parsing;
pub mod processor;
pub mod validate;

pub use processor::{build_processor, PolicyProcessor, ProcessingError};
