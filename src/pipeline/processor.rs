//! Pipeline orchestrator: validate → extract → parse → annotate.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::ambiguity::{apply_annotations, AmbiguityDetector, LlmAmbiguityDetector};
use super::extraction::{ExtractionError, TextExtractor};
use super::parsing::{OllamaClient, ParsingError, PolicyParser, RuleExtractor};
use super::validate::{validate_upload, ValidationError};
use crate::config;
use crate::models::{Policy, Rule};

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Service(#[from] ParsingError),
}

/// Runs a policy document through the whole pipeline.
pub struct PolicyProcessor {
    extractor: TextExtractor,
    rules: Arc<dyn RuleExtractor + Send + Sync>,
    ambiguity: Arc<dyn AmbiguityDetector + Send + Sync>,
}

impl PolicyProcessor {
    pub fn new(
        extractor: TextExtractor,
        rules: Arc<dyn RuleExtractor + Send + Sync>,
        ambiguity: Arc<dyn AmbiguityDetector + Send + Sync>,
    ) -> Self {
        Self {
            extractor,
            rules,
            ambiguity,
        }
    }

    pub fn process(&self, policy_id: &str, pdf_bytes: &[u8]) -> Result<Policy, ProcessingError> {
        validate_upload(pdf_bytes)?;
        info!(policy_id = %policy_id, bytes = pdf_bytes.len(), "upload validated");

        let text = self.extractor.extract(pdf_bytes)?;
        info!(policy_id = %policy_id, chars = text.len(), "text extracted");

        let extracted = self.rules.extract_rules(&text)?;
        info!(
            policy_id = %policy_id,
            title = %extracted.policy_title,
            rules = extracted.rules.len(),
            "rules extracted"
        );

        let annotations = self.ambiguity.annotate(&extracted.rules)?;
        let rules: Vec<Rule> = apply_annotations(&extracted.rules, &annotations);
        let flagged = rules.iter().filter(|r| r.is_flagged_ambiguous()).count();
        info!(policy_id = %policy_id, flagged, "ambiguity pass complete");

        Ok(Policy::new(extracted.policy_title, rules))
    }
}

/// Production wiring: default PDF engines, one shared Ollama client for
/// both LLM passes.
pub fn build_processor() -> PolicyProcessor {
    let llm = Arc::new(OllamaClient::new(
        &config::ollama_url(),
        config::LLM_TIMEOUT_SECS,
    ));
    let model = config::llm_model();

    PolicyProcessor::new(
        TextExtractor::with_default_engines(),
        Arc::new(PolicyParser::new(llm.clone(), model.clone())),
        Arc::new(LlmAmbiguityDetector::new(llm, model)),
    )
}
