//! Rulemill turns policy documents into structured, executable rules.
//!
//! A PDF goes through validation, text extraction (two engines with
//! fallback), LLM rule extraction and an ambiguity pass; the result is
//! held in memory for human clarification and finally delivered to an
//! execution backend.

pub mod api;
pub mod clarify;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod submit;
