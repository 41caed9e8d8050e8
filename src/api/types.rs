//! Shared state handed to every endpoint handler.

use std::sync::Arc;

use crate::pipeline::PolicyProcessor;
use crate::store::PolicyStore;
use crate::submit::ExecutionBackend;

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<PolicyStore>,
    pub processor: Arc<PolicyProcessor>,
    pub backend: Arc<dyn ExecutionBackend + Send + Sync>,
}

impl ApiContext {
    pub fn new(
        store: Arc<PolicyStore>,
        processor: Arc<PolicyProcessor>,
        backend: Arc<dyn ExecutionBackend + Send + Sync>,
    ) -> Self {
        Self {
            store,
            processor,
            backend,
        }
    }
}
