use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rulemill::api::{api_router, ApiContext};
use rulemill::config;
use rulemill::pipeline::build_processor;
use rulemill::store::PolicyStore;
use rulemill::submit::HttpExecutionBackend;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    info!(
        name = config::APP_NAME,
        version = config::APP_VERSION,
        "starting"
    );

    let ctx = ApiContext::new(
        Arc::new(PolicyStore::new()),
        Arc::new(build_processor()),
        Arc::new(HttpExecutionBackend::new(&config::execution_backend_url())),
    );
    let app = api_router(ctx);

    let addr = config::bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %addr, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
