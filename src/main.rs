use std::time::Duration;

use payroll_engine::api::{AppState, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/kr_payroll";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

const DEFAULT_LOG_DIRECTIVE: &str = "payroll_engine=info";

/// Builds the log filter from `RUST_LOG`, falling back to the engine at info level.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Initializes the global tracing subscriber.
fn init_tracing() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .init();
}

fn cache_ttl() -> Duration {
    std::env::var("PAYROLL_CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CACHE_TTL)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        jurisdiction = %config.metadata().code,
        rule_sets = config.config().rules().len(),
        "Loaded payroll rules"
    );

    let state = AppState::with_cache(config, cache_ttl(), DEFAULT_CACHE_CAPACITY);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Payroll engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
