use anyhow::Context;

use tradedocs_api::app::{self, AppState};
use tradedocs_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tradedocs_observability::init();

    let config = AppConfig::from_env();
    if std::env::var_os("DATABASE_URL").is_none() {
        tracing::warn!(database_url = %config.database_url, "DATABASE_URL not set; using local sqlite file");
    }

    let state = AppState::connect(&config)
        .await
        .context("failed to initialize application state")?;
    let app = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
