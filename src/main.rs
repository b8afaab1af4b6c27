use snake_arcade::app::routes::router;
use snake_arcade::app::state::AppState;
use snake_arcade::config::ServerConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = ServerConfig::from_env();
  if config.debug_commands {
    tracing::warn!("debug commands enabled");
  }
  if !config.assets_dir.is_dir() {
    tracing::warn!(dir = %config.assets_dir.display(), "assets directory missing, skins will use the default look");
  }

  let address = format!("0.0.0.0:{}", config.port);
  let state = Arc::new(AppState::new(config));
  let app = router(state);

  tracing::info!("listening on {address}");
  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
