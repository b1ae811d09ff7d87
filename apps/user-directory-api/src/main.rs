use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let state = AppState::new(config);
    info!(
        seed_demo_users = state.config.directory.seed_demo_users,
        required_fields = ?state.config.directory.required_fields,
        "User directory initialized"
    );

    let app = api::app(&state)?;

    let users = state.users.clone();
    create_app(app, &state.config.server, async move {
        match users.count_users().await {
            Ok(count) => info!(total_users = count, "Discarding in-memory user directory"),
            Err(e) => tracing::warn!(error = %e, "Could not read final user count"),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("{} shutdown complete", state.config.app.name);
    Ok(())
}
