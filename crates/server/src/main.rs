use server::config;
use server::hub::{EternalGame, Hub};
use server::routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    let game = EternalGame::new().with_history_limit(config.game_history);
    let hub = Hub::new(game, config.event_buffer);
    tracing::info!(
        "Starting eternal game ({:?} per move, {:?} between games)",
        config.move_interval,
        config.game_pause
    );
    tokio::spawn(hub.clone().run(config.move_interval, config.game_pause));

    let app = routes::router(hub);

    let addr = config.addr();
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
