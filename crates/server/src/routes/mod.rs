pub mod games;
pub mod health;
pub mod live_ws;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::hub::SharedHub;

/// All HTTP and WebSocket routes over one hub.
pub fn router(hub: SharedHub) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/state", get(games::get_state))
        .route("/api/games", get(games::list_games))
        .route("/api/games/{game_id}", get(games::get_game))
        .route("/ws", get(live_ws::ws_handler))
        .layer(Extension(hub))
        .layer(cors)
}
