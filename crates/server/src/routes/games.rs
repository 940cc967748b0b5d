use axum::{extract::Path, extract::Query, Extension, Json};
use chess_core::{GameRecord, LiveGameSummary};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::hub::SharedHub;

const MAX_PAGE: usize = 500;

#[derive(Deserialize)]
pub struct GamesQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// GET /api/state
pub async fn get_state(Extension(hub): Extension<SharedHub>) -> Json<LiveGameSummary> {
    Json(hub.snapshot().await)
}

/// GET /api/games
pub async fn list_games(
    Extension(hub): Extension<SharedHub>,
    Query(q): Query<GamesQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let limit = q.limit.unwrap_or(50);
    if limit == 0 || limit > MAX_PAGE {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE}"
        )));
    }
    let offset = q.offset.unwrap_or(0);

    let (total, page) = hub.games_page(offset, limit).await;

    Ok(Json(serde_json::json!({
        "hasMore": offset + page.len() < total,
        "games": page,
        "total": total,
        "limit": limit,
        "offset": offset,
    })))
}

/// GET /api/games/{game_id}
pub async fn get_game(
    Extension(hub): Extension<SharedHub>,
    Path(game_id): Path<u64>,
) -> Result<Json<GameRecord>, AppError> {
    hub.game(game_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Game {game_id} not found")))
}
