//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{domain::RoomName, infrastructure::dto::http::RoomDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms, sorted by name
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomDto>> {
    let rooms = state.router.rooms().list_rooms().await;
    Json(rooms.iter().map(RoomDto::from).collect())
}

/// Get one room by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<RoomDto>, StatusCode> {
    // 名前として不正なら存在しないルームと同じ扱い
    let name = RoomName::new(name).map_err(|_| StatusCode::NOT_FOUND)?;
    let room = state
        .router
        .rooms()
        .get_room(&name)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(RoomDto::from(&room)))
}
