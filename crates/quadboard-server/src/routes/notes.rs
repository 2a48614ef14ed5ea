use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use quadboard_core::Note;
use quadboard_service::{NoteService, ServiceError};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::AppState;

type ApiError = (StatusCode, Json<Value>);

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes))
        .route("/api/notes/add", post(add_note))
        .route("/api/notes/update", post(update_note))
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    state.service.list_notes().await.map(Json).map_err(to_error)
}

async fn add_note(
    State(state): State<AppState>,
    payload: Result<Json<Note>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(note) = payload.map_err(bad_request)?;
    state.service.add_note(&note).await.map_err(to_error)?;
    info!("added note {} to {}", note.id, note.quadrant);
    Ok(StatusCode::OK)
}

async fn update_note(
    State(state): State<AppState>,
    payload: Result<Json<Note>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(note) = payload.map_err(bad_request)?;
    state.service.update_note(&note).await.map_err(to_error)?;
    info!("updated note {} in {}", note.id, note.quadrant);
    Ok(StatusCode::OK)
}

fn bad_request(rejection: JsonRejection) -> ApiError {
    warn!("rejected note payload: {rejection}");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": rejection.body_text() })),
    )
}

fn to_error(e: ServiceError) -> ApiError {
    let status = match &e {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("note request failed: {e}");
    }
    (status, Json(json!({ "error": e.to_string() })))
}
