//! Turno handlers
//!
//! Booking, rescheduling and cancelling appointments.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::domain::entities::{coerce_id, Turno, TurnoDraft, TurnoPatch};
use crate::error::AppError;
use crate::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Turno no encontrado".to_string())
}

/// GET /api/turnos
pub async fn list_turnos(State(state): State<AppState>) -> Result<Json<Vec<Turno>>, AppError> {
    Ok(Json(state.turno_service.list().await?))
}

/// GET /api/turnos/:id
pub async fn get_turno(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Turno>, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;

    state
        .turno_service
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// POST /api/turnos
///
/// Body: `{ "medico": 1, "paciente": 1, "fechaHora": "2024-05-01T10:30:00" }`.
/// The stored appointment carries `fecha` and `hora` instead of `fechaHora`.
pub async fn create_turno(
    State(state): State<AppState>,
    payload: Result<Json<TurnoDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Turno>), AppError> {
    let Json(draft) = payload?;
    let turno = state.turno_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(turno)))
}

/// PUT /api/turnos/:id
pub async fn update_turno(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TurnoPatch>, JsonRejection>,
) -> Result<Json<Turno>, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;
    let Json(patch) = payload?;

    state
        .turno_service
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// DELETE /api/turnos/:id
pub async fn delete_turno(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;

    if state.turno_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
