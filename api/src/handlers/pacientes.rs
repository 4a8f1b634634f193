//! Paciente handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domain::entities::{coerce_id, Paciente, PacienteDraft, PacientePatch};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing patients
#[derive(Debug, Deserialize)]
pub struct ListPacientesQuery {
    /// Only the patient with this national id
    pub dni: Option<String>,
}

fn not_found() -> AppError {
    AppError::NotFound("Paciente no encontrado".to_string())
}

/// GET /api/pacientes
pub async fn list_pacientes(
    State(state): State<AppState>,
    Query(query): Query<ListPacientesQuery>,
) -> Result<Json<Vec<Paciente>>, AppError> {
    let pacientes = match query.dni.as_deref().map(coerce_id) {
        Some(Some(dni)) => state
            .paciente_service
            .find_by_dni(dni)
            .await?
            .into_iter()
            .collect(),
        Some(None) => Vec::new(),
        None => state.paciente_service.list().await?,
    };

    Ok(Json(pacientes))
}

/// GET /api/pacientes/:id
pub async fn get_paciente(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Paciente>, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;

    state
        .paciente_service
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// POST /api/pacientes
pub async fn create_paciente(
    State(state): State<AppState>,
    payload: Result<Json<PacienteDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Paciente>), AppError> {
    let Json(draft) = payload?;
    let paciente = state.paciente_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(paciente)))
}

/// PUT /api/pacientes/:id
pub async fn update_paciente(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PacientePatch>, JsonRejection>,
) -> Result<Json<Paciente>, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;
    let Json(patch) = payload?;

    state
        .paciente_service
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// DELETE /api/pacientes/:id
pub async fn delete_paciente(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;

    if state.paciente_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
