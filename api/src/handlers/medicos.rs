//! Medico handlers
//!
//! Endpoints for doctors and their agenda.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::app::AgendaEntry;
use crate::domain::entities::{coerce_id, Medico, MedicoDraft, MedicoPatch};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing doctors
#[derive(Debug, Deserialize)]
pub struct ListMedicosQuery {
    /// Only the doctor with this license number
    pub matricula: Option<String>,
}

fn not_found() -> AppError {
    AppError::NotFound("Médico no encontrado".to_string())
}

/// Resolve the path identity to an existing doctor
async fn load_medico(state: &AppState, raw_id: &str) -> Result<Medico, AppError> {
    let Some(id) = coerce_id(raw_id) else {
        return Err(not_found());
    };

    state
        .medico_service
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)
}

/// GET /api/medicos
///
/// List doctors, optionally filtered by `?matricula=`.
pub async fn list_medicos(
    State(state): State<AppState>,
    Query(query): Query<ListMedicosQuery>,
) -> Result<Json<Vec<Medico>>, AppError> {
    let medicos = match query.matricula {
        Some(raw) => match coerce_id(&raw) {
            Some(matricula) => state
                .medico_service
                .find_by_matricula(matricula)
                .await?
                .into_iter()
                .collect(),
            None => Vec::new(),
        },
        None => state.medico_service.list().await?,
    };

    Ok(Json(medicos))
}

/// GET /api/medicos/:id
pub async fn get_medico(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Medico>, AppError> {
    Ok(Json(load_medico(&state, &id).await?))
}

/// GET /api/medicos/:id/turnos
///
/// The doctor's appointments, each with the full patient record.
pub async fn list_turnos_by_medico(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AgendaEntry>>, AppError> {
    let medico = load_medico(&state, &id).await?;
    let agenda = state.agenda_service.for_medico(&medico).await?;
    Ok(Json(agenda))
}

/// POST /api/medicos
pub async fn create_medico(
    State(state): State<AppState>,
    payload: Result<Json<MedicoDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Medico>), AppError> {
    let Json(draft) = payload?;
    let medico = state.medico_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(medico)))
}

/// PUT /api/medicos/:id
pub async fn update_medico(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MedicoPatch>, JsonRejection>,
) -> Result<Json<Medico>, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;
    let Json(patch) = payload?;

    state
        .medico_service
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// DELETE /api/medicos/:id
pub async fn delete_medico(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = coerce_id(&id).ok_or_else(not_found)?;

    if state.medico_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_query_without_filter() {
        let query: ListMedicosQuery = serde_json::from_str("{}").unwrap();
        assert!(query.matricula.is_none());
    }

    #[test]
    fn not_found_message() {
        assert_eq!(not_found().to_string(), "Not found: Médico no encontrado");
    }
}
