//! Turnos API Server
//!
//! Appointment booking for a clinic: doctors, patients and appointments,
//! persisted to one JSON snapshot file per entity type.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{JsonMedicoRepository, JsonPacienteRepository, JsonTurnoRepository};
use app::{AgendaService, MedicoService, PacienteService, TurnoService};
use config::Config;
use error::AppError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub medico_service: Arc<MedicoService<JsonMedicoRepository>>,
    pub paciente_service: Arc<PacienteService<JsonPacienteRepository>>,
    pub turno_service: Arc<TurnoService<JsonTurnoRepository>>,
    pub agenda_service: Arc<AgendaService<JsonTurnoRepository, JsonPacienteRepository>>,
}

impl AppState {
    /// Load the three stores from `config.data_dir` and wire the services
    pub async fn open(config: &Config) -> Self {
        let medico_repo = Arc::new(JsonMedicoRepository::open_in(&config.data_dir).await);
        let paciente_repo = Arc::new(JsonPacienteRepository::open_in(&config.data_dir).await);
        let turno_repo = Arc::new(JsonTurnoRepository::open_in(&config.data_dir).await);

        let medico_service = Arc::new(MedicoService::new(medico_repo));
        let paciente_service = Arc::new(PacienteService::new(paciente_repo));
        let turno_service = Arc::new(TurnoService::new(turno_repo, config.clinic_offset));
        let agenda_service = Arc::new(AgendaService::new(
            turno_service.clone(),
            paciente_service.clone(),
        ));

        Self {
            medico_service,
            paciente_service,
            turno_service,
            agenda_service,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn unknown_route() -> AppError {
    AppError::NotFound("Ruta no encontrada".to_string())
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/health") }))
        .route("/health", get(health))
        // Medicos
        .route(
            "/api/medicos",
            get(handlers::list_medicos).post(handlers::create_medico),
        )
        .route(
            "/api/medicos/:id",
            get(handlers::get_medico)
                .put(handlers::update_medico)
                .delete(handlers::delete_medico),
        )
        .route(
            "/api/medicos/:id/turnos",
            get(handlers::list_turnos_by_medico),
        )
        // Pacientes
        .route(
            "/api/pacientes",
            get(handlers::list_pacientes).post(handlers::create_paciente),
        )
        .route(
            "/api/pacientes/:id",
            get(handlers::get_paciente)
                .put(handlers::update_paciente)
                .delete(handlers::delete_paciente),
        )
        // Turnos
        .route(
            "/api/turnos",
            get(handlers::list_turnos).post(handlers::create_turno),
        )
        .route(
            "/api/turnos/:id",
            get(handlers::get_turno)
                .put(handlers::update_turno)
                .delete(handlers::delete_turno),
        )
        .fallback(unknown_route)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,turnos_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Turnos API...");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        clinic_offset = %config.clinic_offset,
        "Configuration loaded"
    );

    let state = AppState::open(&config).await;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
