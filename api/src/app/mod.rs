//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services validate input and delegate to the repository ports.

pub mod agenda_service;
pub mod medico_service;
pub mod paciente_service;
pub mod turno_service;

pub use agenda_service::{AgendaEntry, AgendaService};
pub use medico_service::MedicoService;
pub use paciente_service::PacienteService;
pub use turno_service::TurnoService;
