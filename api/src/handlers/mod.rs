//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Each handler is a thin
//! pass-through to one service; path identities are coerced to integers
//! and a miss becomes a 404.

pub mod medicos;
pub mod pacientes;
pub mod turnos;

pub use medicos::{
    create_medico, delete_medico, get_medico, list_medicos, list_turnos_by_medico, update_medico,
};
pub use pacientes::{
    create_paciente, delete_paciente, get_paciente, list_pacientes, update_paciente,
};
pub use turnos::{create_turno, delete_turno, get_turno, list_turnos, update_turno};
