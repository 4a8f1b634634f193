//! JSON snapshot adapters
//!
//! Implementations of repository traits backed by one snapshot file per
//! entity type.

pub mod repositories;
pub mod store;

pub use repositories::{JsonMedicoRepository, JsonPacienteRepository, JsonTurnoRepository};
