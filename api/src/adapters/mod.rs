//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod json_file;

pub use json_file::{JsonMedicoRepository, JsonPacienteRepository, JsonTurnoRepository};
