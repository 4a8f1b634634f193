//! Domain entities
//!
//! Pure domain models for the clinic: doctors, patients and appointments,
//! plus the `Record` contract every stored entity implements.

pub mod medico;
pub mod paciente;
pub mod record;
pub mod turno;

pub use medico::{Medico, MedicoDraft, MedicoPatch, NewMedico};
pub use paciente::{NewPaciente, Paciente, PacienteDraft, PacientePatch};
pub use record::{coerce_id, provided, Identity, Record};
pub use turno::{split_fecha_hora, NewTurno, Turno, TurnoDraft, TurnoEstado, TurnoPatch};
