//! Paciente domain entity
//!
//! A patient of the clinic, uniquely identified by national id (dni).

use serde::{Deserialize, Serialize};

use super::record::{merge, Identity, Record};

/// A patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paciente {
    pub id: Identity,
    /// National id, unique across all patients
    pub dni: i64,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub email: String,
}

/// Patient data as received, before required-field checks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PacienteDraft {
    pub dni: Option<i64>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub email: Option<String>,
}

/// Validated data needed to create a patient
#[derive(Debug, Clone)]
pub struct NewPaciente {
    pub dni: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
}

/// Partial update for a patient
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PacientePatch {
    pub dni: Option<i64>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub email: Option<String>,
}

impl Record for Paciente {
    type New = NewPaciente;
    type Patch = PacientePatch;

    const COLLECTION: &'static str = "pacientes";

    fn from_new(id: Identity, new: NewPaciente) -> Self {
        Self {
            id,
            dni: new.dni,
            nombre: new.nombre,
            apellido: new.apellido,
            email: new.email,
        }
    }

    fn id(&self) -> Identity {
        self.id
    }

    fn patched(&self, patch: PacientePatch) -> Self {
        Self {
            id: self.id,
            dni: merge(patch.dni, &self.dni),
            nombre: merge(patch.nombre, &self.nombre),
            apellido: merge(patch.apellido, &self.apellido),
            email: merge(patch.email, &self.email),
        }
    }
}
