//! Medico domain entity
//!
//! A doctor of the clinic, uniquely identified by license number (matricula).

use serde::{Deserialize, Serialize};

use super::record::{merge, Identity, Record};

/// A doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medico {
    pub id: Identity,
    /// License number, unique across all doctors
    pub matricula: i64,
    pub nombre: String,
    pub email: String,
    pub especialidad: String,
}

/// Doctor data as received, before required-field checks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicoDraft {
    pub matricula: Option<i64>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub especialidad: Option<String>,
}

/// Validated data needed to create a doctor
#[derive(Debug, Clone)]
pub struct NewMedico {
    pub matricula: i64,
    pub nombre: String,
    pub email: String,
    pub especialidad: String,
}

/// Partial update for a doctor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicoPatch {
    pub matricula: Option<i64>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub especialidad: Option<String>,
}

impl Record for Medico {
    type New = NewMedico;
    type Patch = MedicoPatch;

    const COLLECTION: &'static str = "medicos";

    fn from_new(id: Identity, new: NewMedico) -> Self {
        Self {
            id,
            matricula: new.matricula,
            nombre: new.nombre,
            email: new.email,
            especialidad: new.especialidad,
        }
    }

    fn id(&self) -> Identity {
        self.id
    }

    fn patched(&self, patch: MedicoPatch) -> Self {
        Self {
            id: self.id,
            matricula: merge(patch.matricula, &self.matricula),
            nombre: merge(patch.nombre, &self.nombre),
            email: merge(patch.email, &self.email),
            especialidad: merge(patch.especialidad, &self.especialidad),
        }
    }
}
