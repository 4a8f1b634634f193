//! Medico service
//!
//! Required-field and license-uniqueness checks in front of the doctor store.

use std::sync::Arc;

use crate::domain::entities::{provided, Identity, Medico, MedicoDraft, MedicoPatch, NewMedico};
use crate::domain::ports::MedicoRepository;
use crate::error::{AppError, DomainError};

/// Service for managing doctors
pub struct MedicoService<MR>
where
    MR: MedicoRepository,
{
    medicos: Arc<MR>,
}

impl<MR> MedicoService<MR>
where
    MR: MedicoRepository,
{
    pub fn new(medicos: Arc<MR>) -> Self {
        Self { medicos }
    }

    /// All doctors in insertion order
    pub async fn list(&self) -> Result<Vec<Medico>, AppError> {
        Ok(self.medicos.get_all().await?)
    }

    pub async fn find_by_id(&self, id: Identity) -> Result<Option<Medico>, AppError> {
        Ok(self.medicos.get_by_id(id).await?)
    }

    pub async fn find_by_matricula(&self, matricula: i64) -> Result<Option<Medico>, AppError> {
        Ok(self.medicos.find_by_matricula(matricula).await?)
    }

    /// Register a new doctor
    ///
    /// Fails when nombre, matricula, especialidad or email is missing, or
    /// when the matricula is already registered.
    pub async fn create(&self, draft: MedicoDraft) -> Result<Medico, AppError> {
        let nombre = provided(draft.nombre).ok_or_else(|| invalid("Nombre es requerido"))?;
        let matricula =
            provided(draft.matricula).ok_or_else(|| invalid("Matricula es requerida"))?;
        let especialidad =
            provided(draft.especialidad).ok_or_else(|| invalid("Especialidad es requerida"))?;
        let email = provided(draft.email).ok_or_else(|| invalid("Email es requerido"))?;

        if self.medicos.find_by_matricula(matricula).await?.is_some() {
            return Err(invalid("Matricula ya existe"));
        }

        let medico = self
            .medicos
            .create(NewMedico {
                matricula,
                nombre,
                email,
                especialidad,
            })
            .await?;

        tracing::info!(id = medico.id, matricula = medico.matricula, "Registered medico");
        Ok(medico)
    }

    /// Patch a doctor. `None` when the doctor does not exist.
    ///
    /// The patch is not re-validated; a new matricula is not checked for
    /// uniqueness.
    pub async fn update(
        &self,
        id: Identity,
        patch: MedicoPatch,
    ) -> Result<Option<Medico>, AppError> {
        if self.medicos.get_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let updated = self.medicos.update(id, patch).await?;
        tracing::debug!(id, "Updated medico");
        Ok(updated)
    }

    /// Remove a doctor. Their appointments are left in place.
    pub async fn delete(&self, id: Identity) -> Result<bool, AppError> {
        if self.medicos.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.medicos.delete(id).await?;
        tracing::info!(id, "Deleted medico");
        Ok(deleted)
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Domain(DomainError::Validation(message.to_string()))
}
