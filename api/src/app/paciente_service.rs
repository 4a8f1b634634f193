//! Paciente service
//!
//! Handles patient registration and maintenance.

use std::sync::Arc;

use crate::domain::entities::{
    provided, Identity, NewPaciente, Paciente, PacienteDraft, PacientePatch,
};
use crate::domain::ports::PacienteRepository;
use crate::error::{AppError, DomainError};

/// Service for managing patients
pub struct PacienteService<PR>
where
    PR: PacienteRepository,
{
    pacientes: Arc<PR>,
}

impl<PR> PacienteService<PR>
where
    PR: PacienteRepository,
{
    pub fn new(pacientes: Arc<PR>) -> Self {
        Self { pacientes }
    }

    pub async fn list(&self) -> Result<Vec<Paciente>, AppError> {
        Ok(self.pacientes.get_all().await?)
    }

    pub async fn find_by_id(&self, id: Identity) -> Result<Option<Paciente>, AppError> {
        Ok(self.pacientes.get_by_id(id).await?)
    }

    pub async fn find_by_dni(&self, dni: i64) -> Result<Option<Paciente>, AppError> {
        Ok(self.pacientes.find_by_dni(dni).await?)
    }

    /// Register a new patient
    ///
    /// nombre, apellido and dni are required; the dni must be unused.
    pub async fn create(&self, draft: PacienteDraft) -> Result<Paciente, AppError> {
        let nombre = provided(draft.nombre).ok_or_else(|| invalid("Nombre es requerido"))?;
        let apellido = provided(draft.apellido).ok_or_else(|| invalid("Apellido es requerido"))?;
        let dni = provided(draft.dni).ok_or_else(|| invalid("DNI es requerido"))?;

        if self.pacientes.find_by_dni(dni).await?.is_some() {
            return Err(invalid("Paciente ya existe"));
        }

        let paciente = self
            .pacientes
            .create(NewPaciente {
                dni,
                nombre,
                apellido,
                email: draft.email.unwrap_or_default(),
            })
            .await?;

        tracing::info!(id = paciente.id, "Registered paciente");
        Ok(paciente)
    }

    pub async fn update(
        &self,
        id: Identity,
        patch: PacientePatch,
    ) -> Result<Option<Paciente>, AppError> {
        if self.pacientes.get_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let updated = self.pacientes.update(id, patch).await?;
        tracing::debug!(id, "Updated paciente");
        Ok(updated)
    }

    /// Remove a patient. Appointments referencing them are left in place.
    pub async fn delete(&self, id: Identity) -> Result<bool, AppError> {
        if self.pacientes.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.pacientes.delete(id).await?;
        tracing::info!(id, "Deleted paciente");
        Ok(deleted)
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Domain(DomainError::Validation(message.to_string()))
}
