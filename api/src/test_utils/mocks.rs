//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::entities::{
    Identity, NewPaciente, NewTurno, Paciente, PacientePatch, Record, Turno, TurnoPatch,
};
use crate::domain::ports::{PacienteRepository, Repository, TurnoRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Paciente Repository
// ============================================================================

/// Patient repository that counts identity lookups
#[derive(Default)]
pub struct InMemoryPacienteRepository {
    pacientes: RwLock<Vec<Paciente>>,
    lookups: AtomicUsize,
}

impl InMemoryPacienteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a patient for testing
    pub fn with_paciente(self, paciente: Paciente) -> Self {
        self.pacientes.write().unwrap().push(paciente);
        self
    }

    /// Number of `get_by_id` calls so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Repository<Paciente> for InMemoryPacienteRepository {
    async fn get_all(&self) -> Result<Vec<Paciente>, DomainError> {
        Ok(self.pacientes.read().unwrap().clone())
    }

    async fn get_by_id(&self, id: Identity) -> Result<Option<Paciente>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let pacientes = self.pacientes.read().unwrap();
        Ok(pacientes.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewPaciente) -> Result<Paciente, DomainError> {
        let mut pacientes = self.pacientes.write().unwrap();
        let id = pacientes.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let paciente = Paciente::from_new(id, new);
        pacientes.push(paciente.clone());
        Ok(paciente)
    }

    async fn update(
        &self,
        id: Identity,
        patch: PacientePatch,
    ) -> Result<Option<Paciente>, DomainError> {
        let mut pacientes = self.pacientes.write().unwrap();
        Ok(pacientes.iter_mut().find(|p| p.id == id).map(|slot| {
            *slot = slot.patched(patch);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Identity) -> Result<bool, DomainError> {
        let mut pacientes = self.pacientes.write().unwrap();
        let before = pacientes.len();
        pacientes.retain(|p| p.id != id);
        Ok(pacientes.len() < before)
    }
}

#[async_trait]
impl PacienteRepository for InMemoryPacienteRepository {
    async fn find_by_dni(&self, dni: i64) -> Result<Option<Paciente>, DomainError> {
        let pacientes = self.pacientes.read().unwrap();
        Ok(pacientes.iter().find(|p| p.dni == dni).cloned())
    }
}

// ============================================================================
// Failing Turno Repository
// ============================================================================

/// Turno repository whose reads see `turnos` and whose writes all fail
#[derive(Default)]
pub struct FailingTurnoRepository {
    pub turnos: Vec<Turno>,
}

impl FailingTurnoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage_error() -> DomainError {
        DomainError::Storage("disk unavailable".to_string())
    }
}

#[async_trait]
impl Repository<Turno> for FailingTurnoRepository {
    async fn get_all(&self) -> Result<Vec<Turno>, DomainError> {
        Ok(self.turnos.clone())
    }

    async fn get_by_id(&self, id: Identity) -> Result<Option<Turno>, DomainError> {
        Ok(self.turnos.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, _new: NewTurno) -> Result<Turno, DomainError> {
        Err(Self::storage_error())
    }

    async fn update(&self, _id: Identity, _patch: TurnoPatch) -> Result<Option<Turno>, DomainError> {
        Err(Self::storage_error())
    }

    async fn delete(&self, _id: Identity) -> Result<bool, DomainError> {
        Err(Self::storage_error())
    }
}

#[async_trait]
impl TurnoRepository for FailingTurnoRepository {
    async fn find_by_medico(&self, medico: Identity) -> Result<Vec<Turno>, DomainError> {
        Ok(self
            .turnos
            .iter()
            .filter(|t| t.medico == medico)
            .cloned()
            .collect())
    }
}
