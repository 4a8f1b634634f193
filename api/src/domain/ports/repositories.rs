//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., JSON snapshot files).
//!
//! Stores do not enforce uniqueness of matricula or dni; services do.

use async_trait::async_trait;

use crate::domain::entities::{Identity, Medico, Paciente, Record, Turno};
use crate::error::DomainError;

/// Identity-keyed storage for one entity type
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// All records in insertion order, as an owned copy
    async fn get_all(&self) -> Result<Vec<R>, DomainError>;

    /// Find a record by identity
    async fn get_by_id(&self, id: Identity) -> Result<Option<R>, DomainError>;

    /// Issue the next identity, store the record and persist
    async fn create(&self, new: R::New) -> Result<R, DomainError>;

    /// Apply a patch. `None` when no record has this identity.
    async fn update(&self, id: Identity, patch: R::Patch) -> Result<Option<R>, DomainError>;

    /// Remove a record. `false` when no record has this identity.
    async fn delete(&self, id: Identity) -> Result<bool, DomainError>;
}

/// Repository for Medico records
#[async_trait]
pub trait MedicoRepository: Repository<Medico> {
    /// First doctor with this license number
    async fn find_by_matricula(&self, matricula: i64) -> Result<Option<Medico>, DomainError>;
}

/// Repository for Paciente records
#[async_trait]
pub trait PacienteRepository: Repository<Paciente> {
    /// First patient with this national id
    async fn find_by_dni(&self, dni: i64) -> Result<Option<Paciente>, DomainError>;
}

/// Repository for Turno records
#[async_trait]
pub trait TurnoRepository: Repository<Turno> {
    /// Appointments of one doctor, in insertion order
    async fn find_by_medico(&self, medico: Identity) -> Result<Vec<Turno>, DomainError>;
}
