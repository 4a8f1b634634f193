//! Entity-specific queries on top of `JsonFileStore`

use async_trait::async_trait;

use super::store::JsonFileStore;
use crate::domain::entities::{Identity, Medico, Paciente, Turno};
use crate::domain::ports::{MedicoRepository, PacienteRepository, TurnoRepository};
use crate::error::DomainError;

/// Snapshot-file implementation of MedicoRepository
pub type JsonMedicoRepository = JsonFileStore<Medico>;

/// Snapshot-file implementation of PacienteRepository
pub type JsonPacienteRepository = JsonFileStore<Paciente>;

/// Snapshot-file implementation of TurnoRepository
pub type JsonTurnoRepository = JsonFileStore<Turno>;

#[async_trait]
impl MedicoRepository for JsonFileStore<Medico> {
    async fn find_by_matricula(&self, matricula: i64) -> Result<Option<Medico>, DomainError> {
        Ok(self.find(|m| m.matricula == matricula).await)
    }
}

#[async_trait]
impl PacienteRepository for JsonFileStore<Paciente> {
    async fn find_by_dni(&self, dni: i64) -> Result<Option<Paciente>, DomainError> {
        Ok(self.find(|p| p.dni == dni).await)
    }
}

#[async_trait]
impl TurnoRepository for JsonFileStore<Turno> {
    async fn find_by_medico(&self, medico: Identity) -> Result<Vec<Turno>, DomainError> {
        Ok(self.filter(|t| t.medico == medico).await)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::ports::Repository;
    use crate::test_utils::{new_medico, new_paciente, new_turno};

    #[tokio::test]
    async fn find_by_matricula_returns_first_match() {
        let dir = TempDir::new().unwrap();
        let repo = JsonMedicoRepository::open_in(dir.path()).await;
        // The store itself does not reject duplicates
        let first = repo.create(new_medico(100)).await.unwrap();
        repo.create(new_medico(100)).await.unwrap();

        let found = repo.find_by_matricula(100).await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(repo.find_by_matricula(101).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_dni() {
        let dir = TempDir::new().unwrap();
        let repo = JsonPacienteRepository::open_in(dir.path()).await;
        repo.create(new_paciente(5_000_000)).await.unwrap();

        assert!(repo.find_by_dni(5_000_000).await.unwrap().is_some());
        assert!(repo.find_by_dni(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_medico_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let repo = JsonTurnoRepository::open_in(dir.path()).await;

        let mut late = new_turno(1, 1);
        late.fecha = "2024-06-01".to_string();
        let mut early = new_turno(1, 2);
        early.fecha = "2024-01-01".to_string();

        repo.create(late).await.unwrap();
        repo.create(new_turno(2, 1)).await.unwrap();
        repo.create(early).await.unwrap();

        let turnos = repo.find_by_medico(1).await.unwrap();
        let fechas: Vec<_> = turnos.iter().map(|t| t.fecha.as_str()).collect();
        assert_eq!(fechas, vec!["2024-06-01", "2024-01-01"]);
    }

    #[tokio::test]
    async fn stores_use_separate_snapshot_files() {
        let dir = TempDir::new().unwrap();
        let medicos = JsonMedicoRepository::open_in(dir.path()).await;
        let pacientes = JsonPacienteRepository::open_in(dir.path()).await;

        medicos.create(new_medico(100)).await.unwrap();
        pacientes.create(new_paciente(1)).await.unwrap();

        assert!(dir.path().join("medicos.json").exists());
        assert!(dir.path().join("pacientes.json").exists());
        assert!(!dir.path().join("turnos.json").exists());
    }
}
