//! Turno service
//!
//! Appointment creation and maintenance. Creation checks that a doctor, a
//! patient and a timestamp were supplied, then stores the clinic-local date
//! and time derived from the timestamp.
//!
//! Not checked: that the doctor and patient exist, and that the slot is
//! free. Two appointments may share a doctor, patient and time.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::domain::entities::{
    provided, split_fecha_hora, Identity, Medico, NewTurno, Turno, TurnoDraft, TurnoPatch,
};
use crate::domain::ports::TurnoRepository;
use crate::error::{AppError, DomainError};

/// Service for managing appointments
pub struct TurnoService<TR>
where
    TR: TurnoRepository,
{
    turnos: Arc<TR>,
    clinic_offset: FixedOffset,
}

impl<TR> TurnoService<TR>
where
    TR: TurnoRepository,
{
    /// `clinic_offset` is the zone timestamps with an offset are converted to
    pub fn new(turnos: Arc<TR>, clinic_offset: FixedOffset) -> Self {
        Self {
            turnos,
            clinic_offset,
        }
    }

    pub async fn list(&self) -> Result<Vec<Turno>, AppError> {
        Ok(self.turnos.get_all().await?)
    }

    pub async fn find_by_id(&self, id: Identity) -> Result<Option<Turno>, AppError> {
        Ok(self.turnos.get_by_id(id).await?)
    }

    /// Appointments of a doctor in insertion order (not date order)
    pub async fn find_by_medico(&self, medico: &Medico) -> Result<Vec<Turno>, AppError> {
        Ok(self.turnos.find_by_medico(medico.id).await?)
    }

    /// Book an appointment
    pub async fn create(&self, draft: TurnoDraft) -> Result<Turno, AppError> {
        let medico = provided(draft.medico).ok_or_else(|| invalid("Medico es requerido"))?;
        let paciente = provided(draft.paciente).ok_or_else(|| invalid("Paciente es requerido"))?;
        let fecha_hora =
            provided(draft.fecha_hora).ok_or_else(|| invalid("FechaHora es requerida"))?;

        let (fecha, hora) = split_fecha_hora(&fecha_hora, self.clinic_offset)?;

        let turno = self
            .turnos
            .create(NewTurno {
                medico,
                paciente,
                fecha,
                hora,
                estado: draft.estado.unwrap_or_default(),
            })
            .await?;

        tracing::info!(
            id = turno.id,
            medico = turno.medico,
            paciente = turno.paciente,
            fecha = %turno.fecha,
            hora = %turno.hora,
            "Booked turno"
        );
        Ok(turno)
    }

    /// Patch an appointment. Any estado may be set, in either direction.
    pub async fn update(&self, id: Identity, patch: TurnoPatch) -> Result<Option<Turno>, AppError> {
        if self.turnos.get_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let updated = self.turnos.update(id, patch).await?;
        tracing::debug!(id, "Updated turno");
        Ok(updated)
    }

    pub async fn delete(&self, id: Identity) -> Result<bool, AppError> {
        if self.turnos.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.turnos.delete(id).await?;
        tracing::info!(id, "Cancelled turno");
        Ok(deleted)
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Domain(DomainError::Validation(message.to_string()))
}
