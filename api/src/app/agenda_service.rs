//! Agenda service
//!
//! Builds a doctor's agenda: each of their appointments joined with the
//! full patient record. A patient reference that no longer resolves yields
//! a view without `paciente` instead of failing the whole agenda.

use std::sync::Arc;

use serde::Serialize;

use crate::app::{PacienteService, TurnoService};
use crate::domain::entities::{Medico, Paciente, TurnoEstado};
use crate::domain::ports::{PacienteRepository, TurnoRepository};
use crate::error::AppError;

/// One appointment of a doctor's agenda
#[derive(Debug, Clone, Serialize)]
pub struct AgendaEntry {
    pub medico: Medico,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paciente: Option<Paciente>,
    pub fecha: String,
    pub hora: String,
    pub estado: TurnoEstado,
}

/// Cross-entity view over appointments and patients
pub struct AgendaService<TR, PR>
where
    TR: TurnoRepository,
    PR: PacienteRepository,
{
    turnos: Arc<TurnoService<TR>>,
    pacientes: Arc<PacienteService<PR>>,
}

impl<TR, PR> AgendaService<TR, PR>
where
    TR: TurnoRepository,
    PR: PacienteRepository,
{
    pub fn new(turnos: Arc<TurnoService<TR>>, pacientes: Arc<PacienteService<PR>>) -> Self {
        Self { turnos, pacientes }
    }

    /// Agenda of `medico`, in the order its appointments were booked.
    ///
    /// `medico` is used as given; it is not re-read, so a doctor deleted
    /// after being looked up still gets their appointments listed.
    pub async fn for_medico(&self, medico: &Medico) -> Result<Vec<AgendaEntry>, AppError> {
        let turnos = self.turnos.find_by_medico(medico).await?;

        let mut agenda = Vec::with_capacity(turnos.len());
        for turno in turnos {
            let paciente = self.pacientes.find_by_id(turno.paciente).await?;
            if paciente.is_none() {
                tracing::debug!(
                    turno = turno.id,
                    paciente = turno.paciente,
                    "Turno references a missing paciente"
                );
            }

            agenda.push(AgendaEntry {
                medico: medico.clone(),
                paciente,
                fecha: turno.fecha,
                hora: turno.hora,
                estado: turno.estado,
            });
        }

        Ok(agenda)
    }
}
