//! Turno domain entity
//!
//! An appointment linking one doctor and one patient to a date, a time of
//! day and a status. The combined timestamp supplied at creation is split
//! into `fecha` and `hora`; only the split fields are stored.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::record::{merge, Identity, Record};
use crate::error::DomainError;

/// Naive timestamp layouts accepted for `fechaHora`, tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Appointment status
///
/// No transition guard exists: any update may set either value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnoEstado {
    #[default]
    Pendiente,
    Atendido,
}

impl std::fmt::Display for TurnoEstado {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnoEstado::Pendiente => write!(f, "Pendiente"),
            TurnoEstado::Atendido => write!(f, "Atendido"),
        }
    }
}

impl std::str::FromStr for TurnoEstado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pendiente" => Ok(TurnoEstado::Pendiente),
            "atendido" => Ok(TurnoEstado::Atendido),
            _ => Err(format!("Estado desconocido: {}", s)),
        }
    }
}

/// An appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turno {
    pub id: Identity,
    /// Doctor identity (not checked for existence)
    pub medico: Identity,
    /// Patient identity (not checked for existence)
    pub paciente: Identity,
    /// Calendar date, `YYYY-MM-DD`
    pub fecha: String,
    /// Clinic-local time of day, `HH:MM`
    pub hora: String,
    #[serde(default)]
    pub estado: TurnoEstado,
}

/// Appointment data as received, before required-field checks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoDraft {
    pub medico: Option<Identity>,
    pub paciente: Option<Identity>,
    pub fecha_hora: Option<String>,
    #[serde(default, deserialize_with = "estado_or_blank")]
    pub estado: Option<TurnoEstado>,
}

/// Validated data needed to create an appointment
#[derive(Debug, Clone)]
pub struct NewTurno {
    pub medico: Identity,
    pub paciente: Identity,
    pub fecha: String,
    pub hora: String,
    pub estado: TurnoEstado,
}

/// Partial update for an appointment
///
/// `fecha` and `hora` are written as given; they are not re-derived.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnoPatch {
    pub medico: Option<Identity>,
    pub paciente: Option<Identity>,
    pub fecha: Option<String>,
    pub hora: Option<String>,
    #[serde(default, deserialize_with = "estado_or_blank")]
    pub estado: Option<TurnoEstado>,
}

/// An empty or null estado counts as absent
fn estado_or_blank<'de, D>(deserializer: D) -> Result<Option<TurnoEstado>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl Record for Turno {
    type New = NewTurno;
    type Patch = TurnoPatch;

    const COLLECTION: &'static str = "turnos";

    fn from_new(id: Identity, new: NewTurno) -> Self {
        Self {
            id,
            medico: new.medico,
            paciente: new.paciente,
            fecha: new.fecha,
            hora: new.hora,
            estado: new.estado,
        }
    }

    fn id(&self) -> Identity {
        self.id
    }

    fn patched(&self, patch: TurnoPatch) -> Self {
        Self {
            id: self.id,
            medico: merge(patch.medico, &self.medico),
            paciente: merge(patch.paciente, &self.paciente),
            fecha: merge(patch.fecha, &self.fecha),
            hora: merge(patch.hora, &self.hora),
            estado: patch.estado.unwrap_or(self.estado),
        }
    }
}

/// Split a combined timestamp into clinic-local `(fecha, hora)`.
///
/// Timestamps with an offset are converted to `clinic_offset`. Naive
/// timestamps are already clinic wall-clock time. A bare date means
/// midnight.
pub fn split_fecha_hora(
    input: &str,
    clinic_offset: FixedOffset,
) -> Result<(String, String), DomainError> {
    let input = input.trim();

    let local = if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        dt.with_timezone(&clinic_offset).naive_local()
    } else if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        naive
    } else if let Some(midnight) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        midnight
    } else {
        return Err(DomainError::Validation("FechaHora invalida".to_string()));
    };

    Ok((
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M").to_string(),
    ))
}
