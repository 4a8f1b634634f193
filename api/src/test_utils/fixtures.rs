//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{
    Identity, MedicoDraft, NewMedico, NewPaciente, NewTurno, Paciente, PacienteDraft, TurnoDraft,
    TurnoEstado,
};

/// Validated doctor data with a given license number
pub fn new_medico(matricula: i64) -> NewMedico {
    NewMedico {
        matricula,
        nombre: format!("Dr {}", matricula),
        email: format!("medico{}@clinica.test", matricula),
        especialidad: "Cardio".to_string(),
    }
}

/// Validated patient data with a given national id
pub fn new_paciente(dni: i64) -> NewPaciente {
    NewPaciente {
        dni,
        nombre: "B".to_string(),
        apellido: "C".to_string(),
        email: String::new(),
    }
}

/// Validated appointment on 2024-05-01 at 10:30
pub fn new_turno(medico: Identity, paciente: Identity) -> NewTurno {
    NewTurno {
        medico,
        paciente,
        fecha: "2024-05-01".to_string(),
        hora: "10:30".to_string(),
        estado: TurnoEstado::Pendiente,
    }
}

/// A stored patient record
pub fn test_paciente(id: Identity) -> Paciente {
    Paciente {
        id,
        dni: 5_000_000 + id,
        nombre: "B".to_string(),
        apellido: "C".to_string(),
        email: "b@c.com".to_string(),
    }
}

/// Complete doctor payload as a client would send it
pub fn medico_draft() -> MedicoDraft {
    MedicoDraft {
        matricula: Some(100),
        nombre: Some("Dr A".to_string()),
        email: Some("a@x.com".to_string()),
        especialidad: Some("Cardio".to_string()),
    }
}

/// Complete patient payload as a client would send it
pub fn paciente_draft() -> PacienteDraft {
    PacienteDraft {
        dni: Some(5_000_000),
        nombre: Some("B".to_string()),
        apellido: Some("C".to_string()),
        email: None,
    }
}

/// Complete appointment payload as a client would send it
pub fn turno_draft(medico: Identity, paciente: Identity) -> TurnoDraft {
    TurnoDraft {
        medico: Some(medico),
        paciente: Some(paciente),
        fecha_hora: Some("2024-05-01T10:30:00".to_string()),
        estado: None,
    }
}
