use serde::{Deserialize, Serialize};

use super::{ends_after, require, require_some, FieldErrors, Validate};
use crate::model::AppointmentType;

/// Appointment booking form, sent to the backend as a create/update cita request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    #[serde(default)]
    pub paciente_id: Option<u64>,
    #[serde(default)]
    pub medico_id: Option<u64>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub fecha_cita: String,
    /// `HH:MM`.
    #[serde(default)]
    pub hora_entrada: String,
    #[serde(default)]
    pub hora_salida: String,
    #[serde(default = "default_tipo_cita")]
    pub tipo_cita: AppointmentType,
    #[serde(default)]
    pub especialidad: String,
    #[serde(default)]
    pub motivo: String,
}

fn default_tipo_cita() -> AppointmentType {
    AppointmentType::Presencial
}

impl Default for AppointmentDraft {
    fn default() -> Self {
        Self {
            paciente_id: None,
            medico_id: None,
            fecha_cita: String::new(),
            hora_entrada: String::new(),
            hora_salida: String::new(),
            tipo_cita: default_tipo_cita(),
            especialidad: String::new(),
            motivo: String::new(),
        }
    }
}

impl Validate for AppointmentDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        require_some(&mut errors, "pacienteId", &self.paciente_id, "Selecciona un paciente");
        require_some(&mut errors, "medicoId", &self.medico_id, "Selecciona un médico");
        require(&mut errors, "fechaCita", &self.fecha_cita, "La fecha es requerida");
        require(
            &mut errors,
            "horaEntrada",
            &self.hora_entrada,
            "La hora de entrada es requerida",
        );
        require(
            &mut errors,
            "horaSalida",
            &self.hora_salida,
            "La hora de salida es requerida",
        );
        require(
            &mut errors,
            "especialidad",
            &self.especialidad,
            "Selecciona una especialidad",
        );
        require(&mut errors, "motivo", &self.motivo, "El motivo es requerido");

        let start = self.hora_entrada.trim();
        let end = self.hora_salida.trim();
        if !start.is_empty() && !end.is_empty() && !ends_after(start, end) {
            errors.insert(
                "horaSalida",
                "La hora de salida debe ser después de la hora de entrada",
            );
        }

        errors
    }
}
