//! Bodies of the `POST /validate/*` endpoints.
//!
//! Field names match the backend's create requests, so the keys in [`ValidationRes::errors`] can
//! be matched directly against form inputs.

use citas_core::validation::{AppointmentDraft, DoctorDraft, PatientDraft, RegistrationDraft};
use citas_core::FieldErrors;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateAppointmentReq {
    pub paciente_id: Option<u64>,
    pub medico_id: Option<u64>,
    pub fecha_cita: String,
    pub hora_entrada: String,
    pub hora_salida: String,
    /// `presencial` (default) or `virtual`.
    pub tipo_cita: Option<String>,
    pub especialidad: String,
    pub motivo: String,
}

impl TryFrom<ValidateAppointmentReq> for AppointmentDraft {
    type Error = citas_core::CoreError;

    fn try_from(req: ValidateAppointmentReq) -> Result<Self, Self::Error> {
        let tipo_cita = match req.tipo_cita.as_deref() {
            Some(value) => value.parse()?,
            None => AppointmentDraft::default().tipo_cita,
        };
        Ok(AppointmentDraft {
            paciente_id: req.paciente_id,
            medico_id: req.medico_id,
            fecha_cita: req.fecha_cita,
            hora_entrada: req.hora_entrada,
            hora_salida: req.hora_salida,
            tipo_cita,
            especialidad: req.especialidad,
            motivo: req.motivo,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateDoctorReq {
    pub nombre: String,
    pub apellidos: String,
    pub dni: String,
    pub email: String,
    pub especialidad: String,
    pub fecha_graduacion: String,
    pub fecha_incorporacion: String,
    pub genero: Option<String>,
}

impl From<ValidateDoctorReq> for DoctorDraft {
    fn from(req: ValidateDoctorReq) -> Self {
        DoctorDraft {
            nombre: req.nombre,
            apellidos: req.apellidos,
            dni: req.dni,
            email: req.email,
            especialidad: req.especialidad,
            fecha_graduacion: req.fecha_graduacion,
            fecha_incorporacion: req.fecha_incorporacion,
            genero: req.genero,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatePatientReq {
    pub nombre: String,
    pub apellidos: String,
    pub dni: String,
    pub genero: String,
    pub direccion: String,
    pub email: String,
    pub telefono: String,
    pub fecha_nacimiento: String,
}

impl From<ValidatePatientReq> for PatientDraft {
    fn from(req: ValidatePatientReq) -> Self {
        PatientDraft {
            nombre: req.nombre,
            apellidos: req.apellidos,
            dni: req.dni,
            genero: req.genero,
            direccion: req.direccion,
            email: req.email,
            telefono: req.telefono,
            fecha_nacimiento: req.fecha_nacimiento,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateRegistrationReq {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl From<ValidateRegistrationReq> for RegistrationDraft {
    fn from(req: ValidateRegistrationReq) -> Self {
        RegistrationDraft {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            password: req.password,
            confirm_password: req.confirm_password,
            accept_terms: req.accept_terms,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationRes {
    pub valid: bool,
    /// Wire field name → message.
    pub errors: BTreeMap<String, String>,
}

impl From<FieldErrors> for ValidationRes {
    fn from(errors: FieldErrors) -> Self {
        Self {
            valid: errors.is_empty(),
            errors: errors
                .iter()
                .map(|(field, message)| (field.to_string(), message.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citas_core::model::AppointmentType;
    use citas_core::Validate;

    #[test]
    fn test_appointment_request_type_parsing() {
        let draft = AppointmentDraft::try_from(ValidateAppointmentReq::default())
            .expect("missing type defaults");
        assert_eq!(draft.tipo_cita, AppointmentType::Presencial);

        let req = ValidateAppointmentReq {
            tipo_cita: Some("telefono".into()),
            ..Default::default()
        };
        assert!(AppointmentDraft::try_from(req).is_err());
    }

    #[test]
    fn test_validation_res_from_errors() {
        let errors = DoctorDraft::from(ValidateDoctorReq::default()).validate();
        let res = ValidationRes::from(errors);
        assert!(!res.valid);
        assert_eq!(res.errors["dni"], "El DNI es requerido");
    }
}
