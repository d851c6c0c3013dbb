use serde::{Deserialize, Serialize};

use super::{require, require_email, FieldErrors, Validate};

/// Doctor registration form for the persistence backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorDraft {
    pub nombre: String,
    pub apellidos: String,
    pub dni: String,
    pub email: String,
    pub especialidad: String,
    pub fecha_graduacion: String,
    pub fecha_incorporacion: String,
    /// Only sent on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
}

impl Validate for DoctorDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        require(&mut errors, "nombre", &self.nombre, "El nombre es requerido");
        require(
            &mut errors,
            "apellidos",
            &self.apellidos,
            "Los apellidos son requeridos",
        );
        require(&mut errors, "dni", &self.dni, "El DNI es requerido");
        require_email(&mut errors, "email", &self.email);
        require(
            &mut errors,
            "especialidad",
            &self.especialidad,
            "Selecciona una especialidad",
        );
        require(
            &mut errors,
            "fechaGraduacion",
            &self.fecha_graduacion,
            "La fecha de graduación es requerida",
        );
        require(
            &mut errors,
            "fechaIncorporacion",
            &self.fecha_incorporacion,
            "La fecha de incorporación es requerida",
        );

        errors
    }
}
