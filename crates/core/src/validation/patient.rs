use serde::{Deserialize, Serialize};

use super::{require, require_email, FieldErrors, Validate};

/// Patient registration form for the persistence backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDraft {
    pub nombre: String,
    pub apellidos: String,
    pub dni: String,
    pub genero: String,
    pub direccion: String,
    pub email: String,
    pub telefono: String,
    pub fecha_nacimiento: String,
}

impl Validate for PatientDraft {
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
        require(&mut errors, "genero", &self.genero, "Selecciona un género");
        require(
            &mut errors,
            "direccion",
            &self.direccion,
            "La dirección es requerida",
        );
        require_email(&mut errors, "email", &self.email);
        require(
            &mut errors,
            "telefono",
            &self.telefono,
            "El teléfono es requerido",
        );
        require(
            &mut errors,
            "fechaNacimiento",
            &self.fecha_nacimiento,
            "La fecha de nacimiento es requerida",
        );

        errors
    }
}
