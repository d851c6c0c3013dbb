use serde::{Deserialize, Serialize};

use super::{require, require_email, FieldErrors, Validate};
use crate::constants::MIN_PASSWORD_LEN;

const REQUIRED: &str = "Por favor completa todos los campos obligatorios";

/// Account creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl Validate for RegistrationDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        require(&mut errors, "fullName", &self.full_name, REQUIRED);
        require_email(&mut errors, "email", &self.email);

        if self.password.is_empty() {
            errors.insert("password", REQUIRED);
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres"),
            );
        }

        if self.confirm_password.is_empty() {
            errors.insert("confirmPassword", REQUIRED);
        } else if self.confirm_password != self.password {
            errors.insert("confirmPassword", "Las contraseñas no coinciden");
        }

        if !self.accept_terms {
            errors.insert("acceptTerms", "Debes aceptar los términos y condiciones");
        }

        errors
    }
}

/// Email and password sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl Validate for LoginDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "email", &self.email, "Por favor completa todos los campos");
        if self.password.is_empty() {
            errors.insert("password", "Por favor completa todos los campos");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegistrationDraft {
        RegistrationDraft {
            full_name: "Lucía Fernández".into(),
            email: "lucia@correo.es".into(),
            phone: None,
            password: "secreto".into(),
            confirm_password: "secreto".into(),
            accept_terms: true,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(valid_registration().is_valid());
    }

    #[test]
    fn test_password_rules() {
        let short = RegistrationDraft {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..valid_registration()
        };
        assert_eq!(
            short.validate().get("password"),
            Some("La contraseña debe tener al menos 6 caracteres")
        );

        let mismatch = RegistrationDraft {
            confirm_password: "secreta".into(),
            ..valid_registration()
        };
        let errors = mismatch.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirmPassword"), Some("Las contraseñas no coinciden"));

        // Length counts characters, not bytes.
        let accented = RegistrationDraft {
            password: "ñañañ".into(),
            confirm_password: "ñañañ".into(),
            ..valid_registration()
        };
        assert!(accented.validate().contains("password"));
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let draft = RegistrationDraft {
            accept_terms: false,
            ..valid_registration()
        };
        assert_eq!(
            draft.validate().get("acceptTerms"),
            Some("Debes aceptar los términos y condiciones")
        );
    }

    #[test]
    fn test_registration_wire_names() {
        let draft: RegistrationDraft = serde_json::from_str(
            r#"{"fullName":"A","email":"a@b.com","password":"123456","confirmPassword":"123456","acceptTerms":true}"#,
        )
        .expect("should parse");
        assert!(draft.is_valid());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginDraft::default().validate();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));

        let ok = LoginDraft {
            email: "x@y.com".into(),
            password: "p".into(),
        };
        assert!(ok.is_valid());
    }
}
