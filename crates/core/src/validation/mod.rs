//! Form validation.
//!
//! Each draft type implements [`Validate`], returning a [`FieldErrors`] map keyed by the draft's
//! wire field name. An empty map means the draft may be submitted. Validation never fails and
//! never panics; a draft that is wrong in several places reports every offending field.
//!
//! Messages are the Spanish strings shown under each form field.

pub mod account;
pub mod appointment;
pub mod doctor;
pub mod patient;

pub use account::{LoginDraft, RegistrationDraft};
pub use appointment::AppointmentDraft;
pub use doctor::DoctorDraft;
pub use patient::PatientDraft;

use citas_types::{ClockTime, EmailAddress, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) const EMAIL_REQUIRED: &str = "El email es requerido";
pub(crate) const EMAIL_INVALID: &str = "Email inválido";

/// Per-field error messages. Keys are wire field names such as `horaSalida`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Records `message` for `field`, replacing any earlier message for it.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Drops the error for one field, e.g. when the user edits it.
    pub fn clear(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// One message for a single-line banner.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A form draft that can be checked before submission.
pub trait Validate {
    fn validate(&self) -> FieldErrors;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Required text: blank after trimming is an error.
pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if NonEmptyText::new(value).is_err() {
        errors.insert(field, message);
    }
}

/// Required selection: `None` is an error.
pub(crate) fn require_some<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: &Option<T>,
    message: &str,
) {
    if value.is_none() {
        errors.insert(field, message);
    }
}

/// Required email: blank reports "required", anything else must be well formed as given.
///
/// Surrounding whitespace is not stripped for the shape check; the value is sent as typed.
pub(crate) fn require_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if NonEmptyText::new(value).is_err() {
        errors.insert(field, EMAIL_REQUIRED);
    } else if EmailAddress::parse(value).is_err() {
        errors.insert(field, EMAIL_INVALID);
    }
}

/// `true` when `end` is strictly later than `start`.
///
/// Well-formed `HH:MM` values compare as clock times; anything else falls back to comparing the
/// raw strings, which agrees with the clock for zero-padded input.
pub(crate) fn ends_after(start: &str, end: &str) -> bool {
    match (start.parse::<ClockTime>(), end.parse::<ClockTime>()) {
        (Ok(start), Ok(end)) => end > start,
        _ => end > start,
    }
}
