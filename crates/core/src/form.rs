//! Submission flow shared by the back-office forms.
//!
//! A [`FormSession`] owns one draft. Submitting validates locally first and only calls the
//! [`Submitter`] when there are no field errors. `submit` borrows the session mutably, so a
//! second submission cannot start while one is in flight.

use crate::validation::{AppointmentDraft, DoctorDraft, FieldErrors, PatientDraft, Validate};
use async_trait::async_trait;

/// An error that can be shown to the user as one line.
pub trait BannerMessage {
    fn banner(&self) -> String;
}

/// Sends a validated draft somewhere and returns what was stored.
#[async_trait]
pub trait Submitter<D: Sync>: Send + Sync {
    type Output: Send;
    type Error: BannerMessage + Send;

    async fn submit(&self, draft: &D) -> Result<Self::Output, Self::Error>;
}

/// A draft with the messages its form shows after submission.
pub trait FormDraft: Validate + Default + Clone + Send + Sync {
    const SAVED: &'static str;
    /// Used when the failure carries no message of its own.
    const SAVE_FAILED: &'static str;
}

impl FormDraft for AppointmentDraft {
    const SAVED: &'static str = "Cita guardada exitosamente";
    const SAVE_FAILED: &'static str = "Error al guardar la cita";
}

impl FormDraft for DoctorDraft {
    const SAVED: &'static str = "Médico guardado exitosamente";
    const SAVE_FAILED: &'static str = "Error al guardar el médico";
}

impl FormDraft for PatientDraft {
    const SAVED: &'static str = "Paciente guardado exitosamente";
    const SAVE_FAILED: &'static str = "Error al guardar el paciente";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    /// Blank form; cleared after a successful save.
    Create,
    /// Pre-filled form; kept as-is after a successful save.
    Edit,
}

#[derive(Clone, Debug)]
pub struct FormSession<D> {
    draft: D,
    mode: FormMode,
    errors: FieldErrors,
    success: Option<&'static str>,
    failure: Option<String>,
}

impl<D: FormDraft> FormSession<D> {
    pub fn create() -> Self {
        Self::with_mode(D::default(), FormMode::Create)
    }

    pub fn edit(initial: D) -> Self {
        Self::with_mode(initial, FormMode::Edit)
    }

    fn with_mode(draft: D, mode: FormMode) -> Self {
        Self {
            draft,
            mode,
            errors: FieldErrors::new(),
            success: None,
            failure: None,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Edits the draft through `apply` and drops any error shown for `field`.
    pub fn edit_field(&mut self, field: &str, apply: impl FnOnce(&mut D)) {
        apply(&mut self.draft);
        self.errors.clear(field);
    }

    /// Validates and, if clean, hands the draft to `submitter`.
    ///
    /// Returns the stored record on success. On failure the field errors or the banner are
    /// updated and `None` is returned; the draft is left untouched so the user can retry.
    pub async fn submit<S>(&mut self, submitter: &S) -> Option<S::Output>
    where
        S: Submitter<D>,
    {
        self.success = None;
        self.failure = None;

        self.errors = self.draft.validate();
        if !self.errors.is_empty() {
            tracing::debug!("form has {} invalid fields", self.errors.len());
            return None;
        }

        match submitter.submit(&self.draft).await {
            Ok(stored) => {
                self.success = Some(D::SAVED);
                if self.mode == FormMode::Create {
                    self.draft = D::default();
                }
                Some(stored)
            }
            Err(err) => {
                let banner = err.banner();
                tracing::warn!("form submission failed: {banner}");
                self.failure = Some(if banner.trim().is_empty() {
                    D::SAVE_FAILED.to_string()
                } else {
                    banner
                });
                None
            }
        }
    }
}
