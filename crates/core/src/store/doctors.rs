use super::Slice;
use crate::filter::keys;
use crate::model::Doctor;
use crate::CoreResult;

/// Doctor directory actions.
#[derive(Clone, Debug)]
pub enum DoctorAction {
    SetDoctors(Vec<Doctor>),
    SetSpecialty(String),
    SetSearchQuery(String),
    SetAvailability(String),
    SetLanguage(String),
    ResetFilters,
    /// Appends to the end of the directory.
    AddDoctor(Doctor),
    SetLoading(bool),
    SetError(Option<String>),
}

pub(super) fn reduce(slice: &mut Slice<Doctor>, action: DoctorAction) -> CoreResult<()> {
    match action {
        DoctorAction::SetDoctors(doctors) => slice.replace_items(doctors)?,
        DoctorAction::SetSpecialty(value) => slice.set_filter(keys::SPECIALTY, value),
        DoctorAction::SetSearchQuery(value) => slice.set_filter(keys::QUERY, value),
        DoctorAction::SetAvailability(value) => slice.set_filter(keys::AVAILABILITY, value),
        DoctorAction::SetLanguage(value) => slice.set_filter(keys::LANGUAGE, value),
        DoctorAction::ResetFilters => slice.reset_filters(),
        DoctorAction::AddDoctor(doctor) => slice.append(doctor)?,
        DoctorAction::SetLoading(loading) => slice.loading = loading,
        DoctorAction::SetError(error) => slice.error = error,
    }
    Ok(())
}
