use super::Slice;
use crate::filter::keys;
use crate::model::Appointment;
use crate::CoreResult;

/// Admin dashboard actions.
#[derive(Clone, Debug)]
pub enum AppointmentAction {
    SetAppointments(Vec<Appointment>),
    SetSearch(String),
    SetStatus(String),
    SetGender(String),
    SetAgeBracket(String),
    SetType(String),
    ResetFilters,
    /// Opens (`Some(id)`) or closes (`None`) the detail view.
    Select(Option<String>),
}

pub(super) fn reduce(slice: &mut Slice<Appointment>, action: AppointmentAction) -> CoreResult<()> {
    match action {
        AppointmentAction::SetAppointments(items) => slice.replace_items(items)?,
        AppointmentAction::SetSearch(value) => slice.set_filter(keys::QUERY, value),
        AppointmentAction::SetStatus(value) => slice.set_filter(keys::STATUS, value),
        AppointmentAction::SetGender(value) => slice.set_filter(keys::GENDER, value),
        AppointmentAction::SetAgeBracket(value) => slice.set_filter(keys::AGE, value),
        AppointmentAction::SetType(value) => slice.set_filter(keys::TYPE, value),
        AppointmentAction::ResetFilters => slice.reset_filters(),
        AppointmentAction::Select(id) => slice.select(id)?,
    }
    Ok(())
}
