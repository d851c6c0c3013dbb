//! Dashboard summary counts over appointments.

use crate::model::{Appointment, AppointmentStatus, AppointmentType};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals shown above the admin appointment table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStats {
    pub total: usize,
    /// Count per status wire value; every status is present, zero or not.
    pub by_status: BTreeMap<&'static str, usize>,
    pub by_type: BTreeMap<&'static str, usize>,
}

impl AppointmentStats {
    pub fn from_appointments<'a, I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut stats = Self {
            total: 0,
            by_status: AppointmentStatus::ALL
                .iter()
                .map(|s| (s.as_str(), 0))
                .collect(),
            by_type: AppointmentType::ALL
                .iter()
                .map(|t| (t.as_str(), 0))
                .collect(),
        };

        for appointment in appointments {
            stats.total += 1;
            *stats.by_status.entry(appointment.status.as_str()).or_default() += 1;
            *stats
                .by_type
                .entry(appointment.appointment_type.as_str())
                .or_default() += 1;
        }

        stats
    }

    pub fn status(&self, status: AppointmentStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    pub fn kind(&self, appointment_type: AppointmentType) -> usize {
        self.by_type
            .get(appointment_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}
