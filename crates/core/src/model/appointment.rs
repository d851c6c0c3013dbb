use serde::{Deserialize, Serialize};

use super::Entity;
use crate::CoreError;

/// Whether the consultation happens on site or by video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    Presencial,
    Virtual,
}

/// Lifecycle of a booked appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pendiente,
    Confirmada,
    Completada,
    Cancelada,
}

/// Patient gender as recorded on the appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 2] = [AppointmentType::Presencial, AppointmentType::Virtual];

    /// Wire value, also the value a filter selects on.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentType::Presencial => "presencial",
            AppointmentType::Virtual => "virtual",
        }
    }
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pendiente,
        AppointmentStatus::Confirmada,
        AppointmentStatus::Completada,
        AppointmentStatus::Cancelada,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pendiente => "pendiente",
            AppointmentStatus::Confirmada => "confirmada",
            AppointmentStatus::Completada => "completada",
            AppointmentStatus::Cancelada => "cancelada",
        }
    }
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

macro_rules! wire_from_str {
    ($ty:ty, $label:literal, [$($variant:expr),+ $(,)?]) => {
        impl std::str::FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CoreError::InvalidInput(format!("unknown {}: '{s}'", $label)))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_from_str!(
    AppointmentType,
    "appointment type",
    [AppointmentType::Presencial, AppointmentType::Virtual]
);
wire_from_str!(
    AppointmentStatus,
    "appointment status",
    [
        AppointmentStatus::Pendiente,
        AppointmentStatus::Confirmada,
        AppointmentStatus::Completada,
        AppointmentStatus::Cancelada,
    ]
);
wire_from_str!(Gender, "gender", [Gender::Male, Gender::Female]);

/// A booked appointment as listed on the admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub doctor_name: String,
    pub specialty: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// Zero-padded `HH:MM`.
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub reason: String,
}

impl Entity for Appointment {
    const COLLECTION: &'static str = "appointment";

    fn id(&self) -> &str {
        &self.id
    }
}
