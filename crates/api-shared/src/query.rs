//! Filter query strings for the list endpoints.
//!
//! Parameter names are the filter keys; an omitted parameter leaves that criterion inactive.

use citas_core::filter::keys;
use citas_core::Selection;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

fn push(selection: &mut Selection, key: &str, value: Option<String>) {
    if let Some(value) = value {
        selection.set(key, value);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoctorQuery {
    /// Free text over name and specialty.
    pub q: Option<String>,
    pub specialty: Option<String>,
    /// `available` keeps only bookable doctors.
    pub availability: Option<String>,
    pub language: Option<String>,
}

impl DoctorQuery {
    pub fn into_selection(self) -> Selection {
        let mut selection = Selection::new();
        push(&mut selection, keys::QUERY, self.q);
        push(&mut selection, keys::SPECIALTY, self.specialty);
        push(&mut selection, keys::AVAILABILITY, self.availability);
        push(&mut selection, keys::LANGUAGE, self.language);
        selection
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleQuery {
    /// Free text over title, excerpt and tags.
    pub q: Option<String>,
    pub category: Option<String>,
}

impl ArticleQuery {
    pub fn into_selection(self) -> Selection {
        let mut selection = Selection::new();
        push(&mut selection, keys::QUERY, self.q);
        push(&mut selection, keys::CATEGORY, self.category);
        selection
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentQuery {
    /// Free text over patient, doctor and specialty.
    pub q: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    /// `young`, `adult` or `senior`.
    pub age: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
}

impl AppointmentQuery {
    pub fn into_selection(self) -> Selection {
        let mut selection = Selection::new();
        push(&mut selection, keys::QUERY, self.q);
        push(&mut selection, keys::STATUS, self.status);
        push(&mut selection, keys::GENDER, self.gender);
        push(&mut selection, keys::AGE, self.age);
        push(&mut selection, keys::TYPE, self.appointment_type);
        selection
    }
}
