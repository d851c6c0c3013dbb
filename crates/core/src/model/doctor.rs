use serde::{Deserialize, Serialize};

use super::Entity;

/// A doctor listed in the search directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Average review score in `[0, 5]`.
    pub rating: f32,
    pub reviews_count: u32,
    /// Years of practice.
    pub experience: u32,
    /// Spoken languages in display order.
    pub languages: Vec<String>,
    /// Consultation fee in whole currency units.
    pub price: u32,
    pub available: bool,
    /// Human-readable next slot, e.g. "Hoy a las 3:00 PM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_available: Option<String>,
}

impl Doctor {
    pub fn has_valid_rating(&self) -> bool {
        (0.0..=5.0).contains(&self.rating)
    }
}

impl Entity for Doctor {
    const COLLECTION: &'static str = "doctor";

    fn id(&self) -> &str {
        &self.id
    }
}
