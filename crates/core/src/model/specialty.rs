use serde::{Deserialize, Serialize};

use super::Entity;

/// A medical specialty shown as a filter chip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: String,
    pub name: String,
    /// Single glyph displayed next to the name.
    pub icon: String,
    pub description: String,
}

impl Entity for Specialty {
    const COLLECTION: &'static str = "specialty";

    fn id(&self) -> &str {
        &self.id
    }
}
