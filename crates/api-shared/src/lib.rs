//! # API Shared
//!
//! Shared request/response types for the Citas APIs.
//!
//! Contains:
//! - Catalogue DTOs with OpenAPI schemas
//! - Filter query parameters for the list endpoints
//! - Validation request bodies and results
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and by clients that talk to it.

pub mod catalogue;
pub mod forms;
pub mod health;
pub mod query;

pub use catalogue::*;
pub use forms::*;
pub use health::{HealthRes, HealthService};
pub use query::{AppointmentQuery, ArticleQuery, DoctorQuery};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
