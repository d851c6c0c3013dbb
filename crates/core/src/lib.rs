//! # Citas Core
//!
//! Core domain logic for the Citas appointment booking system.
//!
//! This crate holds everything that does not depend on a transport:
//! - Domain records (doctors, articles, appointments, specialties, users)
//! - Multi-criteria filtering over in-memory lists
//! - Form validation with per-field Spanish messages
//! - The seed catalogue (built-in mock data or a YAML file)
//! - The state container the surfaces dispatch actions to
//! - The authentication capability and its session store
//!
//! **No transport concerns**: HTTP servers and clients live in `api-rest` and `citas-gateway`.

pub mod auth;
pub mod catalogue;
pub mod config;
pub mod constants;
mod error;
pub mod filter;
pub mod form;
pub mod model;
pub mod stats;
pub mod store;
pub mod validation;

pub use catalogue::Catalogue;
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use filter::{FilterSet, Selection};
pub use form::{BannerMessage, FormSession, Submitter};
pub use stats::AppointmentStats;
pub use store::{Action, Store};
pub use validation::{FieldErrors, Validate};
