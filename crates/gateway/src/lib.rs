//! # Citas Gateway
//!
//! HTTP client for the hospital persistence backend (médicos, pacientes, citas).
//!
//! Drafts are validated with `citas-core` before anything is sent, so the backend only ever sees
//! complete records. Every failure carries a one-line Spanish banner via
//! [`citas_core::BannerMessage`].

mod client;
mod error;
mod resource;

pub use client::{HttpGateway, Record, ResourceClient, UpdateSubmitter};
pub use error::{GatewayError, GatewayResult};
pub use resource::{failure_message, Operation, Resource};
