use crate::resource::{failure_message, Operation, Resource};
use citas_core::{BannerMessage, FieldErrors};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The draft failed local validation; nothing was sent.
    #[error("invalid draft: {0}")]
    Validation(FieldErrors),
    #[error("{operation} {resource} returned HTTP {status}")]
    Status {
        resource: Resource,
        operation: Operation,
        status: reqwest::StatusCode,
    },
    #[error("{operation} {resource} failed: {source}")]
    Network {
        resource: Resource,
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} {resource} returned an unreadable body: {source}")]
    Decode {
        resource: Resource,
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// HTTP status of a non-2xx response, if that is what this error is.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl BannerMessage for GatewayError {
    fn banner(&self) -> String {
        match self {
            GatewayError::Validation(errors) => errors
                .first_message()
                .unwrap_or("Por favor corrige los campos marcados")
                .to_string(),
            GatewayError::Status {
                resource,
                operation,
                ..
            }
            | GatewayError::Network {
                resource,
                operation,
                ..
            }
            | GatewayError::Decode {
                resource,
                operation,
                ..
            } => failure_message(*resource, *operation),
            GatewayError::Client(_) => "Error de conexión con el servidor".to_string(),
        }
    }
}
