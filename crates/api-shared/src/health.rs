use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Liveness check shared by every Citas surface.
#[derive(Clone, Debug)]
pub struct HealthService;

impl HealthService {
    /// Reports the service as alive. There are no downstream dependencies to check.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Citas is alive".into(),
        }
    }
}
