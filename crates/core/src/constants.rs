//! Constants used throughout the Citas core crate.

/// Selected value meaning "this criterion imposes no constraint".
pub const DEFAULT_SENTINEL: &str = "all";

/// Display label some pages use in place of [`DEFAULT_SENTINEL`].
pub const DISPLAY_SENTINEL: &str = "Todas";

/// Session-store key holding the serialised current user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Default session file when no explicit path is configured.
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Default base URL of the persistence backend.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Default simulated authentication latency, in milliseconds.
pub const DEFAULT_AUTH_DELAY_MS: u64 = 1000;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Lower bound (inclusive) of the `adult` age bracket.
pub const ADULT_MIN_AGE: u32 = 30;

/// Lower bound (inclusive) of the `senior` age bracket.
pub const SENIOR_MIN_AGE: u32 = 60;

/// Environment variable names read once at startup.
pub mod env {
    pub const CATALOGUE_FILE: &str = "CITAS_CATALOGUE_FILE";
    pub const SESSION_FILE: &str = "CITAS_SESSION_FILE";
    pub const GATEWAY_URL: &str = "CITAS_GATEWAY_URL";
    pub const FILTER_SENTINEL: &str = "CITAS_FILTER_SENTINEL";
    pub const AUTH_DELAY_MS: &str = "CITAS_AUTH_DELAY_MS";
}
