//! Authentication capability.
//!
//! Surfaces hold an `Arc<dyn AuthProvider>` rather than reaching for global state. The only
//! implementation today is [`FakeAuthProvider`], which simulates a hosted identity service.

mod fake;
pub mod session;

pub use fake::{FakeAuthProvider, EMAIL_USER_ID, GOOGLE_USER_ID};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::model::{User, UserType};
use crate::validation::RegistrationDraft;
use crate::CoreResult;
use async_trait::async_trait;

/// Optional profile data supplied at registration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUserProfile {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<UserType>,
}

impl From<&RegistrationDraft> for NewUserProfile {
    fn from(draft: &RegistrationDraft) -> Self {
        Self {
            display_name: Some(draft.full_name.trim().to_string()).filter(|n| !n.is_empty()),
            phone: draft.phone.clone().filter(|p| !p.trim().is_empty()),
            user_type: Some(UserType::Patient),
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> CoreResult<User>;

    async fn register(
        &self,
        email: &str,
        password: &str,
        profile: NewUserProfile,
    ) -> CoreResult<User>;

    async fn login_google(&self) -> CoreResult<User>;

    async fn logout(&self) -> CoreResult<()>;

    async fn current_user(&self) -> Option<User>;

    /// Reloads a previously persisted session, making it current.
    async fn restore(&self) -> CoreResult<Option<User>>;
}
