use super::session::{clear_user, load_user, save_user, SessionStore};
use super::{AuthProvider, NewUserProfile};
use crate::config::CoreConfig;
use crate::model::{User, UserType};
use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Id given to every email/password sign-in.
pub const EMAIL_USER_ID: &str = "1";
/// Id of the simulated Google account.
pub const GOOGLE_USER_ID: &str = "2";

const GOOGLE_EMAIL: &str = "user@gmail.com";
const GOOGLE_DISPLAY_NAME: &str = "Usuario Google";
const GOOGLE_PHOTO_URL: &str = "https://i.pravatar.cc/150?img=3";

/// Accepts any non-blank credentials after a fixed delay.
///
/// Passwords are never checked or stored. Every successful sign-in is written to the session
/// store so [`AuthProvider::restore`] can pick it up later.
pub struct FakeAuthProvider {
    session: Arc<dyn SessionStore>,
    delay: Duration,
    current: RwLock<Option<User>>,
}

impl FakeAuthProvider {
    pub fn new(session: Arc<dyn SessionStore>, delay: Duration) -> Self {
        Self {
            session,
            delay,
            current: RwLock::new(None),
        }
    }

    pub fn from_config(session: Arc<dyn SessionStore>, cfg: &CoreConfig) -> Self {
        Self::new(session, cfg.auth_delay())
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn sign_in(&self, user: User) -> CoreResult<User> {
        save_user(self.session.as_ref(), &user)?;
        tracing::info!("signed in user {} ({})", user.id, user.email);
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }
}

fn require_credentials(email: &str, password: &str) -> CoreResult<String> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(CoreError::Auth("email and password are required".into()));
    }
    Ok(email.to_string())
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn login(&self, email: &str, password: &str) -> CoreResult<User> {
        let email = require_credentials(email, password)?;
        self.simulate_latency().await;

        self.sign_in(User {
            id: EMAIL_USER_ID.into(),
            display_name: User::display_name_from_email(&email),
            email,
            photo_url: None,
            phone: None,
            user_type: UserType::Patient,
            created_at: Utc::now(),
        })
        .await
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        profile: NewUserProfile,
    ) -> CoreResult<User> {
        let email = require_credentials(email, password)?;
        self.simulate_latency().await;

        self.sign_in(User {
            id: uuid::Uuid::new_v4().simple().to_string(),
            display_name: profile
                .display_name
                .unwrap_or_else(|| User::display_name_from_email(&email)),
            email,
            photo_url: None,
            phone: profile.phone,
            user_type: profile.user_type.unwrap_or_default(),
            created_at: Utc::now(),
        })
        .await
    }

    async fn login_google(&self) -> CoreResult<User> {
        self.simulate_latency().await;

        self.sign_in(User {
            id: GOOGLE_USER_ID.into(),
            email: GOOGLE_EMAIL.into(),
            display_name: GOOGLE_DISPLAY_NAME.into(),
            photo_url: Some(GOOGLE_PHOTO_URL.into()),
            phone: None,
            user_type: UserType::Patient,
            created_at: Utc::now(),
        })
        .await
    }

    async fn logout(&self) -> CoreResult<()> {
        clear_user(self.session.as_ref())?;
        if let Some(user) = self.current.write().await.take() {
            tracing::info!("signed out user {}", user.id);
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    async fn restore(&self) -> CoreResult<Option<User>> {
        let user = load_user(self.session.as_ref())?;
        if let Some(user) = &user {
            tracing::debug!("restored session for user {}", user.id);
        }
        *self.current.write().await = user.clone();
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{FileSessionStore, MemorySessionStore};
    use tempfile::TempDir;

    fn provider() -> (Arc<MemorySessionStore>, FakeAuthProvider) {
        let session = Arc::new(MemorySessionStore::new());
        let auth = FakeAuthProvider::new(session.clone(), Duration::ZERO);
        (session, auth)
    }

    #[tokio::test]
    async fn test_login_uses_email_prefix_as_display_name() {
        let (session, auth) = provider();
        let user = auth
            .login("maria.lopez@correo.es", "secreto")
            .await
            .expect("login should succeed");

        assert_eq!(user.id, EMAIL_USER_ID);
        assert_eq!(user.display_name, "maria.lopez");
        assert_eq!(user.user_type, UserType::Patient);
        assert_eq!(auth.current_user().await, Some(user.clone()));
        assert_eq!(
            load_user(session.as_ref()).expect("should read session"),
            Some(user)
        );
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let (_, auth) = provider();
        let err = auth.login("  ", "x").await.expect_err("blank email");
        assert!(matches!(err, CoreError::Auth(_)));
        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_google_login_is_fixed_user() {
        let (_, auth) = provider();
        let user = auth.login_google().await.expect("google login");
        assert_eq!(user.id, GOOGLE_USER_ID);
        assert_eq!(user.email, "user@gmail.com");
        assert_eq!(user.display_name, "Usuario Google");
        assert_eq!(user.photo_url.as_deref(), Some("https://i.pravatar.cc/150?img=3"));
    }

    #[tokio::test]
    async fn test_register_generates_fresh_ids() {
        let (_, auth) = provider();
        let profile = NewUserProfile {
            display_name: Some("Lucía Fernández".into()),
            phone: Some("600111222".into()),
            user_type: None,
        };

        let first = auth
            .register("lucia@correo.es", "secreto", profile.clone())
            .await
            .expect("register");
        let second = auth
            .register("lucia@correo.es", "secreto", NewUserProfile::default())
            .await
            .expect("register");

        assert_ne!(first.id, second.id);
        assert_eq!(first.display_name, "Lucía Fernández");
        assert_eq!(first.phone.as_deref(), Some("600111222"));
        assert_eq!(second.display_name, "lucia");
    }

    #[tokio::test]
    async fn test_logout_then_restore_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("session.json");

        let auth = FakeAuthProvider::new(Arc::new(FileSessionStore::new(&path)), Duration::ZERO);
        let user = auth.login("ana@correo.es", "pw").await.expect("login");

        let next_process =
            FakeAuthProvider::new(Arc::new(FileSessionStore::new(&path)), Duration::ZERO);
        assert!(next_process.current_user().await.is_none());
        let restored = next_process.restore().await.expect("restore");
        assert_eq!(restored, Some(user));
        assert!(next_process.current_user().await.is_some());

        next_process.logout().await.expect("logout");
        assert!(next_process.current_user().await.is_none());
        assert_eq!(next_process.restore().await.expect("restore"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_delay_elapses() {
        let auth = FakeAuthProvider::new(
            Arc::new(MemorySessionStore::new()),
            Duration::from_millis(1000),
        );
        let started = tokio::time::Instant::now();
        auth.login_google().await.expect("google login");
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
