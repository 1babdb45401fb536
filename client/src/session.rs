//! Session state: the bearer token and the identity it was issued for.
//!
//! There is no refresh, expiry or revocation handling. A token stays attached
//! to every authenticated call until `logout`.

use shared::{LoginRequest, RegisterRequest, User};
use tracing::{info, warn};

use crate::errors::{ClientError, ClientResult};
use crate::services::FinanceService;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Does not log in.
    pub async fn register(
        &self,
        service: &dyn FinanceService,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<String> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match service.register(&request).await {
            Ok(message) => {
                info!("Registered account for {}", email);
                Ok(message)
            }
            Err(e) => {
                warn!("Registration for {} failed: {}", email, e);
                Err(e)
            }
        }
    }

    /// Exchange credentials for a token. A failed attempt leaves any existing
    /// session untouched.
    pub async fn login(
        &mut self,
        service: &dyn FinanceService,
        email: &str,
        password: &str,
    ) -> ClientResult<&User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let grant = service.login(&request).await.map_err(|e| {
            warn!("Login for {} failed: {}", email, e);
            e
        })?;

        info!("Logged in as {} (id {})", grant.user.username, grant.user.id);
        self.token = Some(grant.token);
        Ok(&*self.user.insert(grant.user))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Logged out {}", user.username);
        }
        self.token = None;
    }

    /// The bearer token, or `NotAuthenticated` when nobody is logged in
    pub fn token(&self) -> ClientResult<&str> {
        self.token.as_deref().ok_or(ClientError::NotAuthenticated)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
