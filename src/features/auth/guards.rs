//! Session guard shared by every page.
//!
//! One configuration (redirect target, check interval) replaces the
//! per-page logout and expiry boilerplate. Any token state other than
//! `Valid` ends the session.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::time::interval;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::store::SessionStore;
use crate::features::auth::validator::{check_token, TokenStatus};
use crate::features::users::User;
use crate::modules::api::AuthApi;
use crate::shared::constants::{SESSION_REFRESH_TOKEN_KEY, SESSION_TOKEN_KEY, SESSION_USER_KEY};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired.";

/// Moves the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Blocking user-facing messages.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

type LogoutHook = Box<dyn Fn() + Send + Sync>;

pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    config: SessionConfig,
    logout_hooks: Mutex<Vec<LogoutHook>>,
}

impl SessionGuard {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
            config,
            logout_hooks: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Register a callback run on logout, e.g. to drop cached records.
    pub fn on_logout(&self, hook: impl Fn() + Send + Sync + 'static) {
        match self.logout_hooks.lock() {
            Ok(mut hooks) => hooks.push(Box::new(hook)),
            Err(_) => tracing::error!("Logout hook registry poisoned; hook not registered"),
        }
    }

    /// Current token state without side effects. Unreadable storage counts as missing.
    pub fn token_status(&self) -> TokenStatus {
        let token = match self.store.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Could not read session token: {}", e);
                None
            }
        };
        check_token(token.as_deref(), Utc::now().timestamp())
    }

    /// Check the token and force a logout unless it is valid.
    pub fn check(&self) -> TokenStatus {
        let status = self.token_status();
        match status {
            TokenStatus::Valid => {}
            TokenStatus::Missing => {
                tracing::info!("No session token found, redirecting");
                self.logout();
            }
            TokenStatus::Expired => {
                tracing::info!("Session token expired, logging out");
                self.notifier.alert(SESSION_EXPIRED_MESSAGE);
                self.logout();
            }
            TokenStatus::Malformed => {
                tracing::error!("Malformed session token, logging out");
                self.logout();
            }
        }
        status
    }

    /// `Ok` when the session is valid; the guard has already logged out otherwise.
    pub fn ensure_valid(&self) -> Result<()> {
        match self.check() {
            TokenStatus::Valid => Ok(()),
            other => Err(AppError::Unauthorized(format!("Session {:?}", other).to_lowercase())),
        }
    }

    /// Clear every session key and cached state, then navigate to the entry page.
    ///
    /// Safe to call repeatedly; storage failures are logged and never block
    /// the redirect.
    pub fn logout(&self) {
        self.clear_session();
        tracing::info!("User logged out");
        self.navigator.navigate(&self.config.redirect_target);
    }

    /// Like [`logout`](Self::logout) but lands on the login page, for
    /// credentials the backend rejected mid-flow.
    pub fn expire_to_login(&self) {
        self.clear_session();
        tracing::info!("Session rejected, sending user to login");
        self.navigate_to_login();
    }

    fn clear_session(&self) {
        let mut failed = false;
        for key in [SESSION_TOKEN_KEY, SESSION_USER_KEY, SESSION_REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!("Logout error removing {}: {}", key, e);
                failed = true;
            }
        }

        if failed {
            if let Err(e) = self.store.clear() {
                tracing::error!("Forced session clear failed: {}", e);
            } else {
                tracing::info!("Forced logout due to error - all data cleared");
            }
        }

        match self.logout_hooks.lock() {
            Ok(hooks) => hooks.iter().for_each(|hook| hook()),
            Err(_) => tracing::error!("Logout hook registry poisoned; cached data not cleared"),
        }
    }

    /// Tell the backend, then log out locally whatever it answered.
    pub async fn sign_out(&self, auth: &dyn AuthApi) {
        if let Err(e) = auth.logout().await {
            tracing::error!("Logout failed: {}", e);
        }
        self.logout();
    }

    /// Admin pages send anyone without an admin role to the login page.
    pub fn require_admin(&self, user: &User) -> Result<()> {
        if user.is_admin() {
            return Ok(());
        }

        tracing::warn!(
            "User {:?} with role {:?} denied admin access",
            user.user_id,
            user.role
        );
        self.navigate_to_login();
        Err(AppError::Unauthorized("Admin access required".to_string()))
    }

    pub fn navigate_to_login(&self) {
        self.navigator.navigate(&self.config.login_page);
    }

    /// Re-check the session every `check_interval` until it ends.
    pub async fn run(&self) -> TokenStatus {
        tracing::info!(
            "Starting session guard (every {}s)",
            self.config.check_interval.as_secs()
        );

        let mut ticker = interval(self.config.check_interval);
        loop {
            ticker.tick().await;

            let status = self.check();
            if !status.is_valid() {
                return status;
            }
        }
    }
}
