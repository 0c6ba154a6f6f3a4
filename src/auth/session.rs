//! Session state for the signed-in admin
//!
//! A [`Session`] is built once at startup and shared by reference (usually
//! behind an `Arc`). It moves between anonymous and authenticated; the
//! backend remains the real authorization boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::{info, warn};
use tokio::task::JoinHandle;

use super::{AdminUser, AuthOutcome, AuthService, LoginCredentials};
use crate::error::Error;

pub struct Session {
    auth: AuthService,
    user: RwLock<Option<AdminUser>>,
    loading: AtomicBool,
}

impl Session {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            user: RwLock::new(None),
            loading: AtomicBool::new(true),
        }
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Restore the stored user without asking the backend.
    ///
    /// The session reads as authenticated from here until [`revalidate`]
    /// says otherwise.
    ///
    /// [`revalidate`]: Session::revalidate
    pub fn restore(&self) -> Option<AdminUser> {
        let stored = self.auth.get_stored_user();
        if let Some(user) = &stored {
            self.set_user(Some(user.clone()));
        }
        self.loading.store(false, Ordering::SeqCst);
        stored
    }

    /// Confirm the stored token with the backend. On failure the session is
    /// torn down. Returns whether the session survived.
    pub async fn revalidate(&self) -> bool {
        match self.auth.fetch_current_user().await {
            Ok(Some(user)) => {
                self.set_user(Some(user));
                true
            }
            // The client already dropped the credentials and redirected.
            Err(Error::Unauthorized) => {
                warn!("stored session was rejected by the backend");
                self.set_user(None);
                false
            }
            Ok(None) | Err(_) => {
                warn!("stored session is no longer valid");
                self.logout();
                false
            }
        }
    }

    /// Restore optimistically, then revalidate in the background when there
    /// was something to restore.
    pub fn start(self: &Arc<Self>) -> Option<JoinHandle<bool>> {
        self.restore()?;
        let session = Arc::clone(self);
        Some(tokio::spawn(async move { session.revalidate().await }))
    }

    /// Sign in. Returns `true` only when the backend accepted the
    /// credentials and returned a user; prior state is untouched otherwise.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let credentials = LoginCredentials::new(email, password);
        match self.auth.login(&credentials).await {
            AuthOutcome::Authenticated { user: Some(user), .. } => {
                self.set_user(Some(user));
                true
            }
            AuthOutcome::Authenticated { user: None, .. } => false,
            AuthOutcome::Rejected { error } => {
                info!("login rejected: {}", error);
                false
            }
        }
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.set_user(None);
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    /// True until [`restore`](Session::restore) has run
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Requires both an in-memory user and a stored token
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some() && self.auth.is_authenticated()
    }

    pub fn is_super_admin(&self) -> bool {
        self.user().map(|u| u.is_super_admin()).unwrap_or(false)
    }

    /// Gate for the admin-creation view. Display-only.
    pub fn can_create_admins(&self) -> bool {
        self.is_super_admin()
    }

    fn set_user(&self, user: Option<AdminUser>) {
        match self.user.write() {
            Ok(mut current) => *current = user,
            Err(poisoned) => *poisoned.into_inner() = user,
        }
    }
}
