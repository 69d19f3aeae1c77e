//! Capabilities shared by every page controller.

use std::sync::Arc;

use hcms_core::api::{ActionOutcome, HospitalApi};
use hcms_core::clock::Clock;
use hcms_core::error::{HcmsError, Result};
use hcms_core::host::{Navigator, Notifier};
use hcms_core::route::Router;
use hcms_core::session::{Session, SessionStore};

use crate::view::{Action, ViewNode, header};

/// Notice shown when a privileged action finds no token.
pub const MISSING_TOKEN_NOTICE: &str = "Authentication token not found. Please log in again.";
/// Notice shown when a write call fails before reaching the backend.
pub const UNEXPECTED_ERROR_NOTICE: &str = "An error occurred. Please try again!";

/// Everything a page controller may reach outside its own state.
///
/// Cheap to clone; clones share the same storage, client and host.
#[derive(Clone)]
pub struct PageContext {
    pub store: SessionStore,
    pub router: Router,
    pub api: Arc<dyn HospitalApi>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

impl PageContext {
    pub fn new(
        store: SessionStore,
        api: Arc<dyn HospitalApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let router = Router::new(store.clone(), navigator, notifier.clone());
        Self {
            store,
            router,
            api,
            notifier,
            clock,
        }
    }

    /// The stored session for rendering. A storage failure renders as
    /// anonymous.
    pub fn session(&self) -> Session {
        self.store.snapshot().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to read session");
            Session::anonymous()
        })
    }

    /// Navigation header for the stored session.
    pub fn header(&self) -> ViewNode {
        let session = self.session();
        header(session.role, session.has_token())
    }

    pub fn notify(&self, message: &str) {
        self.notifier.notify(message);
    }

    /// The stored token, or `None` after telling the user to log in again.
    pub fn require_token(&self) -> Result<Option<String>> {
        let token = self.store.get_token()?;
        if token.is_none() {
            tracing::warn!("Privileged action without a stored token");
            self.notify(MISSING_TOKEN_NOTICE);
        }
        Ok(token)
    }

    /// Shows the message of a write call, falling back to `fallback` when
    /// the backend sent none.
    pub fn report(&self, outcome: &ActionOutcome, fallback: &str) {
        if outcome.message.trim().is_empty() {
            self.notify(fallback);
        } else {
            self.notify(&outcome.message);
        }
    }

    /// Handles a failed fetch.
    ///
    /// A rejected token ends the session and returns `true`: the page has
    /// been left and must not render. Anything else is logged and returns
    /// `false` so the caller can show its placeholder.
    pub fn fetch_failed(&self, err: &HcmsError, what: &str) -> Result<bool> {
        if err.is_unauthorized() {
            tracing::warn!(error = %err, "{} rejected the session", what);
            self.router.expire_session()?;
            return Ok(true);
        }
        tracing::warn!(error = %err, "Failed to load {}", what);
        Ok(false)
    }

    /// Performs the actions every page treats alike.
    ///
    /// Returns `false` for actions the calling page must handle itself.
    pub fn dispatch_common(&self, action: &Action) -> Result<bool> {
        match action {
            Action::Navigate(location) => self.router.go(location.clone()),
            Action::Logout => self.router.logout()?,
            Action::LogoutPatient => self.router.logout_patient()?,
            Action::SelectRole(role) => {
                self.store.set_role(*role)?;
                self.router.select_role(*role);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
