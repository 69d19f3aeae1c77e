//! Role-based routing and the privileged-page guard.

use std::sync::Arc;

use crate::error::Result;
use crate::host::{Navigator, Notifier};
use crate::role::Role;
use crate::session::{Session, SessionStore};

use super::page::{Location, Page};

pub const SESSION_EXPIRED_NOTICE: &str = "Session expired or invalid login. Please log in again.";
pub const ACCESS_DENIED_NOTICE: &str = "You are not authorized to view this page.";
pub const LOGGED_OUT_NOTICE: &str = "You have been logged out.";

/// The dashboard each role lands on.
pub fn select_role(role: Role) -> Page {
    match role {
        Role::Admin => Page::AdminDashboard,
        Role::Doctor => Page::DoctorDashboard,
        Role::Patient | Role::LoggedPatient => Page::PatientDashboard,
    }
}

/// Result of guarding a page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The page may render for this session.
    Proceed(Session),
    /// The host has already been sent elsewhere; render nothing.
    Redirected,
}

impl GuardOutcome {
    pub fn session(self) -> Option<Session> {
        match self {
            GuardOutcome::Proceed(session) => Some(session),
            GuardOutcome::Redirected => None,
        }
    }
}

/// Session-aware navigation shared by every page controller.
#[derive(Clone)]
pub struct Router {
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl Router {
    pub fn new(
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn go(&self, location: impl Into<Location>) {
        let location = location.into();
        tracing::info!(to = %location.page, "Navigating");
        self.navigator.navigate(location);
    }

    /// Navigates to the dashboard of `role`.
    pub fn select_role(&self, role: Role) {
        self.go(select_role(role));
    }

    /// Validates the stored session.
    ///
    /// A privileged role without a token clears the session, shows the
    /// expiry notice and redirects to the landing page.
    pub fn guard(&self) -> Result<GuardOutcome> {
        let session = self.store.snapshot()?;
        if session.is_valid() {
            return Ok(GuardOutcome::Proceed(session));
        }
        tracing::warn!(role = ?session.role, "Privileged role without token");
        self.expire_session()?;
        Ok(GuardOutcome::Redirected)
    }

    /// Like [`guard`](Self::guard), and additionally requires the stored
    /// role to be `expected`. A mismatch keeps the session and sends the
    /// user to their own dashboard.
    pub fn require_role(&self, expected: Role) -> Result<GuardOutcome> {
        let session = match self.guard()? {
            GuardOutcome::Proceed(session) => session,
            GuardOutcome::Redirected => return Ok(GuardOutcome::Redirected),
        };
        match session.role {
            Some(role) if role == expected => Ok(GuardOutcome::Proceed(session)),
            Some(role) => {
                tracing::warn!(%role, %expected, "Role mismatch");
                self.notifier.notify(ACCESS_DENIED_NOTICE);
                self.select_role(role);
                Ok(GuardOutcome::Redirected)
            }
            None => {
                tracing::warn!(%expected, "No role stored");
                self.notifier.notify(ACCESS_DENIED_NOTICE);
                self.go(Page::Landing);
                Ok(GuardOutcome::Redirected)
            }
        }
    }

    /// Guard for an arbitrary page load.
    pub fn enter(&self, page: Page) -> Result<GuardOutcome> {
        if page == Page::Landing {
            return self.enter_landing().map(GuardOutcome::Proceed);
        }
        match page.required_role() {
            Some(role) => self.require_role(role),
            None => self.guard(),
        }
    }

    /// The landing page forgets the role but keeps the token.
    pub fn enter_landing(&self) -> Result<Session> {
        self.store.clear_role()?;
        self.store.snapshot()
    }

    /// Ends the session after the backend rejected the token or the stored
    /// session was found invalid.
    pub fn expire_session(&self) -> Result<()> {
        self.store.clear()?;
        self.notifier.notify(SESSION_EXPIRED_NOTICE);
        self.go(Page::Landing);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Logged out");
        self.notifier.notify(LOGGED_OUT_NOTICE);
        self.go(Page::Landing);
        Ok(())
    }

    /// Logs a patient out but keeps them browsing the patient portal.
    pub fn logout_patient(&self) -> Result<()> {
        self.store.clear_token()?;
        self.store.set_role(Role::Patient)?;
        tracing::info!("Patient logged out");
        self.notifier.notify(LOGGED_OUT_NOTICE);
        self.go(Page::PatientDashboard);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{KeyValueStorage, ROLE_KEY, TOKEN_KEY};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use strum::IntoEnumIterator;

    #[derive(Default)]
    struct MapStorage(Mutex<HashMap<String, String>>);

    impl KeyValueStorage for MapStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.0.lock().unwrap().insert(key.into(), value.into());
            Ok(())
        }
        fn remove_item(&self, key: &str) -> Result<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        visits: Mutex<Vec<Location>>,
        notices: Mutex<Vec<String>>,
    }

    impl Navigator for Recorder {
        fn navigate(&self, location: Location) {
            self.visits.lock().unwrap().push(location);
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }

    fn router() -> (Router, Arc<MapStorage>, Arc<Recorder>) {
        let storage = Arc::new(MapStorage::default());
        let recorder = Arc::new(Recorder::default());
        let router = Router::new(
            SessionStore::new(storage.clone()),
            recorder.clone(),
            recorder.clone(),
        );
        (router, storage, recorder)
    }

    #[test]
    fn test_select_role_mapping() {
        assert_eq!(select_role(Role::Admin).path(), "/adminDashboard.html");
        assert_eq!(select_role(Role::Doctor).path(), "/doctorDashboard.html");
        assert_eq!(select_role(Role::Patient).path(), "/patientDashboard.html");
        assert_eq!(select_role(Role::LoggedPatient).path(), "/patientDashboard.html");
    }

    #[test]
    fn test_guard_clears_privileged_role_without_token() {
        for role in Role::iter().filter(|r| r.is_privileged()) {
            let (router, storage, recorder) = router();
            storage.set_item(ROLE_KEY, role.as_ref()).unwrap();

            assert_eq!(router.guard().unwrap(), GuardOutcome::Redirected);
            assert!(storage.get_item(ROLE_KEY).unwrap().is_none());
            assert_eq!(
                recorder.notices.lock().unwrap().as_slice(),
                [SESSION_EXPIRED_NOTICE]
            );
            assert_eq!(
                recorder.visits.lock().unwrap().as_slice(),
                [Location::new(Page::Landing)]
            );
        }
    }

    #[test]
    fn test_guard_proceeds_with_valid_session() {
        let (router, storage, recorder) = router();
        storage.set_item(ROLE_KEY, "doctor").unwrap();
        storage.set_item(TOKEN_KEY, "tok").unwrap();

        let outcome = router.require_role(Role::Doctor).unwrap();
        assert_eq!(outcome, GuardOutcome::Proceed(Session::new(Role::Doctor, "tok")));
        assert!(recorder.visits.lock().unwrap().is_empty());
    }

    #[test]
    fn test_require_role_redirects_other_roles_home() {
        let (router, storage, recorder) = router();
        storage.set_item(ROLE_KEY, "loggedPatient").unwrap();
        storage.set_item(TOKEN_KEY, "tok").unwrap();

        assert_eq!(router.require_role(Role::Admin).unwrap(), GuardOutcome::Redirected);
        assert_eq!(
            recorder.visits.lock().unwrap().as_slice(),
            [Location::new(Page::PatientDashboard)]
        );
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn test_landing_clears_role_but_keeps_token() {
        let (router, storage, _) = router();
        storage.set_item(ROLE_KEY, "admin").unwrap();
        storage.set_item(TOKEN_KEY, "tok").unwrap();

        let session = router.enter(Page::Landing).unwrap().session().unwrap();
        assert_eq!(session.role, None);
        assert_eq!(session.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_logout_clears_both_keys_for_every_role() {
        for role in Role::iter() {
            let (router, storage, recorder) = router();
            storage.set_item(ROLE_KEY, role.as_ref()).unwrap();
            storage.set_item(TOKEN_KEY, "tok").unwrap();

            router.logout().unwrap();
            assert!(storage.get_item(ROLE_KEY).unwrap().is_none());
            assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
            assert_eq!(
                recorder.visits.lock().unwrap().last().map(|l| l.page),
                Some(Page::Landing)
            );
            assert_eq!(
                recorder.notices.lock().unwrap().as_slice(),
                [LOGGED_OUT_NOTICE]
            );
        }
    }

    #[test]
    fn test_logout_patient_returns_to_anonymous_browsing() {
        let (router, storage, recorder) = router();
        storage.set_item(ROLE_KEY, "loggedPatient").unwrap();
        storage.set_item(TOKEN_KEY, "tok").unwrap();

        router.logout_patient().unwrap();
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
        assert_eq!(storage.get_item(ROLE_KEY).unwrap().as_deref(), Some("patient"));
        assert_eq!(
            recorder.visits.lock().unwrap().as_slice(),
            [Location::new(Page::PatientDashboard)]
        );
    }
}
