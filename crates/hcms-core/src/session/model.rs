//! Session snapshot model.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A point-in-time view of the persisted session.
///
/// Sessions are created on login and destroyed on logout or when found
/// invalid. Expiry is not tracked client-side; it is only discovered when an
/// authenticated request is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    /// The anonymous session: no role, no token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(role: Role, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
        }
    }

    /// A privileged role without a token is invalid.
    pub fn is_valid(&self) -> bool {
        match self.role {
            Some(role) if role.is_privileged() => self.has_token(),
            _ => true,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
