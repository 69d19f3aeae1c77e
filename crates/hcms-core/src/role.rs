//! User roles.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The role a browsing context acts under.
///
/// `Patient` is the anonymous browsing state of the patient portal; every
/// other variant is privileged and requires a token. The absence of any
/// stored role is modelled as `Option<Role>::None`.
///
/// The string form (`admin`, `doctor`, `patient`, `loggedPatient`) is the
/// value persisted under the `userRole` storage key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
    LoggedPatient,
}

impl Role {
    /// Returns true when this role may only exist alongside a token.
    pub fn is_privileged(self) -> bool {
        match self {
            Role::Admin | Role::Doctor | Role::LoggedPatient => true,
            Role::Patient => false,
        }
    }

    /// The path segment the appointments endpoint expects for this viewer.
    pub fn viewer_segment(self) -> &'static str {
        match self {
            Role::Doctor | Role::Admin => "doctor",
            Role::Patient | Role::LoggedPatient => "patient",
        }
    }
}
