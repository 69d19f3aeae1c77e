//! Patient domain model.

use serde::{Deserialize, Serialize};

use crate::error::{HcmsError, Result};

/// The logged-in patient, as returned by `GET /patient`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, deserialize_with = "crate::wire::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "crate::wire::opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::opt_text")]
    pub address: Option<String>,
}

impl Patient {
    /// "Name (ID: 42)" label used by the booking overlay.
    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }
}

/// Registration payload for `POST /patient/signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

impl PatientSignup {
    pub fn validate(&self) -> Result<()> {
        let blank = [
            &self.name,
            &self.email,
            &self.password,
            &self.phone,
            &self.address,
        ]
        .iter()
        .any(|field| field.trim().is_empty());
        if blank {
            return Err(HcmsError::validation("Please fill in all fields."));
        }
        Ok(())
    }
}
