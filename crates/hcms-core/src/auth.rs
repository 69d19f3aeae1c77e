//! Login credentials.

use serde::{Deserialize, Serialize};

use crate::error::{HcmsError, Result};

/// Body of `POST /admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(HcmsError::validation(
                "Username and password cannot be blank!",
            ));
        }
        Ok(())
    }
}

/// Body of `POST /doctor/login` and `POST /patient/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(HcmsError::validation("Email and password cannot be blank!"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credentials_rejected() {
        let admin = AdminCredentials {
            username: "admin".into(),
            password: String::new(),
        };
        assert!(admin.validate().is_err());

        let login = LoginCredentials {
            email: "a@b".into(),
            password: "pw".into(),
        };
        assert!(login.validate().is_ok());
    }
}
