//! URL construction for every backend endpoint.
//!
//! Path segments are percent-encoded by [`Url::path_segments_mut`]; absent
//! `date`/`name` segments are sent as the literal [`NULL_SEGMENT`] the backend
//! expects.

use chrono::NaiveDate;
use hcms_core::error::{HcmsError, Result};
use hcms_core::filter::{DateScope, DoctorFilter};
use hcms_core::role::Role;
use reqwest::Url;

pub const NULL_SEGMENT: &str = "null";

/// Builds endpoint URLs relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| HcmsError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(HcmsError::config(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn at(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /doctor`, `POST /doctor`
    pub fn doctors(&self) -> Url {
        self.at(&["doctor"])
    }

    /// `GET /doctor/filter?name&time&specialty`
    pub fn doctor_filter(&self, filter: &DoctorFilter) -> Url {
        let mut url = self.at(&["doctor", "filter"]);
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    /// `DELETE /doctor/{id}`
    pub fn doctor(&self, id: &str) -> Url {
        self.at(&["doctor", id])
    }

    pub fn admin_login(&self) -> Url {
        self.at(&["admin"])
    }

    pub fn doctor_login(&self) -> Url {
        self.at(&["doctor", "login"])
    }

    pub fn patient_signup(&self) -> Url {
        self.at(&["patient", "signup"])
    }

    pub fn patient_login(&self) -> Url {
        self.at(&["patient", "login"])
    }

    /// `GET /patient`
    pub fn patient(&self) -> Url {
        self.at(&["patient"])
    }

    /// `GET /patient/{id}/appointments/{role}`
    pub fn patient_appointments(&self, patient_id: &str, viewer: Role) -> Url {
        self.at(&["patient", patient_id, "appointments", viewer.viewer_segment()])
    }

    /// `GET /patient/filter/{condition}/{name}`
    pub fn patient_filter(&self, scope: DateScope, doctor_name: Option<&str>) -> Url {
        let condition = if scope == DateScope::All {
            NULL_SEGMENT
        } else {
            scope.as_ref()
        };
        self.at(&[
            "patient",
            "filter",
            condition,
            non_empty_or_null(doctor_name),
        ])
    }

    /// `GET /appointments/date/{date}/patient/{name}/token/{token}`
    ///
    /// The backend only accepts the token as a path segment here.
    pub fn appointments_by_date(
        &self,
        date: Option<NaiveDate>,
        patient_name: Option<&str>,
        token: &str,
    ) -> Url {
        let date = date.map(|d| d.format("%Y-%m-%d").to_string());
        self.at(&[
            "appointments",
            "date",
            date.as_deref().unwrap_or(NULL_SEGMENT),
            "patient",
            non_empty_or_null(patient_name),
            "token",
            token,
        ])
    }

    pub fn book_appointment(&self) -> Url {
        self.at(&["appointments", "book"])
    }

    pub fn update_appointment(&self) -> Url {
        self.at(&["appointments", "update"])
    }

    /// `GET /prescription/{appointmentId}`
    pub fn prescription(&self, appointment_id: &str) -> Url {
        self.at(&["prescription", appointment_id])
    }

    /// `POST /prescription`
    pub fn prescriptions(&self) -> Url {
        self.at(&["prescription"])
    }
}

fn non_empty_or_null(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NULL_SEGMENT,
    }
}
