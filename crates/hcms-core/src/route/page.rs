//! Page identities and query-carrying locations.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::role::Role;

/// Every page of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Page {
    Landing,
    AdminDashboard,
    DoctorDashboard,
    PatientDashboard,
    LoggedPatientDashboard,
    PatientAppointments,
    PatientRecord,
    AppointmentRecord,
    UpdateAppointment,
    AddPrescription,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Page::Landing => "/",
            Page::AdminDashboard => "/adminDashboard.html",
            Page::DoctorDashboard => "/doctorDashboard.html",
            Page::PatientDashboard => "/patientDashboard.html",
            Page::LoggedPatientDashboard => "/pages/loggedPatientDashboard.html",
            Page::PatientAppointments => "/patientAppointments.html",
            Page::PatientRecord => "/patientRecord.html",
            Page::AppointmentRecord => "/appointmentRecord.html",
            Page::UpdateAppointment => "/updateAppointment.html",
            Page::AddPrescription => "/addPrescription.html",
        }
    }

    /// Resolves a path, ignoring any query string. `/index.html` and the
    /// empty path are the landing page.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or(path);
        match path {
            "" | "/index.html" => return Some(Page::Landing),
            _ => {}
        }
        Page::iter().find(|page| page.path() == path)
    }

    /// The role a session must hold to view this page, if any.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Page::Landing | Page::PatientDashboard => None,
            Page::AdminDashboard => Some(Role::Admin),
            Page::DoctorDashboard
            | Page::PatientRecord
            | Page::AppointmentRecord
            | Page::AddPrescription => Some(Role::Doctor),
            Page::LoggedPatientDashboard
            | Page::PatientAppointments
            | Page::UpdateAppointment => Some(Role::LoggedPatient),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A page plus its query parameters, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub page: Page,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            query: Vec::new(),
        }
    }

    /// Appends a query parameter.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// First value of `key`, with empty values and the literal strings
    /// `null`/`undefined` read as absent.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty() && *v != "null" && *v != "undefined")
    }

    /// Relative URL with a form-encoded query.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.page.path().to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.page.path(), query)
    }

    /// Parses a relative URL such as `/patientRecord.html?patientId=3`.
    pub fn parse(href: &str) -> Option<Self> {
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let page = Page::from_path(path)?;
        let query = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        Some(Self { page, query })
    }
}

impl From<Page> for Location {
    fn from(page: Page) -> Self {
        Location::new(page)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_back_to_pages() {
        for page in Page::iter() {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
        assert_eq!(Page::from_path("/index.html"), Some(Page::Landing));
        assert_eq!(Page::from_path("/nowhere.html"), None);
    }

    #[test]
    fn test_href_encodes_query_values() {
        let location = Location::new(Page::AddPrescription)
            .with("appointmentId", "12")
            .with("mode", "add")
            .with("patientName", "Ada Lovelace & co");
        assert_eq!(
            location.href(),
            "/addPrescription.html?appointmentId=12&mode=add&patientName=Ada+Lovelace+%26+co"
        );
        assert_eq!(Location::parse(&location.href()), Some(location));
        assert_eq!(
            Location::parse("/addPrescription.html?patientName=Ada%20L%C3%B3pez")
                .unwrap()
                .param("patientName"),
            Some("Ada López")
        );
    }

    #[test]
    fn test_param_treats_null_as_absent() {
        let location = Location::parse("/patientRecord.html?patientId=3&doctorId=undefined").unwrap();
        assert_eq!(location.param("patientId"), Some("3"));
        assert_eq!(location.param("doctorId"), None);
        assert_eq!(location.param("missing"), None);
    }

    #[test]
    fn test_privileged_pages_require_a_role() {
        assert_eq!(Page::AdminDashboard.required_role(), Some(Role::Admin));
        assert_eq!(Page::AddPrescription.required_role(), Some(Role::Doctor));
        assert_eq!(Page::UpdateAppointment.required_role(), Some(Role::LoggedPatient));
        assert_eq!(Page::PatientDashboard.required_role(), None);
    }
}
