//! Filter predicates for doctor and appointment lists.
//!
//! Doctor filters are evaluated by the backend; appointment filters narrow
//! the most recently fetched collection in memory. In both cases an empty
//! filter means "no filtering".

use chrono::NaiveDate;
use strum::{AsRefStr, Display, EnumString};

use crate::appointment::Appointment;

/// Criteria for the doctor filter endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub time: Option<String>,
    pub specialty: Option<String>,
}

impl DoctorFilter {
    /// Builds a filter from raw form inputs; blank inputs are dropped.
    pub fn from_inputs(name: &str, time: &str, specialty: &str) -> Self {
        Self {
            name: non_blank(name),
            time: non_blank(time),
            specialty: non_blank(specialty),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.time.is_none() && self.specialty.is_none()
    }

    /// Query pairs in the order the endpoint documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("time", self.time.as_deref()),
            ("specialty", self.specialty.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

/// Which part of the calendar an appointment list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DateScope {
    #[default]
    All,
    /// On or after today.
    Upcoming,
    /// Strictly before today.
    Past,
}

impl DateScope {
    /// Appointments with an unreadable date only pass the `All` scope.
    pub fn admits(self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match (self, date) {
            (DateScope::All, _) => true,
            (DateScope::Upcoming, Some(d)) => d >= today,
            (DateScope::Past, Some(d)) => d < today,
            (_, None) => false,
        }
    }

    /// Placeholder shown when the scope leaves nothing to display.
    pub fn empty_message(self) -> &'static str {
        match self {
            DateScope::All => "No appointments found.",
            DateScope::Upcoming => "No upcoming appointments found.",
            DateScope::Past => "No past appointments found.",
        }
    }
}

/// Client-side appointment filter: date scope plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub scope: DateScope,
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn new(scope: DateScope, search: &str) -> Self {
        Self {
            scope,
            search: non_blank(search).map(|s| s.to_lowercase()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scope == DateScope::All && self.search.is_none()
    }

    pub fn matches(&self, appointment: &Appointment, today: NaiveDate) -> bool {
        let text_ok = self
            .search
            .as_deref()
            .is_none_or(|needle| appointment.matches_text(needle));
        text_ok && self.scope.admits(appointment.date(), today)
    }

    /// Narrows `appointments`, preserving order. An empty filter returns the
    /// input unchanged.
    pub fn apply(&self, appointments: &[Appointment], today: NaiveDate) -> Vec<Appointment> {
        if self.is_empty() {
            return appointments.to_vec();
        }
        appointments
            .iter()
            .filter(|a| self.matches(a, today))
            .cloned()
            .collect()
    }
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
