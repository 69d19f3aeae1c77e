//! Appointment domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status code of an upcoming appointment that its patient may still edit.
pub const STATUS_SCHEDULED: i32 = 0;
/// Status code of a completed appointment.
pub const STATUS_COMPLETED: i32 = 1;

/// An appointment as returned by the list endpoints.
///
/// Display fields are optional because different endpoints project
/// different subsets; renderers show `N/A` for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, deserialize_with = "crate::wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::wire::opt_id")]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::opt_id")]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::opt_text")]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub patient_email: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default)]
    pub status: i32,
}

impl Appointment {
    /// An appointment is mutable by its patient only while scheduled.
    pub fn is_editable(&self) -> bool {
        self.status == STATUS_SCHEDULED
    }

    /// Calendar date of the appointment.
    ///
    /// Accepts a plain `YYYY-MM-DD` date or the date prefix of an ISO
    /// date-time.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self
            .appointment_date
            .as_deref()
            .or(self.appointment_time.as_deref())?;
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// Time-of-day label, without any date prefix.
    pub fn time_label(&self) -> Option<String> {
        let raw = self.appointment_time.as_deref()?;
        match raw.split_once('T') {
            Some((_, time)) => Some(time.get(..5).unwrap_or(time).to_string()),
            None => Some(raw.to_string()),
        }
    }

    pub fn belongs_to_patient(&self, patient_id: &str) -> bool {
        self.patient_id.as_deref() == Some(patient_id)
    }

    pub fn belongs_to_doctor(&self, doctor_id: &str) -> bool {
        self.doctor_id.as_deref() == Some(doctor_id)
    }

    /// Lower-cased doctor and patient names, for text search.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        [&self.doctor_name, &self.patient_name]
            .iter()
            .filter_map(|n| n.as_deref())
            .any(|n| n.to_lowercase().contains(needle_lower))
    }
}

/// Payload of `POST /appointments/book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub doctor_id: String,
    pub patient_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
}

/// Payload of `PUT /appointments/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: i32) -> Appointment {
        Appointment {
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_editable_iff_status_zero() {
        for status in [-1, 0, 1, 2, 7, i32::MAX] {
            assert_eq!(with_status(status).is_editable(), status == 0, "status {status}");
        }
    }

    #[test]
    fn test_date_from_plain_date_or_datetime() {
        let plain = Appointment {
            appointment_date: Some("2025-01-01".into()),
            ..Default::default()
        };
        assert_eq!(plain.date(), NaiveDate::from_ymd_opt(2025, 1, 1));

        let from_time = Appointment {
            appointment_time: Some("2025-03-04T09:30:00".into()),
            ..Default::default()
        };
        assert_eq!(from_time.date(), NaiveDate::from_ymd_opt(2025, 3, 4));
        assert_eq!(from_time.time_label().as_deref(), Some("09:30"));
    }

    #[test]
    fn test_unparseable_date_is_none() {
        let a = Appointment {
            appointment_date: Some("soon".into()),
            ..Default::default()
        };
        assert!(a.date().is_none());
    }

    #[test]
    fn test_booking_request_wire_shape() {
        let req = BookingRequest {
            doctor_id: "d1".into(),
            patient_id: "p1".into(),
            appointment_date: "2025-01-01".into(),
            appointment_time: "09:00".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "doctorId": "d1",
                "patientId": "p1",
                "appointmentDate": "2025-01-01",
                "appointmentTime": "09:00"
            })
        );
    }

    #[test]
    fn test_text_match_is_case_insensitive_on_either_name() {
        let a = Appointment {
            doctor_name: Some("Dr. Grey".into()),
            patient_name: Some("Ada Lovelace".into()),
            ..Default::default()
        };
        assert!(a.matches_text("grey"));
        assert!(a.matches_text("love"));
        assert!(!a.matches_text("house"));
    }
}
