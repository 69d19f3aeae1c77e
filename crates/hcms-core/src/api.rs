//! Backend API ports.
//!
//! Each trait groups the operations of one backend resource. Page
//! controllers depend on these traits only; the HTTP implementation lives in
//! `hcms-interaction` and tests substitute in-memory mocks.
//!
//! Two result families exist:
//!
//! - **Fire-and-report** (create/update/delete/book/save/signup) returns
//!   [`ActionOutcome`]. Transport and HTTP failures are folded into
//!   `success: false`; `Err` is reserved for failures to build the request.
//! - **Fetch** (lists and single records) returns the payload, or an
//!   [`HcmsError`](crate::error::HcmsError) the caller decides how to
//!   present.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::appointment::{Appointment, AppointmentUpdate, BookingRequest};
use crate::auth::{AdminCredentials, LoginCredentials};
use crate::doctor::{Doctor, NewDoctor};
use crate::error::Result;
use crate::filter::DateScope;
use crate::filter::DoctorFilter;
use crate::patient::{Patient, PatientSignup};
use crate::prescription::Prescription;
use crate::role::Role;

/// Normalised result of a write call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[async_trait]
pub trait DoctorApi: Send + Sync {
    /// `GET /doctor`
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    /// `GET /doctor/filter?name&time&specialty`
    async fn filter_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>>;

    /// `POST /doctor`
    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> Result<ActionOutcome>;

    /// `DELETE /doctor/{id}`
    async fn delete_doctor(&self, id: &str, token: &str) -> Result<ActionOutcome>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /admin`, returning the issued token.
    async fn admin_login(&self, credentials: &AdminCredentials) -> Result<String>;

    /// `POST /doctor/login`, returning the issued token.
    async fn doctor_login(&self, credentials: &LoginCredentials) -> Result<String>;

    /// `POST /patient/login`, returning the issued token.
    async fn patient_login(&self, credentials: &LoginCredentials) -> Result<String>;
}

#[async_trait]
pub trait PatientApi: Send + Sync {
    /// `POST /patient/signup`
    async fn patient_signup(&self, signup: &PatientSignup) -> Result<ActionOutcome>;

    /// `GET /patient`: the patient the token belongs to.
    async fn current_patient(&self, token: &str) -> Result<Patient>;

    /// `GET /patient/{id}/appointments/{role}`
    async fn patient_appointments(
        &self,
        patient_id: &str,
        viewer: Role,
        token: &str,
    ) -> Result<Vec<Appointment>>;

    /// `GET /patient/filter/{condition}/{name}`
    async fn filter_patient_appointments(
        &self,
        scope: DateScope,
        doctor_name: Option<&str>,
        token: &str,
    ) -> Result<Vec<Appointment>>;
}

#[async_trait]
pub trait AppointmentApi: Send + Sync {
    /// `GET /appointments/date/{date}/patient/{name}/token/{token}`
    async fn appointments_by_date(
        &self,
        date: Option<NaiveDate>,
        patient_name: Option<&str>,
        token: &str,
    ) -> Result<Vec<Appointment>>;

    /// `POST /appointments/book`
    async fn book_appointment(&self, request: &BookingRequest, token: &str)
    -> Result<ActionOutcome>;

    /// `PUT /appointments/update`
    async fn update_appointment(
        &self,
        update: &AppointmentUpdate,
        token: &str,
    ) -> Result<ActionOutcome>;
}

#[async_trait]
pub trait PrescriptionApi: Send + Sync {
    /// `GET /prescription/{appointmentId}`; `Ok(None)` when none exists yet.
    async fn get_prescription(
        &self,
        appointment_id: &str,
        token: &str,
    ) -> Result<Option<Prescription>>;

    /// `POST /prescription`
    async fn save_prescription(
        &self,
        prescription: &Prescription,
        token: &str,
    ) -> Result<ActionOutcome>;
}

/// The complete backend surface a page controller may use.
pub trait HospitalApi: DoctorApi + AuthApi + PatientApi + AppointmentApi + PrescriptionApi {}

impl<T> HospitalApi for T where
    T: DoctorApi + AuthApi + PatientApi + AppointmentApi + PrescriptionApi
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization_skips_missing_data() {
        let json = serde_json::to_value(ActionOutcome::ok("done")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "done"}));

        let with = ActionOutcome::failed("nope").with_data(serde_json::json!({"id": 1}));
        assert!(!with.success);
        assert_eq!(with.data, Some(serde_json::json!({"id": 1})));
    }
}
