use async_trait::async_trait;
use hcms_core::api::{ActionOutcome, PatientApi};
use hcms_core::appointment::Appointment;
use hcms_core::error::Result;
use hcms_core::filter::DateScope;
use hcms_core::patient::{Patient, PatientSignup};
use hcms_core::role::Role;
use reqwest::Method;

use crate::client::{Auth, HttpHospitalClient};
use crate::response::{self, PATIENT_SIGNUP};

#[async_trait]
impl PatientApi for HttpHospitalClient {
    async fn patient_signup(&self, signup: &PatientSignup) -> Result<ActionOutcome> {
        let request = self
            .request(Method::POST, self.endpoints().patient_signup(), Auth::Anonymous)
            .json(signup);
        Ok(self.act(request, &PATIENT_SIGNUP).await)
    }

    async fn current_patient(&self, token: &str) -> Result<Patient> {
        let request = self.request(Method::GET, self.endpoints().patient(), Auth::Token(token));
        response::object(self.fetch(request).await?, "patient")
    }

    async fn patient_appointments(
        &self,
        patient_id: &str,
        viewer: Role,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        let url = self.endpoints().patient_appointments(patient_id, viewer);
        let request = self.request(Method::GET, url, Auth::Token(token));
        response::list(self.fetch(request).await?, "appointments")
    }

    async fn filter_patient_appointments(
        &self,
        scope: DateScope,
        doctor_name: Option<&str>,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        let url = self.endpoints().patient_filter(scope, doctor_name);
        let request = self.request(Method::GET, url, Auth::Token(token));
        response::list(self.fetch(request).await?, "appointments")
    }
}
