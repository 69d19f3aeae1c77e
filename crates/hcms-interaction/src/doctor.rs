use async_trait::async_trait;
use hcms_core::api::{ActionOutcome, DoctorApi};
use hcms_core::doctor::{Doctor, NewDoctor};
use hcms_core::error::Result;
use hcms_core::filter::DoctorFilter;
use reqwest::Method;

use crate::client::{Auth, HttpHospitalClient};
use crate::response::{self, DELETE_DOCTOR, SAVE_DOCTOR};

const DOCTORS_KEY: &str = "doctors";

#[async_trait]
impl DoctorApi for HttpHospitalClient {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let request = self.request(Method::GET, self.endpoints().doctors(), Auth::Anonymous);
        response::list(self.fetch(request).await?, DOCTORS_KEY)
    }

    async fn filter_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        let url = self.endpoints().doctor_filter(filter);
        let request = self.request(Method::GET, url, Auth::Anonymous);
        response::list(self.fetch(request).await?, DOCTORS_KEY)
    }

    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> Result<ActionOutcome> {
        let request = self
            .request(Method::POST, self.endpoints().doctors(), Auth::Token(token))
            .json(doctor);
        Ok(self.act(request, &SAVE_DOCTOR).await)
    }

    async fn delete_doctor(&self, id: &str, token: &str) -> Result<ActionOutcome> {
        let request = self.request(Method::DELETE, self.endpoints().doctor(id), Auth::Token(token));
        Ok(self.act(request, &DELETE_DOCTOR).await)
    }
}
