use async_trait::async_trait;
use hcms_core::api::{ActionOutcome, PrescriptionApi};
use hcms_core::error::Result;
use hcms_core::prescription::Prescription;
use reqwest::Method;

use crate::client::{Auth, HttpHospitalClient};
use crate::response::{self, SAVE_PRESCRIPTION};

#[async_trait]
impl PrescriptionApi for HttpHospitalClient {
    async fn get_prescription(
        &self,
        appointment_id: &str,
        token: &str,
    ) -> Result<Option<Prescription>> {
        let url = self.endpoints().prescription(appointment_id);
        let request = self.request(Method::GET, url, Auth::Token(token));
        match self.fetch(request).await {
            Ok(body) => response::optional_object(body, "prescription"),
            // No prescription has been written for this appointment yet.
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn save_prescription(
        &self,
        prescription: &Prescription,
        token: &str,
    ) -> Result<ActionOutcome> {
        let request = self
            .request(Method::POST, self.endpoints().prescriptions(), Auth::Token(token))
            .json(prescription);
        Ok(self.act(request, &SAVE_PRESCRIPTION).await)
    }
}
