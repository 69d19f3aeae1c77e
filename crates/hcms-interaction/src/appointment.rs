use async_trait::async_trait;
use chrono::NaiveDate;
use hcms_core::api::{ActionOutcome, AppointmentApi};
use hcms_core::appointment::{Appointment, AppointmentUpdate, BookingRequest};
use hcms_core::error::Result;
use reqwest::Method;

use crate::client::{Auth, HttpHospitalClient};
use crate::response::{self, BOOK_APPOINTMENT, UPDATE_APPOINTMENT};

#[async_trait]
impl AppointmentApi for HttpHospitalClient {
    async fn appointments_by_date(
        &self,
        date: Option<NaiveDate>,
        patient_name: Option<&str>,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        let url = self
            .endpoints()
            .appointments_by_date(date, patient_name, token);
        let request = self.request(Method::GET, url, Auth::InPath(token));
        response::list(self.fetch(request).await?, "appointments")
    }

    async fn book_appointment(
        &self,
        booking: &BookingRequest,
        token: &str,
    ) -> Result<ActionOutcome> {
        let request = self
            .request(
                Method::POST,
                self.endpoints().book_appointment(),
                Auth::Token(token),
            )
            .json(booking);
        Ok(self.act(request, &BOOK_APPOINTMENT).await)
    }

    async fn update_appointment(
        &self,
        update: &AppointmentUpdate,
        token: &str,
    ) -> Result<ActionOutcome> {
        let request = self
            .request(
                Method::PUT,
                self.endpoints().update_appointment(),
                Auth::Token(token),
            )
            .json(update);
        Ok(self.act(request, &UPDATE_APPOINTMENT).await)
    }
}
