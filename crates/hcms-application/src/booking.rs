//! Appointment booking for a logged-in patient.

use hcms_core::api::ActionOutcome;
use hcms_core::appointment::BookingRequest;
use hcms_core::doctor::{Doctor, slot_start};
use hcms_core::error::{HcmsError, Result};
use hcms_core::patient::Patient;

use crate::context::{PageContext, UNEXPECTED_ERROR_NOTICE};
use crate::view::{ViewNode, booking_overlay};

pub const BOOKING_INCOMPLETE: &str = "Please select both date and time for the appointment.";
pub const BOOKED_NOTICE: &str = "Appointment successfully booked!";
pub const BOOKING_FAILED_NOTICE: &str = "Failed to book appointment.";

/// An open booking overlay: one doctor, one patient.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    doctor: Doctor,
    patient: Patient,
}

impl BookingForm {
    pub fn new(doctor: Doctor, patient: Patient) -> Self {
        Self { doctor, patient }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn overlay(&self) -> ViewNode {
        booking_overlay(&self.doctor, &self.patient)
    }

    /// Builds the booking payload.
    ///
    /// Both inputs are required. The time is reduced to the start of its
    /// slot label, so `"09:00 - 10:00"` books `"09:00"`.
    pub fn request(&self, date: &str, time: &str) -> Result<BookingRequest> {
        let (date, time) = (date.trim(), time.trim());
        if date.is_empty() || time.is_empty() {
            return Err(HcmsError::validation(BOOKING_INCOMPLETE));
        }
        Ok(BookingRequest {
            doctor_id: self.doctor.id.clone(),
            patient_id: self.patient.id.clone(),
            appointment_date: date.to_string(),
            appointment_time: slot_start(time).to_string(),
        })
    }

    /// Validates and submits the booking.
    ///
    /// Returns `None` when nothing was sent: validation failed, the token
    /// is missing or the request could not be built. Every outcome is shown
    /// to the user.
    pub async fn submit(
        &self,
        ctx: &PageContext,
        date: &str,
        time: &str,
    ) -> Result<Option<ActionOutcome>> {
        let request = match self.request(date, time) {
            Ok(request) => request,
            Err(err) if err.is_validation() => {
                ctx.notify(&err.to_string());
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        let Some(token) = ctx.require_token()? else {
            return Ok(None);
        };

        let outcome = match ctx.api.book_appointment(&request, &token).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "Booking request failed");
                ctx.notify(UNEXPECTED_ERROR_NOTICE);
                return Ok(None);
            }
        };

        if outcome.success {
            tracing::info!(doctor = %request.doctor_id, date = %request.appointment_date, "Appointment booked");
            ctx.report(&outcome, BOOKED_NOTICE);
        } else {
            tracing::warn!(message = %outcome.message, "Booking rejected");
            ctx.report(&outcome, BOOKING_FAILED_NOTICE);
        }
        Ok(Some(outcome))
    }
}
