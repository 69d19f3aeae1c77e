//! Rescheduling of one of the patient's appointments.

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::appointment::AppointmentUpdate;
use hcms_core::error::Result;
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Location, Page};

use super::{Field, Form, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::view::{PageView, update_appointment_form};

pub const MISSING_DATA_NOTICE: &str = "Missing session data, redirecting to appointments page.";
pub const UPDATE_INCOMPLETE: &str = "Please select both a date and a time for the appointment.";
pub const UPDATED_NOTICE: &str = "Appointment updated successfully!";
pub const UPDATE_FAILED_NOTICE: &str = "Failed to update appointment. Please try again.";
const DOCTOR_NOT_FOUND_NOTICE: &str = "Selected doctor details could not be loaded.";
const NO_DOCTORS_NOTICE: &str = "No doctors available to load appointment times.";
const DOCTORS_FAILED_NOTICE: &str = "Error loading doctor information. Please try again.";
const UPDATE_ERROR_NOTICE: &str =
    "An unexpected error occurred during appointment update. Please try again.";

/// Identity of the appointment being edited, from the page's query.
#[derive(Debug, Clone, Default)]
struct Target {
    appointment_id: String,
    patient_id: Option<String>,
    doctor_id: String,
    doctor_name: String,
}

#[derive(Debug, Default)]
struct FormState {
    date: String,
    time: Option<String>,
    slots: Vec<String>,
}

pub struct UpdateAppointment {
    ctx: PageContext,
    target: Target,
    state: Mutex<FormState>,
}

impl UpdateAppointment {
    pub fn new(ctx: PageContext, location: &Location) -> Self {
        let param = |key: &str| location.param(key).map(str::to_string);
        let target = Target {
            appointment_id: param("appointmentId").unwrap_or_default(),
            patient_id: param("patientId"),
            doctor_id: param("doctorId").unwrap_or_default(),
            doctor_name: param("doctorName").unwrap_or_default(),
        };
        let state = FormState {
            date: param("appointmentDate").unwrap_or_default(),
            time: param("appointmentTime"),
            slots: Vec::new(),
        };
        Self {
            ctx,
            target,
            state: Mutex::new(state),
        }
    }

    async fn load_slots(&self) -> Result<()> {
        match self.ctx.api.list_doctors().await {
            Ok(doctors) if doctors.is_empty() => self.ctx.notify(NO_DOCTORS_NOTICE),
            Ok(doctors) => match doctors.into_iter().find(|d| d.id == self.target.doctor_id) {
                Some(doctor) => self.state.lock().await.slots = doctor.availability,
                None => {
                    tracing::warn!(doctor = %self.target.doctor_id, "Doctor of appointment not listed");
                    self.ctx.notify(DOCTOR_NOT_FOUND_NOTICE);
                }
            },
            Err(err) => {
                if !self.ctx.fetch_failed(&err, "doctors")? {
                    self.ctx.notify(DOCTORS_FAILED_NOTICE);
                }
            }
        }
        Ok(())
    }

    async fn submit(&self, date: &str, time: &str) -> Result<()> {
        let (date, time) = (date.trim(), time.trim());
        if date.is_empty() || time.is_empty() {
            self.ctx.notify(UPDATE_INCOMPLETE);
            return Ok(());
        }
        {
            let mut state = self.state.lock().await;
            state.date = date.to_string();
            state.time = Some(time.to_string());
        }
        let (Some(token), Some(patient_id)) = (self.ctx.store.get_token()?, self.target.patient_id.clone())
        else {
            self.ctx.notify(MISSING_DATA_NOTICE);
            self.ctx.router.go(Page::PatientAppointments);
            return Ok(());
        };

        let update = AppointmentUpdate {
            id: self.target.appointment_id.clone(),
            patient_id,
            doctor_id: self.target.doctor_id.clone(),
            appointment_date: date.to_string(),
            appointment_time: time.to_string(),
        };
        match self.ctx.api.update_appointment(&update, &token).await {
            Ok(outcome) if outcome.success => {
                tracing::info!(id = %update.id, "Appointment updated");
                self.ctx.report(&outcome, UPDATED_NOTICE);
                self.ctx.router.go(Page::PatientAppointments);
            }
            Ok(outcome) => {
                tracing::warn!(id = %update.id, message = %outcome.message, "Appointment not updated");
                self.ctx.report(&outcome, UPDATE_FAILED_NOTICE);
            }
            Err(err) => {
                tracing::error!(error = %err, "Update request failed");
                self.ctx.notify(UPDATE_ERROR_NOTICE);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageController for UpdateAppointment {
    fn page(&self) -> Page {
        Page::UpdateAppointment
    }

    async fn load(&self) -> Result<()> {
        let session = match self.ctx.router.require_role(Role::LoggedPatient)? {
            GuardOutcome::Proceed(session) => session,
            GuardOutcome::Redirected => return Ok(()),
        };
        if !session.has_token() || self.target.patient_id.is_none() {
            tracing::warn!("Update page opened without token or patient id");
            self.ctx.notify(MISSING_DATA_NOTICE);
            self.ctx.router.go(Page::PatientAppointments);
            return Ok(());
        }
        self.load_slots().await
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Input {
                field: Field::Date,
                value,
            } => self.state.lock().await.date = value,
            UiEvent::Input {
                field: Field::Time,
                value,
            } => self.state.lock().await.time = Some(value).filter(|v| !v.is_empty()),
            UiEvent::Submit(Form::UpdateAppointment { date, time }) => self.submit(&date, &time).await?,
            UiEvent::Click(action) => {
                if !self.ctx.dispatch_common(&action)? {
                    ignored(self.page(), &UiEvent::Click(action));
                }
            }
            other => ignored(self.page(), &other),
        }
        Ok(())
    }

    async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        let form = update_appointment_form(
            &self.target.doctor_name,
            &state.date,
            state.time.as_deref(),
            &state.slots,
        );
        PageView::new("Update Appointment", self.ctx.header(), form)
    }
}
