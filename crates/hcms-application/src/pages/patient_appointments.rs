//! A logged-in patient's own appointments.
//!
//! The list is fetched once; search text and date scope narrow it in
//! memory.

use std::str::FromStr;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::appointment::Appointment;
use hcms_core::error::Result;
use hcms_core::filter::{AppointmentFilter, DateScope};
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Page};

use super::{Field, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::view::{ContentSlot, PageView, appointment_filter_bar, patient_appointment_row};

pub const PATIENT_DATA_NOTICE: &str = "Failed to load patient data. Please log in again.";
pub const SETUP_FAILED_NOTICE: &str = "An error occurred during page setup. Please try again.";
const EMPTY_MESSAGE: &str = "No appointments found.";
const ERROR_MESSAGE: &str = "Error loading appointments.";

#[derive(Debug)]
struct ListState {
    appointments: Vec<Appointment>,
    search: String,
    scope: DateScope,
    slot: ContentSlot,
}

impl ListState {
    fn filter(&self) -> AppointmentFilter {
        AppointmentFilter::new(self.scope, &self.search)
    }
}

pub struct PatientAppointments {
    ctx: PageContext,
    state: Mutex<ListState>,
}

impl PatientAppointments {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(ListState {
                appointments: Vec::new(),
                search: String::new(),
                scope: DateScope::All,
                slot: ContentSlot::new("patientAppointmentsTableBody"),
            }),
        }
    }

    fn render(&self, state: &mut ListState) {
        let visible = state
            .filter()
            .apply(&state.appointments, self.ctx.clock.today());
        let rows = visible.iter().map(patient_appointment_row).collect();
        state.slot.show_items(rows, EMPTY_MESSAGE);
    }

    async fn fetch(&self, token: &str) -> Result<()> {
        let patient = match self.ctx.api.current_patient(token).await {
            Ok(patient) if !patient.id.is_empty() => patient,
            Ok(_) => {
                tracing::warn!("Patient payload without an id");
                self.ctx.notify(PATIENT_DATA_NOTICE);
                self.ctx.router.go(Page::Landing);
                return Ok(());
            }
            Err(err) => {
                if !self.ctx.fetch_failed(&err, "patient")? {
                    self.ctx.notify(PATIENT_DATA_NOTICE);
                    self.ctx.router.go(Page::Landing);
                }
                return Ok(());
            }
        };

        let result = self
            .ctx
            .api
            .patient_appointments(&patient.id, Role::Patient, token)
            .await;
        let mut state = self.state.lock().await;
        match result {
            Ok(appointments) => {
                state.appointments = appointments
                    .into_iter()
                    .filter(|a| a.belongs_to_patient(&patient.id))
                    .collect();
                self.render(&mut state);
            }
            Err(err) => {
                if self.ctx.fetch_failed(&err, "appointments")? {
                    return Ok(());
                }
                self.ctx.notify(SETUP_FAILED_NOTICE);
                state.slot.show_error(ERROR_MESSAGE);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageController for PatientAppointments {
    fn page(&self) -> Page {
        Page::PatientAppointments
    }

    async fn load(&self) -> Result<()> {
        let session = match self.ctx.router.require_role(Role::LoggedPatient)? {
            GuardOutcome::Proceed(session) => session,
            GuardOutcome::Redirected => return Ok(()),
        };
        match session.token() {
            Some(token) => self.fetch(token).await,
            None => self.ctx.router.expire_session(),
        }
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Input { field, value } => {
                let mut state = self.state.lock().await;
                match field {
                    Field::Search => state.search = value,
                    Field::Scope => state.scope = DateScope::from_str(value.trim()).unwrap_or_default(),
                    _ => {
                        ignored(self.page(), &UiEvent::Input { field, value });
                        return Ok(());
                    }
                }
                self.render(&mut state);
                Ok(())
            }
            UiEvent::Click(action) => {
                if !self.ctx.dispatch_common(&action)? {
                    ignored(self.page(), &UiEvent::Click(action));
                }
                Ok(())
            }
            other => {
                ignored(self.page(), &other);
                Ok(())
            }
        }
    }

    async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        PageView::new("Your Appointments", self.ctx.header(), state.slot.node())
            .with_toolbar(appointment_filter_bar(&state.filter()))
    }
}
