//! One patient's appointments with the viewing doctor.

use std::str::FromStr;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::error::Result;
use hcms_core::filter::{AppointmentFilter, DateScope};
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Location, Page};

use super::{Field, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::sequencer::RequestSequencer;
use crate::view::{ContentSlot, PageView, appointment_filter_bar, patient_record_row};

pub const MISSING_DATA_NOTICE: &str = "Authentication error or missing data. Please try again.";
pub const LOAD_FAILED_NOTICE: &str = "Error loading patient appointments. Please try again.";
const NONE_MESSAGE: &str = "No appointments found.";
const ERROR_MESSAGE: &str = "Error loading appointments. Please try again later.";

fn scope_message(scope: DateScope) -> &'static str {
    match scope {
        DateScope::Upcoming => "No upcoming appointments found for this patient with this doctor.",
        DateScope::Past => "No past appointments found for this patient with this doctor.",
        DateScope::All => "No appointments found for this patient with this doctor.",
    }
}

#[derive(Debug)]
struct RecordState {
    scope: DateScope,
    slot: ContentSlot,
}

pub struct PatientRecord {
    ctx: PageContext,
    patient_id: Option<String>,
    doctor_id: Option<String>,
    state: Mutex<RecordState>,
    sequencer: RequestSequencer,
}

impl PatientRecord {
    pub fn new(ctx: PageContext, location: &Location) -> Self {
        Self {
            ctx,
            patient_id: location.param("patientId").map(str::to_string),
            doctor_id: location.param("doctorId").map(str::to_string),
            state: Mutex::new(RecordState {
                scope: DateScope::All,
                slot: ContentSlot::new("patientAppointmentsTableBody"),
            }),
            sequencer: RequestSequencer::new(),
        }
    }

    async fn fetch(&self, patient_id: &str, doctor_id: &str) -> Result<()> {
        let Some(token) = self.ctx.store.get_token()? else {
            return self.ctx.router.expire_session();
        };
        let (ticket, scope) = {
            let state = self.state.lock().await;
            (self.sequencer.issue(), state.scope)
        };

        let result = self
            .ctx
            .api
            .patient_appointments(patient_id, Role::Doctor, &token)
            .await;

        let mut state = self.state.lock().await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%scope, "Discarding stale patient record");
            return Ok(());
        }
        match result {
            Ok(appointments) if appointments.is_empty() => {
                state.slot.show_items(Vec::new(), NONE_MESSAGE);
            }
            Ok(appointments) => {
                let today = self.ctx.clock.today();
                let filter = AppointmentFilter::new(scope, "");
                let rows = appointments
                    .iter()
                    .filter(|a| filter.matches(a, today) && a.belongs_to_doctor(doctor_id))
                    .map(patient_record_row)
                    .collect();
                state.slot.show_items(rows, scope_message(scope));
            }
            Err(err) => {
                if self.ctx.fetch_failed(&err, "patient record")? {
                    return Ok(());
                }
                self.ctx.notify(LOAD_FAILED_NOTICE);
                state.slot.show_error(ERROR_MESSAGE);
            }
        }
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        match (self.patient_id.as_deref(), self.doctor_id.as_deref()) {
            (Some(patient_id), Some(doctor_id)) => self.fetch(patient_id, doctor_id).await,
            _ => {
                tracing::warn!(patient = ?self.patient_id, doctor = ?self.doctor_id, "Patient record without ids");
                self.ctx.notify(MISSING_DATA_NOTICE);
                self.ctx.router.go(Page::Landing);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl PageController for PatientRecord {
    fn page(&self) -> Page {
        Page::PatientRecord
    }

    async fn load(&self) -> Result<()> {
        if let GuardOutcome::Redirected = self.ctx.router.require_role(Role::Doctor)? {
            return Ok(());
        }
        self.reload().await
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Input {
                field: Field::Scope,
                value,
            } => {
                self.state.lock().await.scope = DateScope::from_str(value.trim()).unwrap_or_default();
                self.reload().await
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
        PageView::new("Patient Record", self.ctx.header(), state.slot.node())
            .with_toolbar(appointment_filter_bar(&AppointmentFilter::new(state.scope, "")))
    }
}
