//! Doctor dashboard: the day's patients.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use hcms_core::appointment::Appointment;
use hcms_core::error::Result;
use hcms_core::patient::Patient;
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Page};

use super::{Field, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::sequencer::RequestSequencer;
use crate::view::{Action, ContentSlot, PageView, date_bar, patient_row};

pub const NO_APPOINTMENTS_MESSAGE: &str = "No appointments found for the selected date.";
pub const APPOINTMENTS_ERROR_MESSAGE: &str = "Error loading appointments. Please try again later.";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
struct DashboardState {
    date: NaiveDate,
    patient_name: Option<String>,
    slot: ContentSlot,
}

pub struct DoctorDashboard {
    ctx: PageContext,
    state: Mutex<DashboardState>,
    sequencer: RequestSequencer,
}

/// The patient columns an appointment carries.
fn patient_of(appointment: &Appointment) -> Patient {
    Patient {
        id: appointment.patient_id.clone().unwrap_or_default(),
        name: appointment.patient_name.clone().unwrap_or_default(),
        email: appointment.patient_email.clone().unwrap_or_default(),
        phone: appointment.patient_phone.clone(),
        address: None,
    }
}

impl DoctorDashboard {
    pub fn new(ctx: PageContext) -> Self {
        let today = ctx.clock.today();
        Self {
            ctx,
            state: Mutex::new(DashboardState {
                date: today,
                patient_name: None,
                slot: ContentSlot::new("patientTableBody"),
            }),
            sequencer: RequestSequencer::new(),
        }
    }

    async fn fetch(&self) -> Result<()> {
        let Some(token) = self.ctx.store.get_token()? else {
            return self.ctx.router.expire_session();
        };
        let (ticket, date, name) = {
            let state = self.state.lock().await;
            (self.sequencer.issue(), state.date, state.patient_name.clone())
        };

        let result = self
            .ctx
            .api
            .appointments_by_date(Some(date), name.as_deref(), &token)
            .await;

        let mut state = self.state.lock().await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%date, "Discarding stale appointment list");
            return Ok(());
        }
        match result {
            Ok(appointments) => {
                let rows = appointments
                    .iter()
                    .map(|a| patient_row(&patient_of(a), &a.id, a.doctor_id.as_deref()))
                    .collect();
                state.slot.show_items(rows, NO_APPOINTMENTS_MESSAGE);
            }
            Err(err) => {
                if self.ctx.fetch_failed(&err, "appointments")? {
                    return Ok(());
                }
                state.slot.show_error(APPOINTMENTS_ERROR_MESSAGE);
            }
        }
        Ok(())
    }

    async fn set_date(&self, date: NaiveDate) -> Result<()> {
        self.state.lock().await.date = date;
        self.fetch().await
    }
}

#[async_trait]
impl PageController for DoctorDashboard {
    fn page(&self) -> Page {
        Page::DoctorDashboard
    }

    async fn load(&self) -> Result<()> {
        if let GuardOutcome::Redirected = self.ctx.router.require_role(Role::Doctor)? {
            return Ok(());
        }
        self.fetch().await
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Click(Action::ShowToday) => self.set_date(self.ctx.clock.today()).await,
            UiEvent::Input {
                field: Field::Date,
                value,
            } => match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
                Ok(date) => self.set_date(date).await,
                Err(err) => {
                    tracing::warn!(%value, error = %err, "Ignoring unreadable date");
                    Ok(())
                }
            },
            UiEvent::Input {
                field: Field::Search,
                value,
            } => {
                let trimmed = value.trim();
                self.state.lock().await.patient_name =
                    (!trimmed.is_empty()).then(|| trimmed.to_string());
                self.fetch().await
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
        let toolbar = date_bar(
            &state.date.format(DATE_FORMAT).to_string(),
            state.patient_name.as_deref(),
        );
        PageView::new("Doctor Dashboard", self.ctx.header(), state.slot.node()).with_toolbar(toolbar)
    }
}
