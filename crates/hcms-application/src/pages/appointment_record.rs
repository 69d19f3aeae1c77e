//! Every appointment of the viewing doctor, scoped by date.

use std::str::FromStr;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::error::Result;
use hcms_core::filter::{AppointmentFilter, DateScope};
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Page};

use super::{Field, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::sequencer::RequestSequencer;
use crate::view::{ContentSlot, PageView, appointment_filter_bar, appointment_row};

const NONE_MESSAGE: &str = "No appointments found.";
const ERROR_MESSAGE: &str = "Error loading appointment records. Please try again later.";

#[derive(Debug)]
struct RecordState {
    scope: DateScope,
    slot: ContentSlot,
}

pub struct AppointmentRecord {
    ctx: PageContext,
    state: Mutex<RecordState>,
    sequencer: RequestSequencer,
}

impl AppointmentRecord {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(RecordState {
                scope: DateScope::Upcoming,
                slot: ContentSlot::new("appointmentRecordTableBody"),
            }),
            sequencer: RequestSequencer::new(),
        }
    }

    async fn fetch(&self) -> Result<()> {
        let Some(token) = self.ctx.store.get_token()? else {
            return self.ctx.router.expire_session();
        };
        let (ticket, scope) = {
            let state = self.state.lock().await;
            (self.sequencer.issue(), state.scope)
        };

        let result = self.ctx.api.appointments_by_date(None, None, &token).await;

        let mut state = self.state.lock().await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%scope, "Discarding stale appointment records");
            return Ok(());
        }
        match result {
            Ok(appointments) if appointments.is_empty() => {
                state.slot.show_items(Vec::new(), NONE_MESSAGE);
            }
            Ok(appointments) => {
                let visible = AppointmentFilter::new(scope, "").apply(&appointments, self.ctx.clock.today());
                let rows = visible.iter().map(appointment_row).collect();
                state.slot.show_items(rows, scope.empty_message());
            }
            Err(err) => {
                if self.ctx.fetch_failed(&err, "appointment records")? {
                    return Ok(());
                }
                state.slot.show_error(ERROR_MESSAGE);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageController for AppointmentRecord {
    fn page(&self) -> Page {
        Page::AppointmentRecord
    }

    async fn load(&self) -> Result<()> {
        if let GuardOutcome::Redirected = self.ctx.router.require_role(Role::Doctor)? {
            return Ok(());
        }
        self.fetch().await
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Input {
                field: Field::Scope,
                value,
            } => {
                self.state.lock().await.scope = DateScope::from_str(value.trim()).unwrap_or_default();
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
        PageView::new("Appointment Records", self.ctx.header(), state.slot.node())
            .with_toolbar(appointment_filter_bar(&AppointmentFilter::new(state.scope, "")))
    }
}
