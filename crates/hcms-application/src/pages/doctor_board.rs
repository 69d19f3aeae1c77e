//! Doctor card list with server-side filtering, shared by the admin and
//! patient dashboards.

use tokio::sync::Mutex;

use hcms_core::doctor::Doctor;
use hcms_core::error::Result;
use hcms_core::filter::DoctorFilter;
use hcms_core::role::Role;

use super::Field;
use crate::context::PageContext;
use crate::sequencer::RequestSequencer;
use crate::view::{ContentSlot, ViewNode, doctor_card, doctor_filter_bar};

/// Placeholder texts of one board.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoardMessages {
    /// No doctors at all.
    pub empty: &'static str,
    /// The filter matched nothing.
    pub no_match: &'static str,
    pub load_error: &'static str,
    pub filter_error: &'static str,
}

pub(crate) const FILTER_ALERT: &str = "Error filtering doctors. Please try again.";

#[derive(Debug)]
struct BoardState {
    role: Option<Role>,
    name: String,
    time: String,
    specialty: String,
    doctors: Vec<Doctor>,
    slot: ContentSlot,
}

impl BoardState {
    fn filter(&self) -> DoctorFilter {
        DoctorFilter::from_inputs(&self.name, &self.time, &self.specialty)
    }

    fn show(&mut self, doctors: Vec<Doctor>, empty_message: &str) {
        let cards = doctors.iter().map(|d| doctor_card(d, self.role)).collect();
        self.slot.show_items(cards, empty_message);
        self.doctors = doctors;
    }
}

pub(crate) struct DoctorBoard {
    state: Mutex<BoardState>,
    sequencer: RequestSequencer,
    messages: BoardMessages,
}

impl DoctorBoard {
    pub fn new(messages: BoardMessages) -> Self {
        Self {
            state: Mutex::new(BoardState {
                role: None,
                name: String::new(),
                time: String::new(),
                specialty: String::new(),
                doctors: Vec::new(),
                slot: ContentSlot::new("content"),
            }),
            sequencer: RequestSequencer::new(),
            messages,
        }
    }

    /// Sets the role cards are rendered for and re-renders the current list.
    pub async fn set_role(&self, role: Option<Role>) {
        let mut state = self.state.lock().await;
        state.role = role;
        if !state.doctors.is_empty() {
            let doctors = std::mem::take(&mut state.doctors);
            state.show(doctors, self.messages.empty);
        }
    }

    /// Updates one filter input and re-fetches.
    pub async fn set_input(&self, ctx: &PageContext, field: Field, value: String) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            match field {
                Field::Search => state.name = value,
                Field::Time => state.time = value,
                Field::Specialty => state.specialty = value,
                Field::Date | Field::Scope => return Ok(()),
            }
        }
        self.refresh(ctx).await
    }

    /// Fetches the doctors matching the current filter. A completion that
    /// is no longer the latest request is dropped.
    pub async fn refresh(&self, ctx: &PageContext) -> Result<()> {
        let (ticket, filter) = {
            let state = self.state.lock().await;
            (self.sequencer.issue(), state.filter())
        };

        let result = if filter.is_empty() {
            ctx.api.list_doctors().await
        } else {
            ctx.api.filter_doctors(&filter).await
        };

        let mut state = self.state.lock().await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(?filter, "Discarding stale doctor list");
            return Ok(());
        }
        match result {
            Ok(doctors) => {
                tracing::debug!(count = doctors.len(), "Doctors loaded");
                let message = if filter.is_empty() {
                    self.messages.empty
                } else {
                    self.messages.no_match
                };
                state.show(doctors, message);
            }
            Err(err) => {
                if ctx.fetch_failed(&err, "doctors")? {
                    return Ok(());
                }
                state.doctors.clear();
                if filter.is_empty() {
                    state.slot.show_error(self.messages.load_error);
                } else {
                    ctx.notify(FILTER_ALERT);
                    state.slot.show_error(self.messages.filter_error);
                }
            }
        }
        Ok(())
    }

    /// Drops a deleted doctor's card.
    pub async fn remove(&self, doctor_id: &str) {
        let mut state = self.state.lock().await;
        let mut doctors = std::mem::take(&mut state.doctors);
        doctors.retain(|d| d.id != doctor_id);
        state.show(doctors, self.messages.empty);
    }

    pub async fn doctor(&self, doctor_id: &str) -> Option<Doctor> {
        let state = self.state.lock().await;
        state.doctors.iter().find(|d| d.id == doctor_id).cloned()
    }

    pub async fn toolbar(&self) -> ViewNode {
        let state = self.state.lock().await;
        doctor_filter_bar(&state.filter())
    }

    pub async fn content(&self) -> ViewNode {
        self.state.lock().await.slot.node()
    }
}
