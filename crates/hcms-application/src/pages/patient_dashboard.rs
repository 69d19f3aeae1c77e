//! Patient dashboard: browse doctors, log in, sign up and book.
//!
//! Serves both the anonymous patient portal and the logged-in patient's
//! dashboard; the doctor cards differ by role.

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::doctor::Doctor;
use hcms_core::error::Result;
use hcms_core::route::{GuardOutcome, Page};

use super::doctor_board::{BoardMessages, DoctorBoard};
use super::login::{patient_login, patient_signup};
use super::{Form, PageController, UiEvent, ignored};
use crate::booking::BookingForm;
use crate::context::PageContext;
use crate::view::{Action, ModalKind, PageView, modal_view};

const MESSAGES: BoardMessages = BoardMessages {
    empty: "No doctors found in the system.",
    no_match: "No doctors found with the given filters.",
    load_error: "An error occurred while loading doctors.",
    filter_error: "Error filtering doctors.",
};

pub const LOGIN_REQUIRED_NOTICE: &str = "You must first log in to book an appointment.";
pub const PATIENT_LOOKUP_FAILED_NOTICE: &str =
    "An error occurred while retrieving patient information.";

#[derive(Debug, Default)]
enum Overlay {
    #[default]
    None,
    Modal(ModalKind),
    Booking(BookingForm),
}

pub struct PatientDashboard {
    ctx: PageContext,
    page: Page,
    board: DoctorBoard,
    overlay: Mutex<Overlay>,
}

impl PatientDashboard {
    pub fn new(ctx: PageContext, page: Page) -> Self {
        Self {
            ctx,
            page,
            board: DoctorBoard::new(MESSAGES),
            overlay: Mutex::new(Overlay::None),
        }
    }

    async fn set_overlay(&self, overlay: Overlay) {
        *self.overlay.lock().await = overlay;
    }

    async fn open_booking(&self, doctor: Doctor) -> Result<()> {
        let Some(token) = self.ctx.require_token()? else {
            return Ok(());
        };
        match self.ctx.api.current_patient(&token).await {
            Ok(patient) => {
                tracing::debug!(doctor = %doctor.id, patient = %patient.id, "Opening booking overlay");
                self.set_overlay(Overlay::Booking(BookingForm::new(doctor, patient)))
                    .await;
            }
            Err(err) => {
                if !self.ctx.fetch_failed(&err, "patient")? {
                    self.ctx.notify(PATIENT_LOOKUP_FAILED_NOTICE);
                }
            }
        }
        Ok(())
    }

    async fn submit_booking(&self, date: &str, time: &str) -> Result<()> {
        let form = match &*self.overlay.lock().await {
            Overlay::Booking(form) => form.clone(),
            _ => {
                tracing::warn!("Booking submitted without an open overlay");
                return Ok(());
            }
        };
        let outcome = form.submit(&self.ctx, date, time).await?;
        if outcome.is_some_and(|o| o.success) {
            self.set_overlay(Overlay::None).await;
        }
        Ok(())
    }
}

#[async_trait]
impl PageController for PatientDashboard {
    fn page(&self) -> Page {
        self.page
    }

    async fn load(&self) -> Result<()> {
        let session = match self.ctx.router.enter(self.page)? {
            GuardOutcome::Proceed(session) => session,
            GuardOutcome::Redirected => return Ok(()),
        };
        if session.role.is_none() {
            tracing::info!("No role selected, returning to landing");
            self.ctx.router.go(Page::Landing);
            return Ok(());
        }
        self.board.set_role(session.role).await;
        self.board.refresh(&self.ctx).await
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Click(Action::OpenModal(kind)) => self.set_overlay(Overlay::Modal(kind)).await,
            UiEvent::Click(Action::CloseModal) => self.set_overlay(Overlay::None).await,
            UiEvent::Click(Action::LoginRequired) => self.ctx.notify(LOGIN_REQUIRED_NOTICE),
            UiEvent::Click(Action::OpenBooking { doctor }) => self.open_booking(doctor).await?,
            UiEvent::Click(action) => {
                if !self.ctx.dispatch_common(&action)? {
                    ignored(self.page, &UiEvent::Click(action));
                }
            }
            UiEvent::Input { field, value } => {
                self.board.set_input(&self.ctx, field, value).await?
            }
            UiEvent::Submit(Form::PatientLogin(credentials)) => {
                if patient_login(&self.ctx, &credentials).await? {
                    self.set_overlay(Overlay::None).await;
                }
            }
            UiEvent::Submit(Form::PatientSignup(signup)) => {
                if patient_signup(&self.ctx, &signup).await? {
                    self.set_overlay(Overlay::Modal(ModalKind::PatientLogin)).await;
                }
            }
            UiEvent::Submit(Form::Booking { date, time }) => {
                self.submit_booking(&date, &time).await?
            }
            other => ignored(self.page, &other),
        }
        Ok(())
    }

    async fn view(&self) -> PageView {
        let modal = match &*self.overlay.lock().await {
            Overlay::None => None,
            Overlay::Modal(kind) => Some(modal_view(*kind)),
            Overlay::Booking(form) => Some(form.overlay()),
        };
        PageView::new("Patient Dashboard", self.ctx.header(), self.board.content().await)
            .with_toolbar(self.board.toolbar().await)
            .with_modal(modal)
    }
}
