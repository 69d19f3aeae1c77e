//! Admin dashboard: manage the doctor roster.

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::doctor::NewDoctor;
use hcms_core::error::Result;
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Page};

use super::doctor_board::{BoardMessages, DoctorBoard};
use super::{Form, PageController, UiEvent, ignored};
use crate::context::{PageContext, UNEXPECTED_ERROR_NOTICE};
use crate::view::{Action, ModalKind, PageView, add_doctor_modal};

const MESSAGES: BoardMessages = BoardMessages {
    empty: "There is no doctor in the system yet.",
    no_match: "No doctors found matching the given filters.",
    load_error: "An error occurred while loading doctors.",
    filter_error: "Error filtering doctors.",
};

pub const DOCTOR_ADDED_NOTICE: &str = "Doctor added successfully.";
pub const DOCTOR_ADD_FAILED_NOTICE: &str = "An error occurred while adding the doctor.";

pub struct AdminDashboard {
    ctx: PageContext,
    board: DoctorBoard,
    modal: Mutex<Option<ModalKind>>,
}

impl AdminDashboard {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            board: DoctorBoard::new(MESSAGES),
            modal: Mutex::new(None),
        }
    }

    async fn add_doctor(&self, doctor: NewDoctor) -> Result<()> {
        if let Err(err) = doctor.validate() {
            self.ctx.notify(&err.to_string());
            return Ok(());
        }
        let Some(token) = self.ctx.require_token()? else {
            self.ctx.router.go(Page::Landing);
            return Ok(());
        };

        match self.ctx.api.save_doctor(&doctor, &token).await {
            Ok(outcome) if outcome.success => {
                tracing::info!(name = %doctor.name, "Doctor added");
                self.ctx.report(&outcome, DOCTOR_ADDED_NOTICE);
                *self.modal.lock().await = None;
                self.board.refresh(&self.ctx).await
            }
            Ok(outcome) => {
                tracing::warn!(message = %outcome.message, "Doctor not added");
                self.ctx.report(&outcome, DOCTOR_ADD_FAILED_NOTICE);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "Add doctor request failed");
                self.ctx.notify(UNEXPECTED_ERROR_NOTICE);
                Ok(())
            }
        }
    }

    async fn delete_doctor(&self, id: &str, name: &str) -> Result<()> {
        if !self
            .ctx
            .notifier
            .confirm(&format!("Are you sure you want to delete {}?", name))
        {
            return Ok(());
        }
        let Some(token) = self.ctx.require_token()? else {
            return Ok(());
        };

        match self.ctx.api.delete_doctor(id, &token).await {
            Ok(outcome) if outcome.success => {
                tracing::info!(%id, "Doctor deleted");
                self.board.remove(id).await;
                self.ctx
                    .notify(&format!("Doctor {} deleted successfully.", name));
            }
            Ok(outcome) => {
                tracing::warn!(%id, message = %outcome.message, "Doctor not deleted");
                self.ctx
                    .report(&outcome, &format!("Could not delete doctor: {}.", name));
            }
            Err(err) => {
                tracing::error!(error = %err, "Delete doctor request failed");
                self.ctx
                    .notify("An unexpected error occurred while deleting the doctor.");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageController for AdminDashboard {
    fn page(&self) -> Page {
        Page::AdminDashboard
    }

    async fn load(&self) -> Result<()> {
        if let GuardOutcome::Redirected = self.ctx.router.require_role(Role::Admin)? {
            return Ok(());
        }
        self.board.set_role(Some(Role::Admin)).await;
        self.board.refresh(&self.ctx).await
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Click(Action::OpenModal(ModalKind::AddDoctor)) => {
                *self.modal.lock().await = Some(ModalKind::AddDoctor);
                Ok(())
            }
            UiEvent::Click(Action::CloseModal) => {
                *self.modal.lock().await = None;
                Ok(())
            }
            UiEvent::Click(Action::DeleteDoctor { id, name }) => self.delete_doctor(&id, &name).await,
            UiEvent::Click(action) => {
                if !self.ctx.dispatch_common(&action)? {
                    ignored(self.page(), &UiEvent::Click(action));
                }
                Ok(())
            }
            UiEvent::Input { field, value } => self.board.set_input(&self.ctx, field, value).await,
            UiEvent::Submit(Form::AddDoctor(doctor)) => self.add_doctor(doctor).await,
            other => {
                ignored(self.page(), &other);
                Ok(())
            }
        }
    }

    async fn view(&self) -> PageView {
        let modal = self.modal.lock().await.map(|_| add_doctor_modal());
        PageView::new("Admin Dashboard", self.ctx.header(), self.board.content().await)
            .with_toolbar(self.board.toolbar().await)
            .with_modal(modal)
    }
}
