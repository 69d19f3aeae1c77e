//! Landing page: role selection and staff login.

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::error::Result;
use hcms_core::role::Role;
use hcms_core::route::Page;

use super::login::{admin_login, doctor_login};
use super::{Form, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::view::{Action, ModalKind, PageView, landing_header, modal_view, role_selector};

pub struct LandingPage {
    ctx: PageContext,
    modal: Mutex<Option<ModalKind>>,
}

impl LandingPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            modal: Mutex::new(None),
        }
    }

    async fn open(&self, modal: Option<ModalKind>) {
        *self.modal.lock().await = modal;
    }
}

#[async_trait]
impl PageController for LandingPage {
    fn page(&self) -> Page {
        Page::Landing
    }

    async fn load(&self) -> Result<()> {
        self.ctx.router.enter_landing()?;
        Ok(())
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            // Staff roles log in before their dashboard opens.
            UiEvent::Click(Action::SelectRole(Role::Admin)) => {
                self.open(Some(ModalKind::AdminLogin)).await;
            }
            UiEvent::Click(Action::SelectRole(Role::Doctor)) => {
                self.open(Some(ModalKind::DoctorLogin)).await;
            }
            UiEvent::Click(Action::OpenModal(kind)) => self.open(Some(kind)).await,
            UiEvent::Click(Action::CloseModal) => self.open(None).await,
            UiEvent::Click(action) => {
                if !self.ctx.dispatch_common(&action)? {
                    ignored(self.page(), &UiEvent::Click(action));
                }
            }
            UiEvent::Submit(Form::AdminLogin(credentials)) => {
                if admin_login(&self.ctx, &credentials).await? {
                    self.open(None).await;
                }
            }
            UiEvent::Submit(Form::DoctorLogin(credentials)) => {
                if doctor_login(&self.ctx, &credentials).await? {
                    self.open(None).await;
                }
            }
            other => ignored(self.page(), &other),
        }
        Ok(())
    }

    async fn view(&self) -> PageView {
        let modal = self.modal.lock().await.map(modal_view);
        PageView::new("Hospital CMS", landing_header(), role_selector()).with_modal(modal)
    }
}
