//! Prescription form for one appointment, in add or view mode.

use async_trait::async_trait;
use tokio::sync::Mutex;

use hcms_core::error::Result;
use hcms_core::prescription::{Prescription, PrescriptionMode};
use hcms_core::role::Role;
use hcms_core::route::{GuardOutcome, Location, Page};

use super::{Form, PageController, UiEvent, ignored};
use crate::context::PageContext;
use crate::view::{PageView, prescription_form};

pub const SAVED_NOTICE: &str = "Prescription saved successfully!";
pub const SAVE_FAILED_NOTICE: &str = "Failed to save prescription.";
const SAVE_ERROR_NOTICE: &str =
    "An unexpected error occurred while saving the prescription. Please try again.";

pub struct PrescriptionPage {
    ctx: PageContext,
    mode: PrescriptionMode,
    form: Mutex<Prescription>,
}

impl PrescriptionPage {
    pub fn new(ctx: PageContext, location: &Location) -> Self {
        let form = Prescription {
            appointment_id: location.param("appointmentId").unwrap_or_default().to_string(),
            patient_name: location.param("patientName").unwrap_or_default().to_string(),
            ..Default::default()
        };
        Self {
            ctx,
            mode: PrescriptionMode::from_query(location.param("mode")),
            form: Mutex::new(form),
        }
    }

    pub fn mode(&self) -> PrescriptionMode {
        self.mode
    }

    /// Fills the form with the stored prescription, if one exists.
    async fn prefill(&self, token: &str) -> Result<()> {
        let appointment_id = self.form.lock().await.appointment_id.clone();
        if appointment_id.is_empty() {
            return Ok(());
        }
        match self.ctx.api.get_prescription(&appointment_id, token).await {
            Ok(Some(existing)) => {
                let mut form = self.form.lock().await;
                form.medication = existing.medication;
                form.dosage = existing.dosage;
                form.notes = existing.notes;
                if form.patient_name.is_empty() {
                    form.patient_name = existing.patient_name;
                }
            }
            Ok(None) => tracing::debug!(%appointment_id, "No prescription yet"),
            Err(err) => {
                self.ctx.fetch_failed(&err, "prescription")?;
            }
        }
        Ok(())
    }

    async fn save(&self, medication: String, dosage: String, notes: String) -> Result<()> {
        if self.mode.is_read_only() {
            tracing::warn!("Ignoring save in view mode");
            return Ok(());
        }
        let prescription = {
            let mut form = self.form.lock().await;
            form.medication = medication;
            form.dosage = dosage;
            form.notes = notes;
            form.clone()
        };
        if let Err(err) = prescription.validate() {
            self.ctx.notify(&err.to_string());
            return Ok(());
        }
        let Some(token) = self.ctx.require_token()? else {
            return Ok(());
        };

        match self.ctx.api.save_prescription(&prescription, &token).await {
            Ok(outcome) if outcome.success => {
                tracing::info!(appointment = %prescription.appointment_id, "Prescription saved");
                self.ctx.report(&outcome, SAVED_NOTICE);
                self.ctx.router.select_role(Role::Doctor);
            }
            Ok(outcome) => {
                tracing::warn!(message = %outcome.message, "Prescription not saved");
                self.ctx.report(&outcome, SAVE_FAILED_NOTICE);
            }
            Err(err) => {
                tracing::error!(error = %err, "Save prescription request failed");
                self.ctx.notify(SAVE_ERROR_NOTICE);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageController for PrescriptionPage {
    fn page(&self) -> Page {
        Page::AddPrescription
    }

    async fn load(&self) -> Result<()> {
        let session = match self.ctx.router.require_role(Role::Doctor)? {
            GuardOutcome::Proceed(session) => session,
            GuardOutcome::Redirected => return Ok(()),
        };
        match session.token() {
            Some(token) => self.prefill(token).await,
            None => Ok(()),
        }
    }

    async fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Submit(Form::Prescription {
                medication,
                dosage,
                notes,
            }) => self.save(medication, dosage, notes).await?,
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
        let form = self.form.lock().await;
        PageView::new(self.mode.heading(), self.ctx.header(), prescription_form(&form, self.mode))
    }
}
