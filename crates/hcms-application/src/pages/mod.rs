//! Page controllers.
//!
//! One controller per page. The host mounts the controller for the current
//! [`Location`], calls [`PageController::load`] once, then feeds it
//! [`UiEvent`]s and renders [`PageController::view`] after each.
//!
//! Controllers take `&self` and keep their state behind an async mutex, so
//! a host may handle filter inputs concurrently. Re-fetching filters are
//! stamped by a [`RequestSequencer`](crate::sequencer::RequestSequencer) and
//! only the latest completion is applied.

mod admin_dashboard;
mod appointment_record;
mod doctor_board;
mod doctor_dashboard;
mod landing;
mod login;
mod patient_appointments;
mod patient_dashboard;
mod patient_record;
mod prescription;
mod update_appointment;

use std::sync::Arc;

use async_trait::async_trait;

use hcms_core::auth::{AdminCredentials, LoginCredentials};
use hcms_core::doctor::NewDoctor;
use hcms_core::error::Result;
use hcms_core::patient::PatientSignup;
use hcms_core::route::{Location, Page};

use crate::context::PageContext;
use crate::view::{Action, PageView};

pub use admin_dashboard::AdminDashboard;
pub use appointment_record::AppointmentRecord;
pub use doctor_dashboard::DoctorDashboard;
pub use landing::LandingPage;
pub use login::{INVALID_EMAIL_NOTICE, INVALID_USERNAME_NOTICE};
pub use patient_appointments::PatientAppointments;
pub use patient_dashboard::PatientDashboard;
pub use patient_record::PatientRecord;
pub use prescription::PrescriptionPage;
pub use update_appointment::UpdateAppointment;

/// Inputs whose change re-filters the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Free-text name search.
    Search,
    /// `AM` / `PM` doctor filter.
    Time,
    Specialty,
    /// Selected calendar date, `YYYY-MM-DD`.
    Date,
    /// `all` / `upcoming` / `past`.
    Scope,
}

/// Submitted forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    AdminLogin(AdminCredentials),
    DoctorLogin(LoginCredentials),
    PatientLogin(LoginCredentials),
    PatientSignup(PatientSignup),
    AddDoctor(NewDoctor),
    Booking {
        date: String,
        time: String,
    },
    UpdateAppointment {
        date: String,
        time: String,
    },
    Prescription {
        medication: String,
        dosage: String,
        notes: String,
    },
}

/// A user interaction delivered to the mounted page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(Action),
    Input { field: Field, value: String },
    Submit(Form),
}

#[async_trait]
pub trait PageController: Send + Sync {
    fn page(&self) -> Page;

    /// Guards the page and fetches its initial data.
    async fn load(&self) -> Result<()>;

    async fn handle(&self, event: UiEvent) -> Result<()>;

    /// The page as it should be displayed now.
    async fn view(&self) -> PageView;
}

/// Creates the controller for `location`.
pub fn mount(location: &Location, ctx: PageContext) -> Arc<dyn PageController> {
    tracing::debug!(page = %location.page, "Mounting page");
    match location.page {
        Page::Landing => Arc::new(LandingPage::new(ctx)),
        Page::AdminDashboard => Arc::new(AdminDashboard::new(ctx)),
        Page::DoctorDashboard => Arc::new(DoctorDashboard::new(ctx)),
        Page::PatientDashboard | Page::LoggedPatientDashboard => {
            Arc::new(PatientDashboard::new(ctx, location.page))
        }
        Page::PatientAppointments => Arc::new(PatientAppointments::new(ctx)),
        Page::PatientRecord => Arc::new(PatientRecord::new(ctx, location)),
        Page::AppointmentRecord => Arc::new(AppointmentRecord::new(ctx)),
        Page::UpdateAppointment => Arc::new(UpdateAppointment::new(ctx, location)),
        Page::AddPrescription => Arc::new(PrescriptionPage::new(ctx, location)),
    }
}

/// Logs an event the mounted page has no use for.
pub(crate) fn ignored(page: Page, event: &UiEvent) {
    tracing::debug!(%page, ?event, "Ignoring event");
}
