//! Login and signup flows shared by the landing page and the patient
//! dashboard.

use hcms_core::auth::{AdminCredentials, LoginCredentials};
use hcms_core::error::{HcmsError, Result};
use hcms_core::patient::PatientSignup;
use hcms_core::role::Role;
use hcms_core::route::Page;

use crate::context::{PageContext, UNEXPECTED_ERROR_NOTICE};

pub const INVALID_USERNAME_NOTICE: &str = "Invalid username or password!";
pub const INVALID_EMAIL_NOTICE: &str = "Invalid email or password!";
pub const SIGNUP_DONE_NOTICE: &str = "Registration completed successfully.";
pub const SIGNUP_FAILED_NOTICE: &str = "Registration failed.";

/// Logs an admin in. Returns `true` once the session has started.
pub(crate) async fn admin_login(ctx: &PageContext, credentials: &AdminCredentials) -> Result<bool> {
    if let Err(err) = credentials.validate() {
        ctx.notify(&err.to_string());
        return Ok(false);
    }
    let result = ctx.api.admin_login(credentials).await;
    finish(ctx, Role::Admin, result, INVALID_USERNAME_NOTICE, Page::AdminDashboard)
}

pub(crate) async fn doctor_login(ctx: &PageContext, credentials: &LoginCredentials) -> Result<bool> {
    if let Err(err) = credentials.validate() {
        ctx.notify(&err.to_string());
        return Ok(false);
    }
    let result = ctx.api.doctor_login(credentials).await;
    finish(ctx, Role::Doctor, result, INVALID_USERNAME_NOTICE, Page::DoctorDashboard)
}

pub(crate) async fn patient_login(ctx: &PageContext, credentials: &LoginCredentials) -> Result<bool> {
    if let Err(err) = credentials.validate() {
        ctx.notify(&err.to_string());
        return Ok(false);
    }
    let result = ctx.api.patient_login(credentials).await;
    finish(
        ctx,
        Role::LoggedPatient,
        result,
        INVALID_EMAIL_NOTICE,
        Page::LoggedPatientDashboard,
    )
}

fn finish(
    ctx: &PageContext,
    role: Role,
    result: Result<String>,
    invalid_notice: &str,
    destination: Page,
) -> Result<bool> {
    match result {
        Ok(token) => {
            ctx.store.begin(role, &token)?;
            ctx.router.go(destination);
            Ok(true)
        }
        Err(HcmsError::InvalidCredentials) => {
            tracing::info!(%role, "Login refused");
            ctx.notify(invalid_notice);
            Ok(false)
        }
        Err(err) if err.is_validation() => {
            ctx.notify(&err.to_string());
            Ok(false)
        }
        Err(err) => {
            tracing::error!(%role, error = %err, "Login request failed");
            ctx.notify(UNEXPECTED_ERROR_NOTICE);
            Ok(false)
        }
    }
}

/// Registers a patient. Returns `true` when the backend accepted it.
pub(crate) async fn patient_signup(ctx: &PageContext, signup: &PatientSignup) -> Result<bool> {
    if let Err(err) = signup.validate() {
        ctx.notify(&err.to_string());
        return Ok(false);
    }
    match ctx.api.patient_signup(signup).await {
        Ok(outcome) if outcome.success => {
            tracing::info!("Patient registered");
            ctx.report(&outcome, SIGNUP_DONE_NOTICE);
            Ok(true)
        }
        Ok(outcome) => {
            ctx.report(&outcome, SIGNUP_FAILED_NOTICE);
            Ok(false)
        }
        Err(err) => {
            tracing::error!(error = %err, "Signup request failed");
            ctx.notify(UNEXPECTED_ERROR_NOTICE);
            Ok(false)
        }
    }
}
