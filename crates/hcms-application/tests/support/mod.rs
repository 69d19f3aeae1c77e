//! Test doubles for page controller tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use hcms_application::PageContext;
use hcms_core::api::{ActionOutcome, AppointmentApi, AuthApi, DoctorApi, PatientApi, PrescriptionApi};
use hcms_core::appointment::{Appointment, AppointmentUpdate, BookingRequest};
use hcms_core::auth::{AdminCredentials, LoginCredentials};
use hcms_core::clock::Clock;
use hcms_core::doctor::{Doctor, NewDoctor};
use hcms_core::error::{HcmsError, Result};
use hcms_core::filter::{DateScope, DoctorFilter};
use hcms_core::host::{Navigator, Notifier};
use hcms_core::patient::{Patient, PatientSignup};
use hcms_core::prescription::Prescription;
use hcms_core::role::Role;
use hcms_core::route::{Location, Page};
use hcms_core::session::{KeyValueStorage, SessionStore};
use hcms_infrastructure::MemoryStorage;

/// Every backend call the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListDoctors,
    FilterDoctors(DoctorFilter),
    SaveDoctor(NewDoctor),
    DeleteDoctor(String),
    AdminLogin(AdminCredentials),
    DoctorLogin(LoginCredentials),
    PatientLogin(LoginCredentials),
    Signup(PatientSignup),
    CurrentPatient,
    PatientAppointments { patient_id: String, viewer: Role },
    FilterPatientAppointments(DateScope),
    AppointmentsByDate { date: Option<NaiveDate>, name: Option<String> },
    Book(BookingRequest),
    Update(AppointmentUpdate),
    GetPrescription(String),
    SavePrescription(Prescription),
}

/// Canned responses.
pub struct MockState {
    pub doctors: Result<Vec<Doctor>>,
    /// Delay applied to a filter request, keyed by its name criterion.
    pub filter_delays: HashMap<String, Duration>,
    pub patient: Result<Patient>,
    pub appointments: Result<Vec<Appointment>>,
    pub prescription: Result<Option<Prescription>>,
    pub outcome: ActionOutcome,
    pub token: Result<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            doctors: Ok(Vec::new()),
            filter_delays: HashMap::new(),
            patient: Ok(patient("p1", "Ada")),
            appointments: Ok(Vec::new()),
            prescription: Ok(None),
            outcome: ActionOutcome::ok("done"),
            token: Ok("tok-1".to_string()),
        }
    }
}

#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn configure(&self, f: impl FnOnce(&mut MockState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn with<T>(&self, f: impl FnOnce(&MockState) -> T) -> T {
        f(&self.state.lock().unwrap())
    }
}

#[async_trait]
impl DoctorApi for MockApi {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.record(Call::ListDoctors);
        self.with(|s| s.doctors.clone())
    }

    async fn filter_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        self.record(Call::FilterDoctors(filter.clone()));
        let name = filter.name.clone().unwrap_or_default();
        let delay = self.with(|s| s.filter_delays.get(&name).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let needle = name.to_lowercase();
        self.with(|s| {
            s.doctors.clone().map(|doctors| {
                doctors
                    .into_iter()
                    .filter(|d| d.name.to_lowercase().contains(&needle))
                    .collect()
            })
        })
    }

    async fn save_doctor(&self, doctor: &NewDoctor, _token: &str) -> Result<ActionOutcome> {
        self.record(Call::SaveDoctor(doctor.clone()));
        Ok(self.with(|s| s.outcome.clone()))
    }

    async fn delete_doctor(&self, id: &str, _token: &str) -> Result<ActionOutcome> {
        self.record(Call::DeleteDoctor(id.to_string()));
        Ok(self.with(|s| s.outcome.clone()))
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn admin_login(&self, credentials: &AdminCredentials) -> Result<String> {
        self.record(Call::AdminLogin(credentials.clone()));
        self.with(|s| s.token.clone())
    }

    async fn doctor_login(&self, credentials: &LoginCredentials) -> Result<String> {
        self.record(Call::DoctorLogin(credentials.clone()));
        self.with(|s| s.token.clone())
    }

    async fn patient_login(&self, credentials: &LoginCredentials) -> Result<String> {
        self.record(Call::PatientLogin(credentials.clone()));
        self.with(|s| s.token.clone())
    }
}

#[async_trait]
impl PatientApi for MockApi {
    async fn patient_signup(&self, signup: &PatientSignup) -> Result<ActionOutcome> {
        self.record(Call::Signup(signup.clone()));
        Ok(self.with(|s| s.outcome.clone()))
    }

    async fn current_patient(&self, _token: &str) -> Result<Patient> {
        self.record(Call::CurrentPatient);
        self.with(|s| s.patient.clone())
    }

    async fn patient_appointments(
        &self,
        patient_id: &str,
        viewer: Role,
        _token: &str,
    ) -> Result<Vec<Appointment>> {
        self.record(Call::PatientAppointments {
            patient_id: patient_id.to_string(),
            viewer,
        });
        self.with(|s| s.appointments.clone())
    }

    async fn filter_patient_appointments(
        &self,
        scope: DateScope,
        _doctor_name: Option<&str>,
        _token: &str,
    ) -> Result<Vec<Appointment>> {
        self.record(Call::FilterPatientAppointments(scope));
        self.with(|s| s.appointments.clone())
    }
}

#[async_trait]
impl AppointmentApi for MockApi {
    async fn appointments_by_date(
        &self,
        date: Option<NaiveDate>,
        patient_name: Option<&str>,
        _token: &str,
    ) -> Result<Vec<Appointment>> {
        self.record(Call::AppointmentsByDate {
            date,
            name: patient_name.map(str::to_string),
        });
        self.with(|s| s.appointments.clone())
    }

    async fn book_appointment(&self, request: &BookingRequest, _token: &str) -> Result<ActionOutcome> {
        self.record(Call::Book(request.clone()));
        Ok(self.with(|s| s.outcome.clone()))
    }

    async fn update_appointment(
        &self,
        update: &AppointmentUpdate,
        _token: &str,
    ) -> Result<ActionOutcome> {
        self.record(Call::Update(update.clone()));
        Ok(self.with(|s| s.outcome.clone()))
    }
}

#[async_trait]
impl PrescriptionApi for MockApi {
    async fn get_prescription(&self, appointment_id: &str, _token: &str) -> Result<Option<Prescription>> {
        self.record(Call::GetPrescription(appointment_id.to_string()));
        self.with(|s| s.prescription.clone())
    }

    async fn save_prescription(&self, prescription: &Prescription, _token: &str) -> Result<ActionOutcome> {
        self.record(Call::SavePrescription(prescription.clone()));
        Ok(self.with(|s| s.outcome.clone()))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Location>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: Location) {
        self.visits.lock().unwrap().push(location);
    }
}

pub struct RecordingNotifier {
    notices: Mutex<Vec<String>>,
    confirms: AtomicBool,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            confirms: AtomicBool::new(true),
        }
    }
}

impl RecordingNotifier {
    pub fn answer_confirm(&self, yes: bool) {
        self.confirms.store(yes, Ordering::SeqCst);
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.notices.lock().unwrap().push(message.to_string());
        self.confirms.load(Ordering::SeqCst)
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub fn doctor(id: &str, name: &str) -> Doctor {
    Doctor {
        id: id.into(),
        name: name.into(),
        specialty: "Cardiologist".into(),
        email: format!("{}@example.com", id),
        availability: vec!["09:00 - 10:00".into(), "10:00 - 11:00".into()],
        ..Default::default()
    }
}

pub fn patient(id: &str, name: &str) -> Patient {
    Patient {
        id: id.into(),
        name: name.into(),
        email: format!("{}@example.com", id),
        ..Default::default()
    }
}

pub fn appointment(id: &str, patient_id: &str, doctor_id: &str, date: &str, status: i32) -> Appointment {
    Appointment {
        id: id.into(),
        patient_id: Some(patient_id.into()),
        doctor_id: Some(doctor_id.into()),
        patient_name: Some("Ada".into()),
        doctor_name: Some("Dr. Grey".into()),
        appointment_date: Some(date.into()),
        appointment_time: Some("09:00".into()),
        status,
        ..Default::default()
    }
}

/// A page context wired to test doubles.
pub struct Harness {
    pub api: Arc<MockApi>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub storage: Arc<MemoryStorage>,
    pub ctx: PageContext,
}

impl Harness {
    pub fn new() -> Self {
        let api = Arc::new(MockApi::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let storage = Arc::new(MemoryStorage::new());
        let ctx = PageContext::new(
            SessionStore::new(storage.clone()),
            api.clone(),
            navigator.clone(),
            notifier.clone(),
            Arc::new(FixedClock(today())),
        );
        Self {
            api,
            navigator,
            notifier,
            storage,
            ctx,
        }
    }

    /// A harness whose storage already holds `role` and `token`.
    pub fn signed_in(role: Role, token: Option<&str>) -> Self {
        let harness = Self::new();
        harness.ctx.store.set_role(role).unwrap();
        if let Some(token) = token {
            harness.ctx.store.set_token(token).unwrap();
        }
        harness
    }

    pub fn visits(&self) -> Vec<Location> {
        self.navigator.visits.lock().unwrap().clone()
    }

    pub fn last_page(&self) -> Option<Page> {
        self.visits().last().map(|l| l.page)
    }

    pub fn notices(&self) -> Vec<String> {
        self.notifier.notices.lock().unwrap().clone()
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).unwrap()
    }

    pub fn err_network() -> HcmsError {
        HcmsError::network("connection refused")
    }
}
