mod support;

use hcms_application::booking::{BOOKED_NOTICE, BOOKING_INCOMPLETE};
use hcms_application::pages::PatientDashboard;
use hcms_application::view::Action;
use hcms_application::{Form, PageController, UiEvent};
use hcms_core::api::ActionOutcome;
use hcms_core::appointment::BookingRequest;
use hcms_core::role::Role;
use hcms_core::route::Page;
use support::{Call, Harness, doctor, patient};

async fn open_overlay(harness: &Harness) -> PatientDashboard {
    harness.api.configure(|s| {
        s.doctors = Ok(vec![doctor("d1", "Dr. Grey")]);
        s.patient = Ok(patient("p1", "Ada"));
        s.outcome = ActionOutcome::ok("");
    });
    let page = PatientDashboard::new(harness.ctx.clone(), Page::LoggedPatientDashboard);
    page.load().await.unwrap();
    page.handle(UiEvent::Click(Action::OpenBooking {
        doctor: doctor("d1", "Dr. Grey"),
    }))
    .await
    .unwrap();
    page
}

fn booking(date: &str, time: &str) -> UiEvent {
    UiEvent::Submit(Form::Booking {
        date: date.into(),
        time: time.into(),
    })
}

fn booked(harness: &Harness) -> Vec<BookingRequest> {
    harness
        .api
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Book(request) => Some(request),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_booking_sends_slot_start_and_closes_overlay() {
    let harness = Harness::signed_in(Role::LoggedPatient, Some("tok"));
    let page = open_overlay(&harness).await;

    let modal = page.view().await.modal.expect("booking overlay open");
    let html = modal.to_html();
    assert!(html.contains("Dr. Grey - Cardiologist"));
    assert!(html.contains("Ada (ID: p1)"));

    page.handle(booking("2025-01-01", "09:00 - 10:00")).await.unwrap();

    assert_eq!(
        booked(&harness),
        vec![BookingRequest {
            doctor_id: "d1".into(),
            patient_id: "p1".into(),
            appointment_date: "2025-01-01".into(),
            appointment_time: "09:00".into(),
        }]
    );
    assert_eq!(harness.notices(), vec![BOOKED_NOTICE]);
    assert!(page.view().await.modal.is_none());
}

#[tokio::test]
async fn test_booking_with_plain_hour_slots() {
    let harness = Harness::signed_in(Role::LoggedPatient, Some("tok"));
    let mut d1 = doctor("d1", "Dr. Grey");
    d1.availability = vec!["09:00".into(), "10:00".into()];
    harness.api.configure(|s| {
        s.doctors = Ok(vec![d1.clone()]);
        s.patient = Ok(patient("p1", "Ada"));
        s.outcome = ActionOutcome::ok("");
    });
    let page = PatientDashboard::new(harness.ctx.clone(), Page::LoggedPatientDashboard);
    page.load().await.unwrap();
    page.handle(UiEvent::Click(Action::OpenBooking { doctor: d1 }))
        .await
        .unwrap();

    page.handle(booking("2025-01-01", "09:00")).await.unwrap();

    assert_eq!(
        booked(&harness),
        vec![BookingRequest {
            doctor_id: "d1".into(),
            patient_id: "p1".into(),
            appointment_date: "2025-01-01".into(),
            appointment_time: "09:00".into(),
        }]
    );
    assert_eq!(harness.notices(), vec![BOOKED_NOTICE]);
}

#[tokio::test]
async fn test_incomplete_booking_is_not_sent() {
    let harness = Harness::signed_in(Role::LoggedPatient, Some("tok"));
    let page = open_overlay(&harness).await;

    page.handle(booking("", "09:00")).await.unwrap();
    page.handle(booking("2025-01-01", "  ")).await.unwrap();

    assert!(booked(&harness).is_empty());
    assert_eq!(harness.notices(), vec![BOOKING_INCOMPLETE, BOOKING_INCOMPLETE]);
    assert!(page.view().await.modal.is_some(), "overlay stays open");
}

#[tokio::test]
async fn test_rejected_booking_keeps_overlay_open() {
    let harness = Harness::signed_in(Role::LoggedPatient, Some("tok"));
    let page = open_overlay(&harness).await;
    harness
        .api
        .configure(|s| s.outcome = ActionOutcome::failed("Slot already taken"));

    page.handle(booking("2025-01-01", "09:00")).await.unwrap();

    assert_eq!(booked(&harness).len(), 1);
    assert_eq!(harness.notices(), vec!["Slot already taken"]);
    assert!(page.view().await.modal.is_some());
}

#[tokio::test]
async fn test_browsing_patient_must_log_in_to_book() {
    let harness = Harness::signed_in(Role::Patient, None);
    harness
        .api
        .configure(|s| s.doctors = Ok(vec![doctor("d1", "Dr. Grey")]));
    let page = PatientDashboard::new(harness.ctx.clone(), Page::PatientDashboard);
    page.load().await.unwrap();

    let content = page.view().await.content;
    let actions: Vec<Action> = content
        .collect_actions()
        .into_iter()
        .map(|(_, a)| a.clone())
        .collect();
    assert_eq!(actions, vec![Action::LoginRequired]);

    page.handle(UiEvent::Click(Action::LoginRequired)).await.unwrap();
    assert_eq!(
        harness.notices(),
        vec!["You must first log in to book an appointment."]
    );
    assert!(!harness.api.calls().contains(&Call::CurrentPatient));
}
