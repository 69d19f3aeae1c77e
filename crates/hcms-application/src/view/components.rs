//! Renderers for cards, table rows, the header and placeholders.

use hcms_core::appointment::Appointment;
use hcms_core::doctor::Doctor;
use hcms_core::patient::Patient;
use hcms_core::role::Role;
use hcms_core::route::{Location, Page};

use super::node::{Action, ModalKind, PLACEHOLDER_CLASS, ViewNode};

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn cell(value: impl Into<String>) -> ViewNode {
    ViewNode::text_node("td", value)
}

fn button(label: &str, action: Action) -> ViewNode {
    ViewNode::text_node("button", label).action(action)
}

/// A doctor's card with the actions the viewing role may take.
///
/// Anonymous visitors see the same "Book Now" prompt as browsing patients.
pub fn doctor_card(doctor: &Doctor, role: Option<Role>) -> ViewNode {
    let availability = if doctor.availability.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        doctor.availability.join(", ")
    };

    let info = ViewNode::new("div")
        .class("doctor-info")
        .child(ViewNode::text_node("h3", doctor.name.clone()))
        .child(ViewNode::text_node(
            "p",
            format!("Specialty: {}", or_na(Some(doctor.specialty.as_str()))),
        ))
        .child(ViewNode::text_node(
            "p",
            format!("Email: {}", or_na(Some(doctor.email.as_str()))),
        ))
        .child(ViewNode::text_node(
            "p",
            format!("Availability: {}", availability),
        ));

    let action = match role {
        Some(Role::Admin) => Some(
            button(
                "Delete",
                Action::DeleteDoctor {
                    id: doctor.id.clone(),
                    name: doctor.name.clone(),
                },
            )
            .class("adminBtn"),
        ),
        Some(Role::LoggedPatient) => Some(
            button(
                "Book Now",
                Action::OpenBooking {
                    doctor: doctor.clone(),
                },
            )
            .class("bookBtn"),
        ),
        Some(Role::Patient) | None => Some(button("Book Now", Action::LoginRequired).class("bookBtn")),
        Some(Role::Doctor) => None,
    };

    ViewNode::new("div")
        .class("doctor-card")
        .attr("data-doctor-id", doctor.id.clone())
        .child(info)
        .maybe_child(action.map(|a| ViewNode::new("div").class("card-actions").child(a)))
}

fn prescription_link(appointment_id: &str, mode: Option<&str>, patient_name: &str) -> Location {
    let location = Location::new(Page::AddPrescription).with("appointmentId", appointment_id);
    let location = match mode {
        Some(mode) => location.with("mode", mode),
        None => location,
    };
    location.with("patientName", patient_name)
}

/// Row of the doctor's appointment table.
pub fn appointment_row(appointment: &Appointment) -> ViewNode {
    let patient_name = appointment.patient_name.as_deref().unwrap_or_default();
    ViewNode::new("tr")
        .class("appointment-row")
        .child(cell(or_na(appointment.patient_name.as_deref())))
        .child(cell(or_na(appointment.doctor_name.as_deref())))
        .child(cell(or_na(appointment.appointment_date.as_deref())))
        .child(cell(or_na(appointment.time_label().as_deref())))
        .child(
            ViewNode::new("td").child(
                button(
                    "Edit",
                    Action::Navigate(prescription_link(&appointment.id, Some("add"), patient_name)),
                )
                .class("prescription-btn"),
            ),
        )
}

/// Row of a patient's own appointment list. Only scheduled appointments
/// can be edited.
pub fn patient_appointment_row(appointment: &Appointment) -> ViewNode {
    let edit = if appointment.is_editable() {
        let mut location = Location::new(Page::UpdateAppointment).with("appointmentId", appointment.id.clone());
        let optional = [
            ("patientId", appointment.patient_id.as_deref()),
            ("doctorId", appointment.doctor_id.as_deref()),
            ("doctorName", appointment.doctor_name.as_deref()),
            ("appointmentDate", appointment.appointment_date.as_deref()),
            ("appointmentTime", appointment.appointment_time.as_deref()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                location = location.with(key, value);
            }
        }
        ViewNode::new("td").child(button("Edit", Action::Navigate(location)).class("edit-btn"))
    } else {
        cell("-")
    };

    ViewNode::new("tr")
        .class("appointment-row")
        .child(cell("You"))
        .child(cell(or_na(appointment.doctor_name.as_deref())))
        .child(cell(or_na(appointment.appointment_date.as_deref())))
        .child(cell(or_na(appointment.time_label().as_deref())))
        .child(edit)
}

/// Row of the doctor dashboard's patient table.
pub fn patient_row(patient: &Patient, appointment_id: &str, doctor_id: Option<&str>) -> ViewNode {
    let mut record = Location::new(Page::PatientRecord).with("patientId", patient.id.clone());
    if let Some(doctor_id) = doctor_id {
        record = record.with("doctorId", doctor_id);
    }

    ViewNode::new("tr")
        .class("patient-row")
        .child(
            cell(or_na(Some(patient.id.as_str())))
                .class("patient-id")
                .action(Action::Navigate(record)),
        )
        .child(cell(or_na(Some(patient.name.as_str()))))
        .child(cell(or_na(patient.phone.as_deref())))
        .child(cell(or_na(Some(patient.email.as_str()))))
        .child(
            ViewNode::new("td").child(
                button(
                    "Prescription",
                    Action::Navigate(prescription_link(appointment_id, None, &patient.name)),
                )
                .class("prescription-btn"),
            ),
        )
}

/// Row of the patient record table.
pub fn patient_record_row(appointment: &Appointment) -> ViewNode {
    let patient_name = appointment.patient_name.as_deref().unwrap_or_default();
    ViewNode::new("tr")
        .class("record-row")
        .child(cell(or_na(appointment.appointment_date.as_deref())))
        .child(cell(or_na(Some(appointment.id.as_str()))))
        .child(cell(or_na(appointment.patient_id.as_deref())))
        .child(
            ViewNode::new("td").child(
                button(
                    "View",
                    Action::Navigate(prescription_link(&appointment.id, Some("view"), patient_name)),
                )
                .class("prescription-btn"),
            ),
        )
}

fn logo() -> ViewNode {
    ViewNode::new("div")
        .class("logo-section")
        .child(ViewNode::text_node("span", "Hospital CMS").class("logo-title"))
}

/// The landing page header: logo only.
pub fn landing_header() -> ViewNode {
    ViewNode::new("header").class("header").child(logo())
}

/// Role-specific navigation header. A privileged role without a token is
/// rendered like an anonymous visitor; the guard has already redirected.
pub fn header(role: Option<Role>, has_token: bool) -> ViewNode {
    let role = role.filter(|r| !r.is_privileged() || has_token);
    let nav: Vec<ViewNode> = match role {
        Some(Role::Admin) => vec![
            button("Add Doctor", Action::OpenModal(ModalKind::AddDoctor)).class("adminBtn"),
            ViewNode::text_node("a", "Logout").action(Action::Logout),
        ],
        Some(Role::Doctor) => vec![
            button("Home", Action::SelectRole(Role::Doctor)).class("adminBtn"),
            ViewNode::text_node("a", "Logout").action(Action::Logout),
        ],
        Some(Role::LoggedPatient) => vec![
            button(
                "Home",
                Action::Navigate(Location::new(Page::LoggedPatientDashboard)),
            )
            .class("adminBtn"),
            button(
                "Appointments",
                Action::Navigate(Location::new(Page::PatientAppointments)),
            )
            .class("adminBtn"),
            ViewNode::text_node("a", "Logout").action(Action::LogoutPatient),
        ],
        Some(Role::Patient) | None => vec![
            button("Login", Action::OpenModal(ModalKind::PatientLogin)).class("adminBtn"),
            button("Sign Up", Action::OpenModal(ModalKind::PatientSignup)).class("adminBtn"),
        ],
    };

    ViewNode::new("header")
        .class("header")
        .child(logo())
        .child(ViewNode::new("nav").children(nav))
}

pub fn empty_state(message: &str) -> ViewNode {
    ViewNode::text_node("p", message).class(&format!("empty-state {}", PLACEHOLDER_CLASS))
}

pub fn error_state(message: &str) -> ViewNode {
    ViewNode::text_node("p", message).class(&format!("error-state {}", PLACEHOLDER_CLASS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> Doctor {
        Doctor {
            id: "d1".into(),
            name: "Dr. Grey".into(),
            specialty: "Cardiologist".into(),
            email: "grey@example.com".into(),
            availability: vec!["09:00 - 10:00".into(), "10:00 - 11:00".into()],
            ..Default::default()
        }
    }

    fn actions(node: &ViewNode) -> Vec<Action> {
        node.collect_actions().into_iter().map(|(_, a)| a.clone()).collect()
    }

    #[test]
    fn test_doctor_card_content() {
        let card = doctor_card(&doctor(), Some(Role::Doctor));
        let text = card.all_text();
        assert!(text.contains("Specialty: Cardiologist"));
        assert!(text.contains("Availability: 09:00 - 10:00, 10:00 - 11:00"));
        assert!(actions(&card).is_empty());

        let bare = doctor_card(&Doctor::default(), Some(Role::Doctor));
        assert!(bare.all_text().contains("Availability: N/A"));
    }

    #[test]
    fn test_doctor_card_actions_by_role() {
        let d = doctor();
        assert_eq!(
            actions(&doctor_card(&d, Some(Role::Admin))),
            vec![Action::DeleteDoctor {
                id: "d1".into(),
                name: "Dr. Grey".into()
            }]
        );
        assert_eq!(
            actions(&doctor_card(&d, Some(Role::Patient))),
            vec![Action::LoginRequired]
        );
        assert_eq!(actions(&doctor_card(&d, None)), vec![Action::LoginRequired]);
        assert_eq!(
            actions(&doctor_card(&d, Some(Role::LoggedPatient))),
            vec![Action::OpenBooking { doctor: d.clone() }]
        );
    }

    #[test]
    fn test_appointment_row_links_to_prescription() {
        let appointment = Appointment {
            id: "42".into(),
            patient_name: Some("Ada".into()),
            ..Default::default()
        };
        let row = appointment_row(&appointment);
        assert!(row.all_text().contains("N/A"));
        match actions(&row).as_slice() {
            [Action::Navigate(location)] => assert_eq!(
                location.href(),
                "/addPrescription.html?appointmentId=42&mode=add&patientName=Ada"
            ),
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn test_patient_row_edit_only_when_scheduled() {
        let mut appointment = Appointment {
            id: "7".into(),
            doctor_id: Some("d1".into()),
            doctor_name: Some("Dr. Grey".into()),
            status: 0,
            ..Default::default()
        };
        let row = patient_appointment_row(&appointment);
        assert!(row.all_text().starts_with("You"));
        assert_eq!(actions(&row).len(), 1);

        appointment.status = 1;
        assert!(actions(&patient_appointment_row(&appointment)).is_empty());
    }

    #[test]
    fn test_patient_row_links() {
        let patient = Patient {
            id: "p1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        };
        let row = patient_row(&patient, "a9", Some("d1"));
        let hrefs: Vec<String> = actions(&row)
            .into_iter()
            .filter_map(|a| match a {
                Action::Navigate(l) => Some(l.href()),
                _ => None,
            })
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "/patientRecord.html?patientId=p1&doctorId=d1".to_string(),
                "/addPrescription.html?appointmentId=a9&patientName=Ada".to_string(),
            ]
        );
        assert!(row.all_text().contains("N/A"), "missing phone renders N/A");
    }

    #[test]
    fn test_record_row_opens_view_mode() {
        let appointment = Appointment {
            id: "5".into(),
            patient_id: Some("p1".into()),
            patient_name: Some("Ada".into()),
            appointment_date: Some("2025-02-01".into()),
            ..Default::default()
        };
        match actions(&patient_record_row(&appointment)).as_slice() {
            [Action::Navigate(location)] => {
                assert_eq!(location.param("mode"), Some("view"));
                assert_eq!(location.param("appointmentId"), Some("5"));
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn test_header_navigation_by_role() {
        let labels = |node: ViewNode| -> Vec<String> {
            node.collect_actions().into_iter().map(|(l, _)| l).collect()
        };
        assert_eq!(labels(header(Some(Role::Admin), true)), ["Add Doctor", "Logout"]);
        assert_eq!(labels(header(Some(Role::Doctor), true)), ["Home", "Logout"]);
        assert_eq!(
            labels(header(Some(Role::LoggedPatient), true)),
            ["Home", "Appointments", "Logout"]
        );
        assert_eq!(labels(header(Some(Role::Patient), false)), ["Login", "Sign Up"]);
        assert_eq!(labels(header(None, false)), ["Login", "Sign Up"]);
        assert_eq!(labels(header(Some(Role::Admin), false)), ["Login", "Sign Up"]);
    }

    #[test]
    fn test_placeholders_are_marked() {
        assert!(empty_state("none").is_placeholder());
        assert!(error_state("boom").is_placeholder());
        assert!(error_state("boom").has_class("error-state"));
    }
}
