//! Renderers for modals, forms and filter controls.

use hcms_core::doctor::{Doctor, SPECIALTIES, STANDARD_SLOTS, TimeOfDay};
use hcms_core::filter::{AppointmentFilter, DateScope, DoctorFilter};
use hcms_core::patient::Patient;
use hcms_core::prescription::{Prescription, PrescriptionMode};
use hcms_core::role::Role;

use super::node::{Action, ModalKind, ViewNode};

fn input(name: &str, kind: &str, value: &str) -> ViewNode {
    ViewNode::new("input")
        .attr("type", kind)
        .attr("name", name)
        .attr("value", value)
}

fn read_only(node: ViewNode) -> ViewNode {
    node.attr("readonly", "readonly")
}

fn labelled(label: &str, control: ViewNode) -> ViewNode {
    ViewNode::text_node("label", label).child(control)
}

fn select<'a>(name: &str, selected: Option<&str>, options: impl IntoIterator<Item = (&'a str, &'a str)>) -> ViewNode {
    let options = options.into_iter().map(|(value, label)| {
        let option = ViewNode::text_node("option", label).attr("value", value);
        if selected == Some(value) {
            option.attr("selected", "selected")
        } else {
            option
        }
    });
    ViewNode::new("select")
        .attr("name", name)
        .attr("value", selected.unwrap_or_default())
        .children(options)
}

fn submit(label: &str) -> ViewNode {
    ViewNode::text_node("button", label).attr("type", "submit")
}

fn modal(title: &str, form_id: &str, body: Vec<ViewNode>) -> ViewNode {
    ViewNode::new("div")
        .class("modal")
        .child(
            ViewNode::text_node("span", "Close")
                .class("close")
                .action(Action::CloseModal),
        )
        .child(ViewNode::text_node("h2", title))
        .child(ViewNode::new("form").attr("data-form", form_id).children(body))
}

/// Login dialog for the given role.
pub fn login_modal(kind: ModalKind) -> ViewNode {
    let (title, form_id, identity) = match kind {
        ModalKind::AdminLogin => ("Admin Login", "adminLogin", ("username", "text")),
        ModalKind::DoctorLogin => ("Doctor Login", "doctorLogin", ("email", "email")),
        _ => ("Patient Login", "patientLogin", ("email", "email")),
    };
    modal(
        title,
        form_id,
        vec![
            input(identity.0, identity.1, ""),
            input("password", "password", ""),
            submit("Login"),
        ],
    )
}

pub fn signup_modal() -> ViewNode {
    modal(
        "Patient Signup",
        "patientSignup",
        vec![
            input("name", "text", ""),
            input("email", "email", ""),
            input("password", "password", ""),
            input("phone", "tel", ""),
            input("address", "text", ""),
            submit("Signup"),
        ],
    )
}

pub fn add_doctor_modal() -> ViewNode {
    let specialties = SPECIALTIES.iter().map(|s| (*s, *s));
    let slots = STANDARD_SLOTS.iter().map(|slot| {
        labelled(
            slot,
            ViewNode::new("input")
                .attr("type", "checkbox")
                .attr("name", "availability")
                .attr("value", *slot),
        )
    });
    modal(
        "Add Doctor",
        "addDoctor",
        vec![
            input("name", "text", ""),
            select("specialty", None, specialties),
            input("email", "email", ""),
            input("password", "password", ""),
            input("phone", "tel", ""),
            ViewNode::new("fieldset")
                .child(ViewNode::text_node("legend", "Availability"))
                .children(slots),
            submit("Save"),
        ],
    )
}

/// The dialog for `kind`.
pub fn modal_view(kind: ModalKind) -> ViewNode {
    match kind {
        ModalKind::AddDoctor => add_doctor_modal(),
        ModalKind::PatientSignup => signup_modal(),
        login => login_modal(login),
    }
}

/// Booking dialog: doctor and patient summary, a date input and a time
/// select populated from the doctor's availability.
pub fn booking_overlay(doctor: &Doctor, patient: &Patient) -> ViewNode {
    let slots = doctor.availability.iter().map(|s| (s.as_str(), s.as_str()));
    ViewNode::new("div")
        .class("modalApp booking-overlay")
        .child(
            ViewNode::text_node("span", "Close")
                .class("close")
                .action(Action::CloseModal),
        )
        .child(ViewNode::text_node("h2", "Book Appointment"))
        .child(
            ViewNode::new("form")
                .attr("data-form", "booking")
                .child(labelled("Doctor", read_only(input("doctor", "text", &doctor.summary()))))
                .child(labelled("Patient", read_only(input("patient", "text", &patient.label()))))
                .child(labelled("Date", input("appointmentDate", "date", "")))
                .child(labelled("Time", select("appointmentTime", None, slots)))
                .child(submit("Confirm Booking")),
        )
}

/// Prescription form. View mode makes every field read-only and hides the
/// save button.
pub fn prescription_form(prescription: &Prescription, mode: PrescriptionMode) -> ViewNode {
    let editable = |node: ViewNode| if mode.is_read_only() { read_only(node) } else { node };
    let notes = ViewNode::new("textarea")
        .attr("name", "notes")
        .attr("value", prescription.notes.clone());

    ViewNode::new("div")
        .class("prescription-form")
        .child(ViewNode::text_node("h2", mode.heading()))
        .child(
            ViewNode::new("form")
                .attr("data-form", "prescription")
                .child(labelled(
                    "Patient Name",
                    read_only(input("patientName", "text", &prescription.patient_name)),
                ))
                .child(labelled(
                    "Medication",
                    editable(input("medication", "text", &prescription.medication)),
                ))
                .child(labelled(
                    "Dosage",
                    editable(input("dosage", "text", &prescription.dosage)),
                ))
                .child(labelled("Notes", editable(notes)))
                .maybe_child((!mode.is_read_only()).then(|| submit("Save Prescription"))),
        )
}

/// Form for moving an appointment to another date or slot.
pub fn update_appointment_form(
    doctor_name: &str,
    date: &str,
    time: Option<&str>,
    slots: &[String],
) -> ViewNode {
    let options = slots.iter().map(|s| (s.as_str(), s.as_str()));
    ViewNode::new("div")
        .class("update-appointment")
        .child(ViewNode::text_node("h2", "Update Appointment"))
        .child(
            ViewNode::new("form")
                .attr("data-form", "updateAppointment")
                .child(labelled("Doctor", read_only(input("doctorName", "text", doctor_name))))
                .child(labelled("Date", input("appointmentDate", "date", date)))
                .child(labelled("Time", select("appointmentTime", time, options)))
                .child(submit("Update")),
        )
}

/// Search input plus time and specialty selects of the doctor lists.
pub fn doctor_filter_bar(filter: &DoctorFilter) -> ViewNode {
    let times = [
        ("", "Sort by time"),
        (TimeOfDay::Am.as_ref(), "AM"),
        (TimeOfDay::Pm.as_ref(), "PM"),
    ];
    let specialties = std::iter::once(("", "Filter by specialty")).chain(SPECIALTIES.iter().map(|s| (*s, *s)));
    ViewNode::new("div")
        .class("filter-bar")
        .child(
            input("search", "text", filter.name.as_deref().unwrap_or_default())
                .attr("placeholder", "Search by name"),
        )
        .child(select("time", filter.time.as_deref(), times))
        .child(select("specialty", filter.specialty.as_deref(), specialties))
}

/// Search input and date-scope select of the appointment lists.
pub fn appointment_filter_bar(filter: &AppointmentFilter) -> ViewNode {
    let scopes = [DateScope::All, DateScope::Upcoming, DateScope::Past];
    let options: Vec<(&str, &str)> = scopes
        .iter()
        .map(|s| (s.as_ref(), s.as_ref()))
        .collect();
    ViewNode::new("div")
        .class("filter-bar")
        .child(
            input("search", "text", filter.search.as_deref().unwrap_or_default())
                .attr("placeholder", "Search by name"),
        )
        .child(select("scope", Some(filter.scope.as_ref()), options))
}

/// Date picker, "today" shortcut and patient search of the doctor dashboard.
pub fn date_bar(date: &str, patient_name: Option<&str>) -> ViewNode {
    ViewNode::new("div")
        .class("filter-bar")
        .child(
            input("search", "text", patient_name.unwrap_or_default())
                .attr("placeholder", "Search by patient name"),
        )
        .child(ViewNode::text_node("button", "Today").action(Action::ShowToday))
        .child(input("date", "date", date))
}

/// The role buttons of the landing page.
pub fn role_selector() -> ViewNode {
    let choice = |label: &str, role: Role| {
        ViewNode::text_node("button", label)
            .class("dashboard-btn")
            .action(Action::SelectRole(role))
    };
    ViewNode::new("div")
        .class("role-selector")
        .child(ViewNode::text_node("h2", "Select Your Role:"))
        .child(choice("Admin", Role::Admin))
        .child(choice("Patient", Role::Patient))
        .child(choice("Doctor", Role::Doctor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_controls(node: &ViewNode) -> Vec<&ViewNode> {
        node.walk()
            .into_iter()
            .filter(|n| matches!(n.tag, "input" | "textarea" | "select"))
            .collect()
    }

    #[test]
    fn test_booking_overlay_offers_doctor_slots() {
        let doctor = Doctor {
            id: "d1".into(),
            name: "Dr. Grey".into(),
            availability: vec!["09:00".into(), "10:00".into()],
            ..Default::default()
        };
        let patient = Patient {
            id: "p1".into(),
            name: "Ada".into(),
            ..Default::default()
        };
        let overlay = booking_overlay(&doctor, &patient);
        let options: Vec<&str> = overlay
            .walk()
            .into_iter()
            .filter(|n| n.tag == "option")
            .filter_map(|n| n.attr_value("value"))
            .collect();
        assert_eq!(options, vec!["09:00", "10:00"]);
        assert!(overlay.to_html().contains("value=\"Ada (ID: p1)\""));
    }

    #[test]
    fn test_prescription_view_mode_is_read_only() {
        let prescription = Prescription {
            appointment_id: "a1".into(),
            patient_name: "Ada".into(),
            medication: "Ibuprofen".into(),
            dosage: "200mg".into(),
            notes: "after meals".into(),
        };

        let view = prescription_form(&prescription, PrescriptionMode::View);
        assert!(view.all_text().contains("View Prescription"));
        assert!(form_controls(&view)
            .iter()
            .all(|c| c.attr_value("readonly").is_some()));
        assert!(!view.walk().iter().any(|n| n.attr_value("type") == Some("submit")));

        let add = prescription_form(&prescription, PrescriptionMode::Add);
        assert!(add.all_text().contains("Add Prescription"));
        let editable = form_controls(&add)
            .iter()
            .filter(|c| c.attr_value("readonly").is_none())
            .count();
        assert_eq!(editable, 3);
        assert!(add.walk().iter().any(|n| n.attr_value("type") == Some("submit")));
    }

    #[test]
    fn test_filter_bar_marks_selection() {
        let filter = DoctorFilter::from_inputs("", "PM", "");
        let bar = doctor_filter_bar(&filter);
        let selected: Vec<&str> = bar
            .walk()
            .into_iter()
            .filter(|n| n.attr_value("selected").is_some())
            .filter_map(|n| n.text.as_deref())
            .collect();
        assert_eq!(selected, vec!["PM"]);
    }

    #[test]
    fn test_role_selector_offers_three_roles() {
        let roles: Vec<Action> = role_selector()
            .collect_actions()
            .into_iter()
            .map(|(_, a)| a.clone())
            .collect();
        assert_eq!(
            roles,
            vec![
                Action::SelectRole(Role::Admin),
                Action::SelectRole(Role::Patient),
                Action::SelectRole(Role::Doctor)
            ]
        );
    }
}
