//! View renderers.
//!
//! Renderers are pure functions from domain values to a [`ViewNode`] tree.
//! Hosts turn the tree into HTML ([`render_document`]) or terminal text
//! ([`ViewNode::to_text`]) and dispatch the attached [`Action`]s back to the
//! page controller that produced them.

mod components;
mod document;
mod forms;
mod node;
mod page_view;

pub use components::{
    appointment_row, doctor_card, empty_state, error_state, header, landing_header,
    patient_appointment_row, patient_record_row, patient_row,
};
pub use document::render_document;
pub use forms::{
    add_doctor_modal, appointment_filter_bar, booking_overlay, date_bar, doctor_filter_bar,
    login_modal, modal_view, prescription_form, role_selector, signup_modal, update_appointment_form,
};
pub use node::{Action, ContentSlot, ModalKind, PLACEHOLDER_CLASS, ViewNode, escape};
pub use page_view::PageView;
