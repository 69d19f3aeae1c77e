//! Appointment domain module.

mod model;

pub use model::{
    Appointment, AppointmentUpdate, BookingRequest, STATUS_COMPLETED, STATUS_SCHEDULED,
};
