//! Prescription domain module.

mod model;

pub use model::{Prescription, PrescriptionMode};
