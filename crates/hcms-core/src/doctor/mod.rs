//! Doctor domain module.

mod model;

pub use model::{Doctor, NewDoctor, SPECIALTIES, STANDARD_SLOTS, TimeOfDay, slot_start};
