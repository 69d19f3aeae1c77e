//! Doctor domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{HcmsError, Result};

/// Hourly slots offered when registering a doctor.
pub const STANDARD_SLOTS: [&str; 8] = [
    "09:00 - 10:00",
    "10:00 - 11:00",
    "11:00 - 12:00",
    "12:00 - 13:00",
    "13:00 - 14:00",
    "14:00 - 15:00",
    "15:00 - 16:00",
    "16:00 - 17:00",
];

/// Specialties offered by the filter and registration forms.
pub const SPECIALTIES: [&str; 10] = [
    "Cardiologist",
    "Dermatologist",
    "Neurologist",
    "Pediatrician",
    "Orthopedic",
    "Gynecologist",
    "Psychiatrist",
    "Dentist",
    "Ophthalmologist",
    "ENT",
];

/// A doctor as listed by the backend.
///
/// Owned by the backend; the portal only holds transient copies for
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(default, deserialize_with = "crate::wire::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "crate::wire::opt_text")]
    pub phone: Option<String>,
    /// Ordered, bookable time-slot labels (e.g. `"09:00 - 10:00"`).
    #[serde(default, alias = "availableTimes")]
    pub availability: Vec<String>,
}

impl Doctor {
    /// "Dr. Name - Specialty" style summary used by booking forms.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.name, self.specialty)
    }

    pub fn offers_slot(&self, slot: &str) -> bool {
        self.availability.iter().any(|s| s == slot)
    }
}

/// Payload of the admin "Add Doctor" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub availability: Vec<String>,
}

impl NewDoctor {
    /// Every field is required and at least one slot must be selected.
    pub fn validate(&self) -> Result<()> {
        let blank = [
            &self.name,
            &self.specialty,
            &self.email,
            &self.password,
            &self.phone,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if blank || self.availability.is_empty() {
            return Err(HcmsError::validation(
                "Please fill in all fields and select a time of availability!",
            ));
        }
        Ok(())
    }
}

/// Half-day filter value accepted by the doctor filter endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum TimeOfDay {
    #[strum(serialize = "AM", ascii_case_insensitive)]
    Am,
    #[strum(serialize = "PM", ascii_case_insensitive)]
    Pm,
}

/// Start time of a slot label: `"09:00 - 10:00"` gives `"09:00"`.
pub fn slot_start(slot: &str) -> &str {
    slot.split('-').next().unwrap_or(slot).trim()
}

impl TimeOfDay {
    /// A slot is `AM` when it starts before noon.
    pub fn of_slot(slot: &str) -> Option<Self> {
        let hour: u32 = slot_start(slot).split(':').next()?.trim().parse().ok()?;
        match hour {
            0..=11 => Some(Self::Am),
            12..=23 => Some(Self::Pm),
            _ => None,
        }
    }
}
