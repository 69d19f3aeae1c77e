//! Prescription domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{HcmsError, Result};

/// A prescription, one-to-one with an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(default, deserialize_with = "crate::wire::id")]
    pub appointment_id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub medication: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub notes: String,
}

impl Prescription {
    pub fn validate(&self) -> Result<()> {
        if self.medication.trim().is_empty() || self.dosage.trim().is_empty() {
            return Err(HcmsError::validation("Medication and Dosage are required."));
        }
        Ok(())
    }
}

/// Whether the prescription form creates or only displays a prescription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PrescriptionMode {
    #[default]
    Add,
    View,
}

impl PrescriptionMode {
    /// Parses the `mode` query parameter; anything but `view` means add.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("view") => Self::View,
            _ => Self::Add,
        }
    }

    pub fn is_read_only(self) -> bool {
        self == Self::View
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Add => "Add Prescription",
            Self::View => "View Prescription",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_query() {
        assert_eq!(PrescriptionMode::from_query(Some("view")), PrescriptionMode::View);
        assert_eq!(PrescriptionMode::from_query(Some("add")), PrescriptionMode::Add);
        assert_eq!(PrescriptionMode::from_query(None), PrescriptionMode::Add);
        assert_eq!(PrescriptionMode::View.heading(), "View Prescription");
    }

    #[test]
    fn test_medication_and_dosage_required() {
        let mut p = Prescription {
            appointment_id: "a1".into(),
            medication: "Ibuprofen".into(),
            ..Default::default()
        };
        assert!(p.validate().is_err());
        p.dosage = "200mg".into();
        assert!(p.validate().is_ok());
    }
}
