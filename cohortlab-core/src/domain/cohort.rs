//! The three comparison cohorts.
//!
//! The set is closed and ordered: position 0 is the CMV-negative control,
//! position 1 the CMV-positive control, position 2 the case group. Panels
//! lay cohorts out along the categorical axis in this order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed comparison groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    CmvNegative,
    CmvPositive,
    Case,
}

/// An sRGB colour, backend-neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Cohort {
    /// All cohorts in axis order.
    pub const ALL: [Cohort; 3] = [Cohort::CmvNegative, Cohort::CmvPositive, Cohort::Case];

    pub fn position(self) -> usize {
        match self {
            Cohort::CmvNegative => 0,
            Cohort::CmvPositive => 1,
            Cohort::Case => 2,
        }
    }

    pub fn from_position(i: usize) -> Option<Self> {
        match i {
            0 => Some(Cohort::CmvNegative),
            1 => Some(Cohort::CmvPositive),
            2 => Some(Cohort::Case),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cohort::CmvNegative => "CMV (-)",
            Cohort::CmvPositive => "CMV (+)",
            Cohort::Case => "Vaka Grubu",
        }
    }

    /// Fill colour of the cohort's box: gray, light blue, dark blue.
    pub fn color(self) -> Rgb {
        match self {
            Cohort::CmvNegative => Rgb(0xE0, 0xE0, 0xE0),
            Cohort::CmvPositive => Rgb(0x90, 0xCA, 0xF9),
            Cohort::Case => Rgb(0x0D, 0x47, 0xA1),
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_roundtrip() {
        for cohort in Cohort::ALL {
            assert_eq!(Cohort::from_position(cohort.position()), Some(cohort));
        }
        assert_eq!(Cohort::from_position(3), None);
    }

    #[test]
    fn palette_is_fixed() {
        assert_eq!(Cohort::CmvNegative.color().hex(), "#E0E0E0");
        assert_eq!(Cohort::CmvPositive.color().hex(), "#90CAF9");
        assert_eq!(Cohort::Case.color().hex(), "#0D47A1");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Cohort::CmvNegative).unwrap();
        assert_eq!(json, "\"cmv_negative\"");
        let back: Cohort = serde_json::from_str("\"case\"").unwrap();
        assert_eq!(back, Cohort::Case);
    }
}
