use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chart;
use crate::error::{Error, Result};

/// Anatomical quadrant of the dental arch, from the patient's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// FDI quadrant 1 (permanent) / 5 (temporary)
    UpperRight,
    /// FDI quadrant 2 / 6
    UpperLeft,
    /// FDI quadrant 3 / 7
    LowerLeft,
    /// FDI quadrant 4 / 8
    LowerRight,
}

impl Quadrant {
    /// All quadrants in FDI order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperRight,
        Quadrant::UpperLeft,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Leading FDI digit for this quadrant in the given dentition
    pub fn fdi_digit(self, dentition: Dentition) -> u8 {
        let base = match self {
            Quadrant::UpperRight => 1,
            Quadrant::UpperLeft => 2,
            Quadrant::LowerLeft => 3,
            Quadrant::LowerRight => 4,
        };
        match dentition {
            Dentition::Permanent => base,
            Dentition::Temporary => base + 4,
        }
    }

    /// Upper arch (maxilla)
    pub fn is_upper(self) -> bool {
        matches!(self, Quadrant::UpperRight | Quadrant::UpperLeft)
    }

    /// Patient's right side, drawn on the left half of the chart
    pub fn is_patient_right(self) -> bool {
        matches!(self, Quadrant::UpperRight | Quadrant::LowerRight)
    }
}

/// Dentition type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dentition {
    /// Adult teeth, 11-48
    Permanent,
    /// Primary (deciduous) teeth, 51-85
    #[default]
    Temporary,
}

impl Dentition {
    /// Teeth per quadrant
    pub fn teeth_per_quadrant(self) -> u8 {
        match self {
            Dentition::Permanent => 8,
            Dentition::Temporary => 5,
        }
    }
}

impl std::str::FromStr for Dentition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permanent" | "adult" => Ok(Dentition::Permanent),
            "temporary" | "primary" | "deciduous" => Ok(Dentition::Temporary),
            other => Err(format!("unknown dentition {other:?}")),
        }
    }
}

/// Two-digit FDI tooth identifier.
///
/// Only numbers present in the static chart table can be constructed, so a
/// `ToothNumber` always has a quadrant and a dentition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothNumber(u8);

impl ToothNumber {
    /// Validate a raw FDI number
    pub fn new(number: u8) -> Result<Self> {
        if chart::tooth_info(number).is_some() {
            Ok(Self(number))
        } else {
            Err(Error::InvalidToothNumber(number))
        }
    }

    /// Build from quadrant, dentition and 1-based position counted from the midline
    pub fn from_parts(quadrant: Quadrant, dentition: Dentition, index: u8) -> Result<Self> {
        if index == 0 || index > dentition.teeth_per_quadrant() {
            return Err(Error::InvalidToothNumber(index));
        }
        Self::new(quadrant.fdi_digit(dentition) * 10 + index)
    }

    /// Caller guarantees a quadrant digit 1-8 and an index within the dentition
    pub(crate) fn new_unchecked(number: u8) -> Self {
        debug_assert!(chart::tooth_info(number).is_some(), "invalid tooth number {number}");
        Self(number)
    }

    /// Raw two-digit value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Position within the quadrant, 1 at the midline
    pub fn index(self) -> u8 {
        self.0 % 10
    }

    /// Quadrant encoded by the leading digit
    pub fn quadrant(self) -> Quadrant {
        match self.0 / 10 {
            1 | 5 => Quadrant::UpperRight,
            2 | 6 => Quadrant::UpperLeft,
            3 | 7 => Quadrant::LowerLeft,
            _ => Quadrant::LowerRight,
        }
    }

    /// Dentition encoded by the leading digit
    pub fn dentition(self) -> Dentition {
        if self.0 < 50 {
            Dentition::Permanent
        } else {
            Dentition::Temporary
        }
    }
}

impl TryFrom<u8> for ToothNumber {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ToothNumber> for u8 {
    fn from(number: ToothNumber) -> u8 {
        number.0
    }
}

impl fmt::Display for ToothNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
