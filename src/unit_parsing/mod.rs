// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub use error::UnitParseError;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Units an angle may be written in. The string forms are the ones the imager
/// understands (e.g. "250arcsec").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum AngleUnit {
    #[strum(serialize = "arcsec")]
    Arcsec,

    #[strum(serialize = "arcmin")]
    Arcmin,

    #[strum(serialize = "deg")]
    Deg,

    #[strum(serialize = "rad")]
    Rad,
}

impl AngleUnit {
    fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Arcsec => (value / 3600.0).to_radians(),
            AngleUnit::Arcmin => (value / 60.0).to_radians(),
            AngleUnit::Deg => value.to_radians(),
            AngleUnit::Rad => value,
        }
    }
}

/// An angle, keeping the unit it was written in so that it can be written out
/// again unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Angle {
        Angle { value, unit }
    }

    pub fn to_radians(self) -> f64 {
        self.unit.to_radians(self.value)
    }

    pub fn to_degrees(self) -> f64 {
        self.to_radians().to_degrees()
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Parse a string that may have a unit of angle attached to it. If the string
/// is a naked number, `default_unit` is used.
pub fn parse_angle(s: &str, default_unit: AngleUnit) -> Result<Angle, UnitParseError> {
    let s_trimmed = s.trim();

    // Try to parse a naked number.
    let maybe_number: Option<f64> = s_trimmed.parse().ok();
    if let Some(number) = maybe_number {
        return finite(s, Angle::new(number, default_unit));
    };

    // That didn't work; let's search over our supported units. None of them
    // is a suffix of another.
    for unit in AngleUnit::iter() {
        let unit_str: &'static str = unit.into();
        let Some(split) = s_trimmed.len().checked_sub(unit_str.len()) else {
            continue;
        };
        if !s_trimmed.is_char_boundary(split)
            || !s_trimmed[split..].eq_ignore_ascii_case(unit_str)
        {
            continue;
        }

        let prefix = s_trimmed[..split].trim();
        let number: f64 = match prefix.parse() {
            Ok(n) => n,
            Err(_) => {
                return Err(UnitParseError::GotAngleUnitButCantParse {
                    input: s.to_string(),
                    unit: unit_str,
                })
            }
        };
        return finite(s, Angle::new(number, unit));
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "angle",
    })
}

fn finite(input: &str, angle: Angle) -> Result<Angle, UnitParseError> {
    if angle.value.is_finite() {
        Ok(angle)
    } else {
        Err(UnitParseError::NotFinite(input.to_string()))
    }
}
