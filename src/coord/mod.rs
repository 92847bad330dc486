// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Celestial coordinates, and code for handling conversion to and from sexagesimal.

The imager consumes right ascensions as "hours minutes seconds" strings (e.g.
`3h25m10.5s`) and declinations as "degrees minutes seconds" strings (e.g.
`-29d0m0s`). The seconds field is rounded to a microsecond (of time or of arc) and
written without trailing zeros.
 */

mod error;

pub use error::CoordError;

use serde::{Deserialize, Serialize};

use crate::constants::{FRAC_PI_2, PI, TAU};

/// Sexagesimal seconds are rounded to this many decimal places.
const SECONDS_DECIMAL_PLACES: i32 = 6;

/// A position on the celestial sphere. All units are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RaDec {
    /// Right ascension \[radians\]
    pub ra: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl RaDec {
    /// Make a new [`RaDec`] struct from values in radians. The RA is normalised
    /// into [0, 2π).
    pub fn new(ra: f64, dec: f64) -> RaDec {
        RaDec {
            ra: normalise_ra(ra),
            dec,
        }
    }

    /// Make a new [`RaDec`] struct from values in degrees.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> RaDec {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }

    /// Fail if either coordinate isn't a finite number, or if the Dec isn't
    /// in [-π/2, π/2].
    pub fn validate(self) -> Result<RaDec, CoordError> {
        check_finite(self.ra)?;
        check_finite(self.dec)?;
        if self.dec.abs() > FRAC_PI_2 {
            return Err(CoordError::InvalidDeclination(self.dec.to_degrees()));
        }
        Ok(self)
    }

    /// The RA formatted as hours, the Dec formatted as degrees, both in the
    /// style accepted by the imager.
    pub fn to_sexagesimal(self) -> Result<(String, String), CoordError> {
        Ok((
            radians_to_ra_string(self.ra)?,
            degrees_to_dms_string(self.dec.to_degrees())?,
        ))
    }
}

impl std::fmt::Display for RaDec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}°, {:.4}°)",
            self.ra.to_degrees(),
            self.dec.to_degrees()
        )
    }
}

fn check_finite(angle: f64) -> Result<f64, CoordError> {
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(CoordError::InvalidAngle(angle))
    }
}

/// Fail if a declination \[degrees\] isn't a finite number in [-90, 90].
pub fn check_declination_deg(dec_deg: f64) -> Result<f64, CoordError> {
    let dec_deg = check_finite(dec_deg)?;
    if dec_deg.abs() > 90.0 {
        return Err(CoordError::InvalidDeclination(dec_deg));
    }
    Ok(dec_deg)
}

/// Normalise an angle \[radians\] into [0, 2π).
pub fn normalise_ra(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // `rem_euclid` can round up to exactly 2π for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Wrap an angular difference \[radians\] into [-π, π).
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// An angle decomposed into sexagesimal fields. For hours, `units` counts
/// hours; for degrees, it counts degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub units: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Sexagesimal {
    /// Decompose an absolute value; whole units and minutes are truncated, and
    /// the remainder is left in the fractional seconds. Seconds that round up
    /// to 60 carry into the minutes (and minutes into the units).
    fn from_abs(value: f64, negative: bool) -> Sexagesimal {
        let scale = 10_f64.powi(SECONDS_DECIMAL_PLACES);
        let mut units = value.floor();
        let minutes = (value - units) * 60.0;
        let mut whole_minutes = minutes.floor();
        let mut seconds = ((minutes - whole_minutes) * 60.0 * scale).round() / scale;
        if seconds >= 60.0 {
            seconds -= 60.0;
            whole_minutes += 1.0;
        }
        if whole_minutes >= 60.0 {
            whole_minutes -= 60.0;
            units += 1.0;
        }
        Sexagesimal {
            negative,
            units: units as u32,
            minutes: whole_minutes as u32,
            seconds,
        }
    }

    fn to_string_with(self, unit_marker: char) -> String {
        format!(
            "{sign}{units}{unit_marker}{min}m{sec}s",
            sign = if self.negative { "-" } else { "" },
            units = self.units,
            min = self.minutes,
            sec = self.seconds,
        )
    }
}

/// Decompose an angle \[radians\] into hours, minutes and seconds of right
/// ascension. Negative angles are normalised into [0, 2π) first.
pub fn radians_to_hms(angle: f64) -> Result<Sexagesimal, CoordError> {
    let angle = normalise_ra(check_finite(angle)?);
    let mut hours = angle / TAU * 24.0;
    if hours >= 24.0 {
        hours = 0.0;
    }
    let mut hms = Sexagesimal::from_abs(hours, false);
    // Rounding the seconds can carry all the way to 24h.
    if hms.units >= 24 {
        hms.units -= 24;
    }
    Ok(hms)
}

/// Convert an angle \[radians\] to a right-ascension string in "hours minutes
/// seconds".
///
/// # Examples
///
/// ```
/// # use hera_skymask::coord::*;
/// # fn main() -> Result<(), CoordError> {
/// let ra = radians_to_ra_string(std::f64::consts::PI)?;
/// assert_eq!(ra, "12h0m0s");
/// // Negative angles wrap around.
/// let ra = radians_to_ra_string(-std::f64::consts::PI)?;
/// assert_eq!(ra, "12h0m0s");
/// # Ok(())
/// # }
/// ```
pub fn radians_to_ra_string(angle: f64) -> Result<String, CoordError> {
    Ok(radians_to_hms(angle)?.to_string_with('h'))
}

/// Decompose a declination \[degrees\] into degrees, minutes and seconds.
/// Declinations outside of [-90, 90] are rejected.
pub fn degrees_to_dms(angle_deg: f64) -> Result<Sexagesimal, CoordError> {
    let angle_deg = check_declination_deg(angle_deg)?;
    Ok(Sexagesimal::from_abs(angle_deg.abs(), angle_deg < 0.0))
}

/// Convert an angle \[degrees\] to a string in "degrees minutes seconds". A
/// sign is only written for negative angles.
///
/// # Examples
///
/// ```
/// # use hera_skymask::coord::*;
/// # fn main() -> Result<(), CoordError> {
/// assert_eq!(degrees_to_dms_string(-5.5)?, "-5d30m0s");
/// assert_eq!(degrees_to_dms_string(5.5)?, "5d30m0s");
/// # Ok(())
/// # }
/// ```
pub fn degrees_to_dms_string(angle_deg: f64) -> Result<String, CoordError> {
    Ok(degrees_to_dms(angle_deg)?.to_string_with('d'))
}

/// Split a string like "12h30m15.5s" into its three numeric fields.
fn split_sexagesimal(s: &str, unit_marker: char) -> Result<(f64, f64, f64), CoordError> {
    let missing = |c| CoordError::MalformedSexagesimal {
        input: s.to_string(),
        missing: c,
    };
    let parse = |field: &str| -> Result<f64, CoordError> {
        field
            .trim()
            .parse()
            .map_err(|_| CoordError::ParseNumber(field.to_string()))
    };

    let (units, rest) = s.trim().split_once(unit_marker).ok_or(missing(unit_marker))?;
    let (minutes, rest) = rest.split_once('m').ok_or(missing('m'))?;
    let (seconds, rest) = rest.split_once('s').ok_or(missing('s'))?;
    if !rest.trim().is_empty() {
        return Err(CoordError::TrailingCharacters(s.to_string()));
    }
    Ok((parse(units)?, parse(minutes)?, parse(seconds)?))
}

/// Convert a right-ascension string in "hours minutes seconds" to an angle
/// \[radians\] in [0, 2π).
///
/// # Examples
///
/// ```
/// # use hera_skymask::coord::*;
/// # use approx::*;
/// # fn main() -> Result<(), CoordError> {
/// let ra = ra_string_to_radians("6h0m0s")?;
/// assert_abs_diff_eq!(ra, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn ra_string_to_radians(hms: &str) -> Result<f64, CoordError> {
    let (h, m, s) = split_sexagesimal(hms, 'h')?;
    let hours = h + m / 60.0 + s / 3600.0;
    Ok(normalise_ra(check_finite(hours / 24.0 * TAU)?))
}

/// Convert a string in "degrees minutes seconds" to an angle \[degrees\].
/// Negative values are expressed with a leading '-', which applies to all
/// fields (e.g. "-0d30m0s" is -0.5°).
pub fn dms_string_to_degrees(dms: &str) -> Result<f64, CoordError> {
    let negative = dms.trim_start().starts_with('-');
    let (d, m, s) = split_sexagesimal(dms, 'd')?;
    let value = d.abs() + m / 60.0 + s / 3600.0;
    check_declination_deg(if negative { -value } else { value })
}

/// Parse one bound of an RA range, written as "hh:mm:ss", into degrees.
///
/// # Examples
///
/// ```
/// # use hera_skymask::coord::*;
/// # use approx::*;
/// # fn main() -> Result<(), CoordError> {
/// let ra = parse_ra_range_bound("01:30:00")?;
/// assert_abs_diff_eq!(ra, 22.5);
/// assert!(parse_ra_range_bound("1h30m").is_err());
/// # Ok(())
/// # }
/// ```
pub fn parse_ra_range_bound(s: &str) -> Result<f64, CoordError> {
    let bad = || CoordError::InvalidRangeFormat(s.to_string());

    let fields: Vec<&str> = s.trim().split(':').collect();
    if fields.len() != 3 {
        return Err(bad());
    }
    let mut values = [0.0; 3];
    for (value, field) in values.iter_mut().zip(fields) {
        if field.is_empty() || field.starts_with(['+', '-']) {
            return Err(bad());
        }
        *value = field.parse::<f64>().map_err(|_| bad())?;
        if !value.is_finite() {
            return Err(bad());
        }
    }
    let [h, m, s] = values;
    if h >= 24.0 || m >= 60.0 || s >= 60.0 {
        return Err(bad());
    }
    Ok(15.0 * (h + m / 60.0 + s / 3600.0))
}

/// A range of right ascensions \[degrees\]. If the lower bound is larger than
/// the upper bound, the range wraps through RA = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaRange {
    pub lo_deg: f64,
    pub hi_deg: f64,
}

impl RaRange {
    /// Parse a range from two "hh:mm:ss" strings.
    pub fn parse(lo: &str, hi: &str) -> Result<RaRange, CoordError> {
        Ok(RaRange {
            lo_deg: parse_ra_range_bound(lo)?,
            hi_deg: parse_ra_range_bound(hi)?,
        })
    }

    /// Is this RA \[degrees\] inside the range? Bounds are inclusive.
    pub fn contains(&self, ra_deg: f64) -> bool {
        if self.lo_deg <= self.hi_deg {
            (self.lo_deg..=self.hi_deg).contains(&ra_deg)
        } else {
            ra_deg >= self.lo_deg || ra_deg <= self.hi_deg
        }
    }
}
