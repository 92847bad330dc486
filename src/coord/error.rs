// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoordError {
    /// NaN or infinite angles can't be formatted or compared.
    #[error("Invalid angle: {0} is not a finite number")]
    InvalidAngle(f64),

    #[error("Invalid declination: {0}° is outside of [-90°, 90°]")]
    InvalidDeclination(f64),

    #[error("Could not parse '{0}' as an RA range bound; expected 'hh:mm:ss' (e.g. 04:30:00)")]
    InvalidRangeFormat(String),

    #[error("Did not find '{missing}' when attempting to read sexagesimal string: {input}")]
    MalformedSexagesimal { input: String, missing: char },

    #[error("Unexpected characters after the seconds field of sexagesimal string: {0}")]
    TrailingCharacters(String),

    #[error("Could not parse '{0}' as a number in a sexagesimal string")]
    ParseNumber(String),
}
