// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitParseError {
    #[error("Successfully parsed an {unit} unit, but could not parse the numerical component of '{input}'")]
    GotAngleUnitButCantParse { input: String, unit: &'static str },

    #[error("'{0}' is not a finite quantity")]
    NotFinite(String),

    #[error("Could not parse '{input}' as an {unit_type}")]
    Unknown {
        input: String,
        unit_type: &'static str,
    },
}
