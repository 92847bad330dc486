// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with beam calculations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeamError {
    #[error("The Gaussian beam FWHM must be a positive number of degrees; got {0}")]
    InvalidFwhm(f64),

    #[error("Unrecognised beam type '{0}'; valid types are: {}", *crate::beam::BEAM_TYPES_COMMA_SEPARATED)]
    Unrecognised(String),
}
