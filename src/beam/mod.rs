// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to abstract beam-attenuation calculations.
//!
//! [`Beam`] is a trait detailing how a source's brightness is attenuated by the
//! primary beam. HERA is a drift-scan array, so the attenuation is modelled as
//! a function of a source's declination offset from the centre of the HERA
//! field of view only. Exactly one beam model is used per run.

mod error;

pub use error::BeamError;

use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::{DEFAULT_GAUSSIAN_FWHM_DEG, HERA_DEC_CENTRE_DEG};

/// Supported beam types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BeamType {
    /// Attenuation decays exponentially with declination offset (`exp(-|Δ|)`,
    /// Δ in degrees).
    #[strum(serialize = "exponential")]
    Exponential,

    /// Attenuation is a Gaussian in declination offset with a given FWHM.
    #[strum(serialize = "gaussian")]
    Gaussian,
}

impl Default for BeamType {
    fn default() -> Self {
        BeamType::Exponential
    }
}

lazy_static::lazy_static! {
    pub(crate) static ref BEAM_TYPES_COMMA_SEPARATED: String = BeamType::iter().join(", ");
}

/// Parse a user-supplied beam type string.
pub fn parse_beam_type(s: &str) -> Result<BeamType, BeamError> {
    BeamType::from_str(s.trim()).map_err(|_| BeamError::Unrecognised(s.to_string()))
}

/// A trait abstracting beam code functions.
pub trait Beam: Sync + Send {
    /// Get the type of beam.
    fn get_beam_type(&self) -> BeamType;

    /// The attenuation factor (in [0, 1]) for a source `offset_deg` degrees
    /// away from the centre of the field of view.
    fn attenuation(&self, offset_deg: f64) -> f64;

    /// The attenuation factor for a source at this declination \[degrees\].
    fn attenuation_at_dec(&self, dec_deg: f64) -> f64 {
        self.attenuation(dec_deg - HERA_DEC_CENTRE_DEG)
    }
}

/// A decaying exponential in declination offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialBeam;

impl Beam for ExponentialBeam {
    fn get_beam_type(&self) -> BeamType {
        BeamType::Exponential
    }

    fn attenuation(&self, offset_deg: f64) -> f64 {
        (-offset_deg.abs()).exp()
    }
}

/// A Gaussian in declination offset, peaking at 1 in the centre of the field.
#[derive(Debug, Clone, Copy)]
pub struct GaussianBeam {
    /// Full-width half-maximum \[degrees\]
    fwhm_deg: f64,

    /// Standard deviation derived from `fwhm_deg` \[degrees\]
    sigma_deg: f64,
}

impl GaussianBeam {
    pub fn new(fwhm_deg: f64) -> Result<GaussianBeam, BeamError> {
        if !fwhm_deg.is_finite() || fwhm_deg <= 0.0 {
            return Err(BeamError::InvalidFwhm(fwhm_deg));
        }
        Ok(GaussianBeam {
            fwhm_deg,
            sigma_deg: fwhm_deg / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt()),
        })
    }

    pub fn get_fwhm_deg(&self) -> f64 {
        self.fwhm_deg
    }
}

impl Beam for GaussianBeam {
    fn get_beam_type(&self) -> BeamType {
        BeamType::Gaussian
    }

    fn attenuation(&self, offset_deg: f64) -> f64 {
        (-offset_deg * offset_deg / (2.0 * self.sigma_deg * self.sigma_deg)).exp()
    }
}

/// Create a beam object. `gaussian_fwhm_deg` is only used by the Gaussian beam;
/// if it isn't given there, a default is used.
pub fn create_beam_object(
    beam_type: BeamType,
    gaussian_fwhm_deg: Option<f64>,
) -> Result<Box<dyn Beam>, BeamError> {
    match beam_type {
        BeamType::Exponential => {
            debug!("Creating an exponential beam object");
            Ok(Box::new(ExponentialBeam))
        }
        BeamType::Gaussian => {
            let fwhm = gaussian_fwhm_deg.unwrap_or(DEFAULT_GAUSSIAN_FWHM_DEG);
            debug!("Creating a Gaussian beam object (FWHM {fwhm}°)");
            Ok(Box::new(GaussianBeam::new(fwhm)?))
        }
    }
}
