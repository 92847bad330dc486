// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convert coordinates to and from the sexagesimal strings the imager uses.


use clap::Parser;
use log::debug;

use crate::{
    coord::{
        degrees_to_dms_string, dms_string_to_degrees, ra_string_to_radians, radians_to_ra_string,
    },
    SkymaskError,
};

/// Convert coordinates to and from sexagesimal strings. Each conversion is
/// printed on its own line, in the order listed here.
#[derive(Parser, Debug, Clone, Default)]
pub(super) struct CoordConvertArgs {
    /// A right ascension [radians] to convert to "hours minutes seconds".
    #[clap(long, allow_hyphen_values = true)]
    pub(super) ra_rad: Option<f64>,

    /// A declination [degrees] to convert to "degrees minutes seconds".
    #[clap(long, allow_hyphen_values = true)]
    pub(super) dec_deg: Option<f64>,

    /// A right ascension like "12h30m0s" to convert to radians.
    #[clap(long)]
    pub(super) hms: Option<String>,

    /// A declination like "-30d43m17s" to convert to degrees.
    #[clap(long, allow_hyphen_values = true)]
    pub(super) dms: Option<String>,
}

impl CoordConvertArgs {
    /// Do every requested conversion.
    pub(super) fn convert(&self) -> Result<Vec<String>, SkymaskError> {
        let mut results = vec![];
        if let Some(ra) = self.ra_rad {
            results.push(radians_to_ra_string(ra)?);
        }
        if let Some(dec) = self.dec_deg {
            results.push(degrees_to_dms_string(dec)?);
        }
        if let Some(hms) = &self.hms {
            results.push(ra_string_to_radians(hms)?.to_string());
        }
        if let Some(dms) = &self.dms {
            results.push(dms_string_to_degrees(dms)?.to_string());
        }

        if results.is_empty() {
            return Err(CoordConvertArgsError::NothingToConvert.into());
        }
        Ok(results)
    }

    pub(super) fn run(self) -> Result<(), SkymaskError> {
        debug!("{:?}", self);
        for result in self.convert()? {
            println!("{result}");
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum CoordConvertArgsError {
    #[error("Nothing to convert; use --ra-rad, --dec-deg, --hms and/or --dms")]
    NothingToConvert,
}
