// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Things shared by the `hera-skymask` subcommands: help texts, argument
//! files, interactive prompts and printers.

mod printers;

pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use std::io::{BufRead, Write};

use is_terminal::IsTerminal;
use itertools::Itertools;
use log::debug;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    beam::BEAM_TYPES_COMMA_SEPARATED,
    catalog::CATALOG_TYPES_COMMA_SEPARATED,
    constants::{
        DEFAULT_BASE_MASK_RADIUS, DEFAULT_CELL_SIZE, DEFAULT_DEC_RANGE_DEG,
        DEFAULT_GAUSSIAN_FWHM_DEG, DEFAULT_IMSIZE, DEFAULT_MIN_FLUX_JY,
        DEFAULT_SOURCE_MASK_RADIUS, HERA_DEC_CENTRE_DEG, REGION_RADIUS_DEG,
    },
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref CATALOG_TYPE_HELP: String =
        format!("The type of the catalog. Valid types are: {}. If not specified, the file extension is used, and failing that, all types are attempted", *CATALOG_TYPES_COMMA_SEPARATED);

    pub(super) static ref DEC_RANGE_HELP: String =
        format!("Only sources within this many degrees of the HERA declination ({HERA_DEC_CENTRE_DEG}°) can be bright. Default: {DEFAULT_DEC_RANGE_DEG}");

    pub(super) static ref MIN_FLUX_HELP: String =
        format!("The minimum beam-attenuated total flux density of a bright source [Jy]. Default: {DEFAULT_MIN_FLUX_JY}");

    pub(super) static ref BEAM_MODEL_HELP: String =
        format!("The beam model used to attenuate flux densities. Valid models are: {}. Default: exponential", *BEAM_TYPES_COMMA_SEPARATED);

    pub(super) static ref GAUSSIAN_FWHM_HELP: String =
        format!("The FWHM of the gaussian beam model [degrees]. Default: {DEFAULT_GAUSSIAN_FWHM_DEG}");

    pub(super) static ref REGION_RADIUS_HELP: String =
        format!("The radius of each bright region. Naked numbers are degrees. Default: half of the HERA angular resolution ({REGION_RADIUS_DEG:.4}°)");

    pub(super) static ref IMSIZE_HELP: String =
        format!("The number of pixels on a side of the image. Default: {DEFAULT_IMSIZE}");

    pub(super) static ref CELL_HELP: String =
        format!("The angular size of an image pixel. Naked numbers are arcsec. Default: {DEFAULT_CELL_SIZE}");

    pub(super) static ref MASK_RADIUS_HELP: String =
        format!("The radius of the mask circle around the pointing centre. Naked numbers are arcsec. Default: {DEFAULT_BASE_MASK_RADIUS}");

    pub(super) static ref SOURCE_MASK_RADIUS_HELP: String =
        format!("The radius of the mask circle around each bright region in view, unless the region table specifies one. Naked numbers are arcsec. Default: {DEFAULT_SOURCE_MASK_RADIUS}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

/// Deserialise an arguments file into whatever type the caller expects. This
/// needs to be a macro so that `return` leaves the caller.
macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkymaskError::ArgFile(format!(
                            "Couldn't decode toml structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkymaskError::ArgFile(format!(
                            "Couldn't decode json structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }

            None => {
                return Err(SkymaskError::ArgFile(format!(
                    "Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}",
                    $arg_file.display(),
                    *ARG_FILE_TYPES_COMMA_SEPARATED
                )))
            }
        }
    });
}

/// Ask for a number on `input`. An empty answer gives `default`, as does an
/// answer that isn't a finite number (with a warning). The question is only
/// shown when stdin is a terminal.
pub(super) fn prompt_for_f64<R: BufRead>(input: &mut R, question: &str, default: f64) -> f64 {
    if std::io::stdin().is_terminal() {
        let mut stderr = std::io::stderr();
        // Failing to show the question doesn't stop us reading the answer.
        let _ = write!(stderr, "{question} [default: {default}]: ");
        let _ = stderr.flush();
    }

    let mut answer = String::new();
    if let Err(e) = input.read_line(&mut answer) {
        format!("Couldn't read an answer to '{question}' ({e}); using the default ({default})")
            .warn();
        return default;
    }

    let answer = answer.trim();
    if answer.is_empty() {
        debug!("No answer to '{question}'; using the default ({default})");
        return default;
    }
    match answer.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            format!(
                "Couldn't parse '{answer}' as an answer to '{question}'; using the default ({default})"
            )
            .warn();
            default
        }
    }
}
