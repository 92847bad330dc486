// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Errors associated with reading in a catalog. Any failure to read a catalog
/// is fatal.
#[derive(Error, Debug)]
pub enum ReadCatalogError {
    #[error("Catalog file '{0}' does not exist")]
    DoesNotExist(PathBuf),

    #[error("Source {source_name}: RA {ra}° is out of range (0° <= RA < 360°)")]
    InvalidRa { source_name: String, ra: f64 },

    #[error("Source {source_name}: Dec {dec}° is out of range (-90° <= Dec <= 90°)")]
    InvalidDec { source_name: String, dec: f64 },

    #[error("Source {source_name}: flux densities must be finite numbers")]
    NonFiniteFlux { source_name: String },

    #[error("Catalog line {line_num}: expected {expected} columns (name, RA, Dec, peak flux, total flux), but found {got}")]
    WrongColumnCount {
        line_num: usize,
        expected: usize,
        got: usize,
    },

    #[error("Catalog line {line_num}: couldn't convert '{string}' to a number")]
    ParseFloat { line_num: usize, string: String },

    #[error("Could not interpret the contents of the catalog as json, yaml or text. Specify which type of catalog it is, and only that error will be shown.\n\njson error: {json_err}\n\nyaml error: {yaml_err}\n\ntext error: {text_err}")]
    FailedToReadAsAnyType {
        json_err: String,
        yaml_err: String,
        text_err: String,
    },

    #[error("This catalog is a FITS file, but support for FITS catalogs was not compiled in (enable the 'fits' feature)")]
    FitsNotSupported,

    #[error("FITS catalog '{file}': column '{column}' is missing")]
    MissingFitsColumn { file: PathBuf, column: &'static str },

    #[error("Error when reading FITS catalog '{file}': {message}")]
    Fits { file: PathBuf, message: String },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
