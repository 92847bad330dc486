// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::REGION_TABLE_FILE_TYPES_COMMA_SEPARATED;
use crate::coord::CoordError;

/// Errors associated with the parameters used to find bright regions.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("The declination range must not be negative; got {0}°")]
    NegativeDecRange(f64),

    #[error("The minimum flux density must be a non-negative number of Jy; got {0}")]
    InvalidMinFlux(f64),

    #[error("The region radius must be a positive number of degrees; got {0}")]
    InvalidRegionRadius(f64),

    #[error(transparent)]
    Coord(#[from] CoordError),
}

/// Errors associated with reading a region table.
#[derive(Error, Debug)]
pub enum ReadRegionTableError {
    #[error("Region table '{0}' does not exist")]
    DoesNotExist(PathBuf),

    #[error("Region '{name}' has a non-finite value")]
    NonFinite { name: String },

    #[error("Could not deserialise the region table as yaml or json.\n\nyaml error: {yaml_err}\n\njson error: {json_err}")]
    FailedToDeserialise { yaml_err: String, json_err: String },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors associated with writing a region table.
#[derive(Error, Debug)]
pub enum WriteRegionTableError {
    #[error("'{0}' is an invalid file type for a region table; must have one of the following extensions: {}", *REGION_TABLE_FILE_TYPES_COMMA_SEPARATED)]
    InvalidFormat(String),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
