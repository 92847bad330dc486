// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all hera-skymask-related errors. This should be the *only*
//! error enum that is publicly visible from the CLI.

use thiserror::Error;

use super::{
    catalog_regions::CatalogRegionsArgsError, coord_convert::CoordConvertArgsError,
    mask::MaskArgsError,
};
use crate::{
    beam::BeamError,
    catalog::ReadCatalogError,
    coord::CoordError,
    mask::MaskError,
    regions::{AggregateError, ReadRegionTableError, WriteRegionTableError},
    unit_parsing::UnitParseError,
};

/// Sections of the README that errors point to.
const DOCS: &str = "README.md";

/// The *only* publicly visible error from the `hera-skymask` binary. Each
/// error message should point at documentation, unless it's "generic".
#[derive(Error, Debug)]
pub enum SkymaskError {
    /// An error related to coordinates, e.g. sexagesimal strings or RA
    /// ranges.
    #[error("{0}\n\nSee for more info: {DOCS}#coordinates")]
    Coord(String),

    /// An error related to reading catalogs.
    #[error("{0}\n\nSee for more info: {DOCS}#catalogs")]
    Catalog(String),

    /// An error related to finding bright regions, or reading/writing region
    /// tables.
    #[error("{0}\n\nSee for more info: {DOCS}#region-tables")]
    Regions(String),

    /// An error related to making masks.
    #[error("{0}\n\nSee for more info: {DOCS}#masks")]
    Mask(String),

    /// An error related to the beam model.
    #[error("{0}\n\nSee for more info: {DOCS}#beam-models")]
    Beam(String),

    /// An error related to units (e.g. "250arcsec").
    #[error("{0}\n\nSee for more info: {DOCS}#angles")]
    Units(String),

    /// An error related to argument files.
    #[error("{0}\n\nSee for more info: {DOCS}#argument-files")]
    ArgFile(String),

    /// A generic error that can't be clarified further with documentation, e.g.
    /// IO errors.
    #[error("{0}")]
    Generic(String),
}

// Sub-command argument errors.

impl From<CatalogRegionsArgsError> for SkymaskError {
    fn from(e: CatalogRegionsArgsError) -> Self {
        match e {
            CatalogRegionsArgsError::NoCatalog | CatalogRegionsArgsError::BadRaRange(_) => {
                Self::Catalog(e.to_string())
            }
        }
    }
}

impl From<MaskArgsError> for SkymaskError {
    fn from(e: MaskArgsError) -> Self {
        match e {
            MaskArgsError::NoPointingRa | MaskArgsError::TwoPointingRas => {
                Self::Coord(e.to_string())
            }
        }
    }
}

impl From<CoordConvertArgsError> for SkymaskError {
    fn from(e: CoordConvertArgsError) -> Self {
        Self::Coord(e.to_string())
    }
}

// Library errors.

impl From<CoordError> for SkymaskError {
    fn from(e: CoordError) -> Self {
        Self::Coord(e.to_string())
    }
}

impl From<UnitParseError> for SkymaskError {
    fn from(e: UnitParseError) -> Self {
        Self::Units(e.to_string())
    }
}

impl From<BeamError> for SkymaskError {
    fn from(e: BeamError) -> Self {
        Self::Beam(e.to_string())
    }
}

impl From<ReadCatalogError> for SkymaskError {
    fn from(e: ReadCatalogError) -> Self {
        match e {
            ReadCatalogError::IO(e) => Self::from(e),
            _ => Self::Catalog(e.to_string()),
        }
    }
}

impl From<AggregateError> for SkymaskError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::Coord(e) => Self::from(e),
            _ => Self::Regions(e.to_string()),
        }
    }
}

impl From<ReadRegionTableError> for SkymaskError {
    fn from(e: ReadRegionTableError) -> Self {
        match e {
            ReadRegionTableError::IO(e) => Self::from(e),
            _ => Self::Regions(e.to_string()),
        }
    }
}

impl From<WriteRegionTableError> for SkymaskError {
    fn from(e: WriteRegionTableError) -> Self {
        match e {
            WriteRegionTableError::IO(e) => Self::from(e),
            _ => Self::Regions(e.to_string()),
        }
    }
}

impl From<MaskError> for SkymaskError {
    fn from(e: MaskError) -> Self {
        match e {
            MaskError::Coord(e) => Self::from(e),
            MaskError::UnitParse(_) => Self::Units(e.to_string()),
            MaskError::IO(e) => Self::from(e),
            MaskError::PathNotFound(_)
            | MaskError::InvalidFieldOfView { .. }
            | MaskError::Write { .. } => Self::Mask(e.to_string()),
        }
    }
}

// External errors.

impl From<std::io::Error> for SkymaskError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<serde_json::Error> for SkymaskError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for SkymaskError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ArgFile(e.to_string())
    }
}
