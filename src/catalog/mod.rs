// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for radio source catalogs (e.g. TGSS ADR1).
//!
//! A catalog is only a flat table of sources with positions and flux
//! densities; the order of sources in the file is kept, as downstream products
//! are emitted in catalog order.

mod error;
#[cfg(feature = "fits")]
mod fits;
mod read;
mod text;

pub use error::ReadCatalogError;
pub use read::{catalog_from_json, catalog_from_yaml, read_catalog_file};
pub use text::catalog_from_text;

use std::ops::Deref;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A single catalog entry. Positions are in degrees, flux densities in mJy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(alias = "Name", alias = "Source_name")]
    pub name: String,

    /// Right ascension \[degrees\]
    #[serde(alias = "RA")]
    pub ra: f64,

    /// Declination \[degrees\]
    #[serde(alias = "DEC", alias = "Dec")]
    pub dec: f64,

    /// Peak flux density \[mJy/beam\]
    #[serde(alias = "Peak_flux", alias = "Peak flux")]
    pub peak_flux: f64,

    /// Total (integrated) flux density \[mJy\]
    #[serde(alias = "Total_flux", alias = "Total flux")]
    pub total_flux: f64,
}

impl CatalogSource {
    /// Check that the values of this source make sense.
    pub(crate) fn validate(&self) -> Result<(), ReadCatalogError> {
        if !(0.0..360.0).contains(&self.ra) {
            return Err(ReadCatalogError::InvalidRa {
                source_name: self.name.clone(),
                ra: self.ra,
            });
        }
        if !(-90.0..=90.0).contains(&self.dec) {
            return Err(ReadCatalogError::InvalidDec {
                source_name: self.name.clone(),
                dec: self.dec,
            });
        }
        if !self.peak_flux.is_finite() || !self.total_flux.is_finite() {
            return Err(ReadCatalogError::NonFiniteFlux {
                source_name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// All of the sources in a catalog, in file order. Once read, a catalog is
/// never modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<CatalogSource>);

impl Catalog {
    /// Make a catalog out of sources, checking each of them.
    pub fn new(sources: Vec<CatalogSource>) -> Result<Catalog, ReadCatalogError> {
        for src in &sources {
            src.validate()?;
        }
        Ok(Catalog(sources))
    }
}

impl Deref for Catalog {
    type Target = [CatalogSource];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// All of the supported catalog file types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CatalogType {
    #[strum(serialize = "json")]
    Json,

    #[strum(serialize = "yaml")]
    Yaml,

    /// Whitespace- or comma-separated columns.
    #[strum(serialize = "text")]
    Text,

    /// Only usable when compiled with the "fits" feature.
    #[strum(serialize = "fits")]
    Fits,
}

lazy_static::lazy_static! {
    pub(crate) static ref CATALOG_TYPES_COMMA_SEPARATED: String = CatalogType::iter().join(", ");
}
