// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bright regions of the sky, derived from a catalog.
//!
//! Each region is centred on a catalog source that is apparently bright in the
//! HERA beam; its flux is the sum of all catalog sources within half of the
//! array's angular resolution. Regions are kept in catalog order.

mod aggregate;
mod error;
mod read;
#[cfg(test)]
mod tests;
mod write;

pub use aggregate::{
    aggregate_regions, calc_apparent_flux, filter_by_flux, filter_by_location, AggregateParams,
    ApparentSource,
};
pub use error::{AggregateError, ReadRegionTableError, WriteRegionTableError};
pub use read::{read_region_table, region_table_from_json, region_table_from_yaml};
pub use write::{region_table_to_json, region_table_to_yaml, write_region_table};

use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A circular region around a bright catalog source. Positions are in
/// degrees, flux densities in mJy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Declination of the central source \[degrees\]
    #[serde(rename = "Dec")]
    pub dec: f64,

    /// Right ascension of the central source \[degrees\]
    #[serde(rename = "RA")]
    pub ra: f64,

    /// The sum of the beam-attenuated total flux densities in the region
    /// \[mJy\]
    #[serde(rename = "Apparent_flux")]
    pub apparent_flux: f64,

    /// The sum of the total flux densities in the region \[mJy\]
    #[serde(rename = "Total_flux")]
    pub total_flux: f64,

    /// The number of catalog sources contributing to this region.
    #[serde(rename = "Num_sources", default = "default_num_sources")]
    pub num_sources: usize,

    /// An optional mask radius to use for this region instead of the default
    /// (e.g. "2000arcsec").
    #[serde(
        rename = "Mask_radius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mask_radius: Option<String>,
}

fn default_num_sources() -> usize {
    1
}

/// A [`IndexMap`] of central-source names for keys and [`Region`] structs for
/// values. Insertion order is catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionTable(IndexMap<String, Region>);

impl RegionTable {
    /// Create an empty [`RegionTable`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for RegionTable {
    type Target = IndexMap<String, Region>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RegionTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<IndexMap<String, Region>> for RegionTable {
    fn from(table: IndexMap<String, Region>) -> Self {
        Self(table)
    }
}

impl FromIterator<(String, Region)> for RegionTable {
    fn from_iter<I: IntoIterator<Item = (String, Region)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// All of the possible file extensions that a region table can have.
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
pub enum RegionTableFileType {
    #[strum(serialize = "json")]
    Json,

    #[strum(serialize = "yaml")]
    Yaml,
}

impl RegionTableFileType {
    /// Determine the file type from a file extension.
    pub(crate) fn from_path(path: &std::path::Path) -> Option<RegionTableFileType> {
        use std::str::FromStr;

        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("yml") => Some(RegionTableFileType::Yaml),
            Some(e) => RegionTableFileType::from_str(e).ok(),
            None => None,
        }
    }
}

lazy_static::lazy_static! {
    pub(crate) static ref REGION_TABLE_FILE_TYPES_COMMA_SEPARATED: String = RegionTableFileType::iter().join(", ");
}
