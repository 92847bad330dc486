// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Bright-region tables and clean masks for imaging data from the Hydrogen Epoch
of Reionization Array (HERA).

A source catalog is reduced to the regions that are apparently bright in the
HERA beam ([`regions`]); given a pointing centre, the regions in the field of
view become a CASA region-text clean mask ([`mask`]). Coordinates are passed
to the imager as sexagesimal strings ([`coord`]).
 */

pub mod beam;
pub mod catalog;
mod cli;
pub mod constants;
pub mod coord;
pub mod mask;
pub mod regions;
pub mod unit_parsing;

// Re-exports.
pub use cli::{Skymask, SkymaskError};
pub use coord::RaDec;
pub use regions::{Region, RegionTable};
