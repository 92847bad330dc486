// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Speed of light \[metres/second\]
pub const VEL_C: f64 = 299_792_458.0;

/// The frequency at the centre of the band of interest \[Hz\].
pub const CENTRE_FREQ_HZ: f64 = 150e6;

/// The length of the longest HERA baseline considered \[metres\].
pub const MAX_BASELINE_M: f64 = 100.0;

/// Wavelength at [`CENTRE_FREQ_HZ`] \[metres\].
pub const WAVELENGTH_M: f64 = VEL_C / CENTRE_FREQ_HZ;

/// The approximate angular resolution of the array \[degrees\].
pub const ANGULAR_RESOLUTION_DEG: f64 = WAVELENGTH_M / MAX_BASELINE_M * 180.0 / PI;

/// Catalog sources within this distance of a bright source contribute to its
/// region's flux \[degrees\].
pub const REGION_RADIUS_DEG: f64 = ANGULAR_RESOLUTION_DEG / 2.0;

/// The declination at the centre of the HERA field of view \[degrees\].
pub const HERA_DEC_CENTRE_DEG: f64 = -30.7214;

/// Default half-width of the declination band searched around
/// [`HERA_DEC_CENTRE_DEG`] \[degrees\].
pub const DEFAULT_DEC_RANGE_DEG: f64 = 7.0;

/// Default minimum apparent flux density for a source to be "bright" \[Jy\].
pub const DEFAULT_MIN_FLUX_JY: f64 = 10.0;

/// Default full-width half-maximum of the Gaussian beam model \[degrees\].
pub const DEFAULT_GAUSSIAN_FWHM_DEG: f64 = 10.0;

/// Default image size used by the imager \[pixels\].
pub const DEFAULT_IMSIZE: u32 = 512;

/// Default imager cell size.
pub const DEFAULT_CELL_SIZE: &str = "250arcsec";

/// Default radius of the mask circle centred on the pointing.
pub const DEFAULT_BASE_MASK_RADIUS: &str = "32000arcsec";

/// Default radius of the mask circle placed around each bright region.
pub const DEFAULT_SOURCE_MASK_RADIUS: &str = "2000arcsec";

/// Default name of the written mask file.
pub const DEFAULT_MASK_FILENAME: &str = "mask.rgn";

/// The header line of a CASA region text format file.
pub const CRTF_HEADER: &str = "#CRTFv0";

/// Default name of the region table written by `catalog-regions`.
pub const DEFAULT_REGION_TABLE_FILENAME: &str = "regions.json";
