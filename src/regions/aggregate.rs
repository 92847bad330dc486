// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to find the apparently-bright regions of a catalog.

use indexmap::map::Entry;
use log::{debug, info, log_enabled, trace, warn, Level::Trace};
use rayon::prelude::*;

use super::{AggregateError, Region, RegionTable};
use crate::{
    beam::Beam,
    catalog::{Catalog, CatalogSource},
    constants::{HERA_DEC_CENTRE_DEG, REGION_RADIUS_DEG},
    coord::{CoordError, RaRange},
};

/// Parameters controlling how bright regions are found.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateParams {
    /// Sources are only considered if their declination is within this many
    /// degrees of the HERA declination.
    pub dec_range_deg: f64,

    /// The minimum apparent (beam-attenuated) flux density of a source for it
    /// to be the centre of a region \[Jy\].
    pub min_flux_jy: f64,

    /// If specified, sources are only considered if their RA is in this
    /// range.
    pub ra_range: Option<RaRange>,

    /// The radius of each region \[degrees\]. Defaults to half of the HERA
    /// angular resolution.
    pub region_radius_deg: f64,
}

impl AggregateParams {
    pub fn new(
        dec_range_deg: f64,
        min_flux_jy: f64,
        ra_range: Option<RaRange>,
    ) -> Result<AggregateParams, AggregateError> {
        if !dec_range_deg.is_finite() {
            return Err(CoordError::InvalidAngle(dec_range_deg).into());
        }
        if dec_range_deg < 0.0 {
            return Err(AggregateError::NegativeDecRange(dec_range_deg));
        }
        if !min_flux_jy.is_finite() || min_flux_jy < 0.0 {
            return Err(AggregateError::InvalidMinFlux(min_flux_jy));
        }

        Ok(AggregateParams {
            dec_range_deg,
            min_flux_jy,
            ra_range,
            region_radius_deg: REGION_RADIUS_DEG,
        })
    }

    /// Use a region radius other than the default.
    pub fn with_region_radius(
        mut self,
        region_radius_deg: f64,
    ) -> Result<AggregateParams, AggregateError> {
        if !region_radius_deg.is_finite() || region_radius_deg <= 0.0 {
            return Err(AggregateError::InvalidRegionRadius(region_radius_deg));
        }
        self.region_radius_deg = region_radius_deg;
        Ok(self)
    }

    /// The minimum apparent flux density \[mJy\].
    pub fn min_flux_mjy(&self) -> f64 {
        self.min_flux_jy * 1000.0
    }
}

/// A catalog source with its beam-attenuated flux densities.
#[derive(Debug, Clone, PartialEq)]
pub struct ApparentSource<'a> {
    pub source: &'a CatalogSource,

    /// The beam attenuation at this source's declination.
    pub beam_factor: f64,

    /// \[mJy/beam\]
    pub apparent_peak_flux: f64,

    /// \[mJy\]
    pub apparent_total_flux: f64,
}

/// Get the sources within `dec_range_deg` degrees of the HERA declination
/// (inclusive) and, if given, within the RA range. Catalog order is kept.
pub fn filter_by_location<'a>(
    catalog: &'a [CatalogSource],
    dec_range_deg: f64,
    ra_range: Option<&RaRange>,
) -> Vec<&'a CatalogSource> {
    let dec_lo = HERA_DEC_CENTRE_DEG - dec_range_deg;
    let dec_hi = HERA_DEC_CENTRE_DEG + dec_range_deg;
    catalog
        .iter()
        .filter(|s| (dec_lo..=dec_hi).contains(&s.dec))
        .filter(|s| ra_range.map(|r| r.contains(s.ra)).unwrap_or(true))
        .collect()
}

/// Attenuate each source's flux densities by the beam.
pub fn calc_apparent_flux<'a>(
    sources: &[&'a CatalogSource],
    beam: &dyn Beam,
) -> Vec<ApparentSource<'a>> {
    sources
        .iter()
        .map(|&source| {
            let beam_factor = beam.attenuation_at_dec(source.dec);
            ApparentSource {
                source,
                beam_factor,
                apparent_peak_flux: beam_factor * source.peak_flux,
                apparent_total_flux: beam_factor * source.total_flux,
            }
        })
        .collect()
}

/// Keep only the sources whose apparent total flux density is at least
/// `min_flux_mjy`.
pub fn filter_by_flux(sources: Vec<ApparentSource>, min_flux_mjy: f64) -> Vec<ApparentSource> {
    sources
        .into_iter()
        .filter(|s| {
            let keep = s.apparent_total_flux >= min_flux_mjy;
            if !keep && log_enabled!(Trace) {
                trace!(
                    "Source {}'s apparent flux ({} mJy) is less than the threshold ({} mJy)",
                    s.source.name,
                    s.apparent_total_flux,
                    min_flux_mjy
                );
            }
            keep
        })
        .collect()
}

/// Sum the flux densities of every catalog source within `radius_deg` of
/// `centre`.
fn sum_region(
    centre: &CatalogSource,
    catalog: &[CatalogSource],
    radius_deg: f64,
    beam: &dyn Beam,
) -> Region {
    let mut region = Region {
        dec: centre.dec,
        ra: centre.ra,
        apparent_flux: 0.0,
        total_flux: 0.0,
        num_sources: 0,
        mask_radius: None,
    };

    for source in catalog {
        let d_ra = ra_difference_deg(source.ra, centre.ra);
        let d_dec = source.dec - centre.dec;
        // Cheap box test before the circle.
        if d_ra.abs() > radius_deg || d_dec.abs() > radius_deg {
            continue;
        }
        if d_ra.hypot(d_dec) > radius_deg {
            continue;
        }

        region.total_flux += source.total_flux;
        region.apparent_flux += beam.attenuation_at_dec(source.dec) * source.total_flux;
        region.num_sources += 1;
    }

    region
}

/// The difference between two RAs \[degrees\], wrapped into [-180, 180).
fn ra_difference_deg(ra: f64, ra0: f64) -> f64 {
    (ra - ra0 + 180.0).rem_euclid(360.0) - 180.0
}

/// Find the bright regions of a catalog.
///
/// Every source in the declination band (and RA range, if given) with an
/// apparent total flux density of at least the threshold becomes the centre
/// of a region. All catalog sources within the region radius contribute to
/// it, including sources outside of the declination band. The returned table
/// is in catalog order.
pub fn aggregate_regions(
    catalog: &Catalog,
    params: &AggregateParams,
    beam: &dyn Beam,
) -> Result<RegionTable, AggregateError> {
    // Re-validate; the fields are public.
    let params = AggregateParams::new(params.dec_range_deg, params.min_flux_jy, params.ra_range)?
        .with_region_radius(params.region_radius_deg)?;

    let located = filter_by_location(catalog, params.dec_range_deg, params.ra_range.as_ref());
    debug!(
        "{} of {} sources are within {}° of Dec {}°",
        located.len(),
        catalog.len(),
        params.dec_range_deg,
        HERA_DEC_CENTRE_DEG
    );

    let bright = filter_by_flux(calc_apparent_flux(&located, beam), params.min_flux_mjy());
    info!(
        "Number of sources within {}° of the HERA declination with an apparent flux of at least {} Jy: {}",
        params.dec_range_deg,
        params.min_flux_jy,
        bright.len()
    );

    // Collecting a parallel iterator over a slice keeps its order.
    let regions: Vec<(&str, Region)> = bright
        .par_iter()
        .map(|s| {
            (
                s.source.name.as_str(),
                sum_region(s.source, catalog, params.region_radius_deg, beam),
            )
        })
        .collect();

    let mut table = RegionTable::new();
    for (name, region) in regions {
        match table.entry(name.to_string()) {
            Entry::Occupied(_) => {
                warn!("Catalog source name '{name}' is repeated; only the first region is kept")
            }
            Entry::Vacant(e) => {
                trace!(
                    "Region {name}: {} sources, {} mJy ({} mJy apparent)",
                    region.num_sources,
                    region.total_flux,
                    region.apparent_flux
                );
                e.insert(region);
            }
        }
    }

    Ok(table)
}
