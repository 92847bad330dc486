// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Clean masks for the imager.
//!
//! The mask always contains a large circle around the pointing centre. If any
//! bright regions are in the field of view, a CRTF region file is written
//! with a small circle around each of them too; otherwise the single circle is
//! returned as a string.

mod error;

pub use error::MaskError;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{CRTF_HEADER, DEFAULT_MASK_FILENAME, DEFAULT_IMSIZE},
    coord::{degrees_to_dms_string, radians_to_ra_string, wrap_angle, RaDec},
    regions::{Region, RegionTable},
    unit_parsing::{parse_angle, Angle, AngleUnit},
};

/// The part of the sky seen by an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    pub centre: RaDec,

    /// The angular width of the image \[radians\]
    pub width: f64,
}

impl FieldOfView {
    /// The field of view of an image with `imsize` pixels on a side, each
    /// `cell` wide.
    pub fn new(centre: RaDec, imsize: u32, cell: Angle) -> Result<FieldOfView, MaskError> {
        let centre = centre.validate()?;
        let cell_rad = cell.to_radians();
        if imsize == 0 || !cell_rad.is_finite() || cell_rad <= 0.0 {
            return Err(MaskError::InvalidFieldOfView { imsize, cell });
        }

        Ok(FieldOfView {
            centre,
            width: f64::from(imsize) * cell_rad,
        })
    }

    /// Is this RA \[radians\] within half a field width of the centre?
    ///
    /// Only RA is tested; a region far away in declination is still "in
    /// view".
    pub fn contains_ra(&self, ra: f64) -> bool {
        wrap_angle(ra - self.centre.ra).abs() <= self.width / 2.0
    }
}

/// Everything needed to make a mask, other than the pointing centre and the
/// regions.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskParams {
    /// The number of pixels on a side of the image.
    pub imsize: u32,

    /// The angular size of a pixel.
    pub cell: Angle,

    /// The radius of the circle around the pointing centre.
    pub base_radius: Angle,

    /// The radius of the circle around each region in view, unless the
    /// region specifies its own.
    pub source_radius: Angle,

    /// The declination of the circle around the pointing centre \[degrees\].
    /// If this is `None`, the pointing declination is used.
    pub base_dec_deg: Option<f64>,

    /// The directory the mask file is written to. It must exist.
    pub output_dir: PathBuf,

    /// The name of the mask file.
    pub mask_name: String,
}

impl Default for MaskParams {
    fn default() -> Self {
        MaskParams {
            imsize: DEFAULT_IMSIZE,
            cell: Angle::new(250.0, AngleUnit::Arcsec),
            base_radius: Angle::new(32000.0, AngleUnit::Arcsec),
            source_radius: Angle::new(2000.0, AngleUnit::Arcsec),
            base_dec_deg: None,
            output_dir: PathBuf::from("."),
            mask_name: DEFAULT_MASK_FILENAME.to_string(),
        }
    }
}

impl MaskParams {
    /// The path that a mask file would be written to.
    pub fn mask_path(&self) -> PathBuf {
        self.output_dir.join(&self.mask_name)
    }
}

/// A mask to give to the imager: either a single region written inline, or
/// the path to a region file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MaskOutput {
    Inline { value: String },
    File { path: PathBuf },
}

impl MaskOutput {
    /// The string to hand to the imager's mask argument.
    pub fn as_imager_arg(&self) -> String {
        match self {
            MaskOutput::Inline { value } => value.clone(),
            MaskOutput::File { path } => path.display().to_string(),
        }
    }
}

/// Format a CRTF circle.
fn circle(ra: f64, dec_deg: f64, radius: &str) -> Result<String, MaskError> {
    Ok(format!(
        "circle[[{}, {}], {radius}]",
        radians_to_ra_string(ra)?,
        degrees_to_dms_string(dec_deg)?
    ))
}

/// The circle around the pointing centre.
pub fn base_circle(pointing: RaDec, params: &MaskParams) -> Result<String, MaskError> {
    let dec_deg = params
        .base_dec_deg
        .unwrap_or_else(|| pointing.dec.to_degrees());
    circle(pointing.ra, dec_deg, &params.base_radius.to_string())
}

/// The regions whose RA is in the field of view, in table order.
pub fn regions_in_view<'a>(
    fov: &FieldOfView,
    table: &'a RegionTable,
) -> Vec<(&'a String, &'a Region)> {
    table
        .iter()
        .filter(|(name, region)| {
            let in_view = fov.contains_ra(region.ra.to_radians());
            trace!("Region {name} in view: {in_view}");
            in_view
        })
        .collect()
}

/// The circle around a region. A region's own mask radius overrides the
/// default.
fn region_circle(region: &Region, default_radius: Angle) -> Result<String, MaskError> {
    let radius = match region.mask_radius.as_deref() {
        Some(r) => parse_angle(r, AngleUnit::Arcsec)?,
        None => default_radius,
    };
    circle(region.ra.to_radians(), region.dec, &radius.to_string())
}

fn write_mask_file(path: &Path, lines: &[String]) -> Result<(), MaskError> {
    let mut f = BufWriter::new(File::create(path).map_err(|e| MaskError::Write {
        path: path.to_path_buf(),
        err: e,
    })?);
    writeln!(f, "{CRTF_HEADER}")?;
    for line in lines {
        writeln!(f, "{line}")?;
    }
    f.flush()?;
    Ok(())
}

/// Make the clean mask for an image centred on `pointing`.
///
/// If no regions are in the field of view, the base circle is returned
/// inline. Otherwise the base circle and a circle for each region in view are
/// written to a CRTF file in the output directory, and its path is returned.
/// The output directory must exist either way.
pub fn set_mask(
    pointing: RaDec,
    table: &RegionTable,
    params: &MaskParams,
) -> Result<MaskOutput, MaskError> {
    if !params.output_dir.is_dir() {
        return Err(MaskError::PathNotFound(params.output_dir.clone()));
    }

    let fov = FieldOfView::new(pointing, params.imsize, params.cell)?;
    debug!(
        "Field of view is {}° wide, centred on {}",
        fov.width.to_degrees(),
        fov.centre
    );
    let base = base_circle(fov.centre, params)?;

    let in_view = regions_in_view(&fov, table);
    debug!("{} of {} regions are in view", in_view.len(), table.len());
    if in_view.is_empty() {
        return Ok(MaskOutput::Inline { value: base });
    }

    let mut lines = Vec::with_capacity(in_view.len() + 1);
    lines.push(base);
    for (_, region) in &in_view {
        lines.push(region_circle(region, params.source_radius)?);
    }

    let path = params.mask_path();
    write_mask_file(&path, &lines)?;
    info!(
        "Wrote mask with {} regions to {}",
        in_view.len(),
        path.display()
    );
    Ok(MaskOutput::File { path })
}
