// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! FITS catalogs, e.g. the TGSS ADR1 7-sigma catalog.

use std::path::Path;

use fitsio::{hdu::HduInfo, FitsFile};
use itertools::izip;
use log::debug;

use super::{Catalog, CatalogSource, ReadCatalogError};

const NAME_COL: &str = "Source_name";
const RA_COL: &str = "RA";
const DEC_COL: &str = "DEC";
const PEAK_FLUX_COL: &str = "Peak_flux";
const TOTAL_FLUX_COL: &str = "Total_flux";

/// Wrap a FITS call with our error.
macro_rules! fe {
    ($file:expr, $result:expr) => {{
        $result.map_err(|e| ReadCatalogError::Fits {
            file: $file.to_path_buf(),
            message: e.to_string(),
        })?
    }};
}

pub(super) fn parse_catalog(file: &Path) -> Result<Catalog, ReadCatalogError> {
    debug!("Reading FITS catalog {}", file.display());
    let mut fptr = fe!(file, FitsFile::open(file));
    // We assume everything is on HDU 2.
    let hdu = fe!(file, fptr.hdu(1));

    let col_names: Vec<String> = match &hdu.info {
        HduInfo::TableInfo {
            column_descriptions,
            ..
        } => column_descriptions
            .iter()
            .map(|cd| cd.name.clone())
            .collect(),
        _ => {
            return Err(ReadCatalogError::Fits {
                file: file.to_path_buf(),
                message: "HDU 2 is not a table".to_string(),
            })
        }
    };
    for column in [NAME_COL, RA_COL, DEC_COL, PEAK_FLUX_COL, TOTAL_FLUX_COL] {
        if !col_names.iter().any(|n| n == column) {
            return Err(ReadCatalogError::MissingFitsColumn {
                file: file.to_path_buf(),
                column,
            });
        }
    }

    let names: Vec<String> = fe!(file, hdu.read_col(&mut fptr, NAME_COL));
    let ras: Vec<f64> = fe!(file, hdu.read_col(&mut fptr, RA_COL));
    let decs: Vec<f64> = fe!(file, hdu.read_col(&mut fptr, DEC_COL));
    let peak_fluxes: Vec<f64> = fe!(file, hdu.read_col(&mut fptr, PEAK_FLUX_COL));
    let total_fluxes: Vec<f64> = fe!(file, hdu.read_col(&mut fptr, TOTAL_FLUX_COL));

    let sources = izip!(names, ras, decs, peak_fluxes, total_fluxes)
        .map(|(name, ra, dec, peak_flux, total_flux)| CatalogSource {
            name: name.trim().to_string(),
            ra,
            dec,
            peak_flux,
            total_flux,
        })
        .collect();
    Catalog::new(sources)
}
