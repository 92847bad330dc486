// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common code for reading catalog files.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use log::{debug, info, trace};

use super::{text::catalog_from_text, Catalog, CatalogSource, CatalogType, ReadCatalogError};

/// Read a catalog serialised as a json array of sources.
pub fn catalog_from_json<T: std::io::Read>(buf: &mut T) -> Result<Catalog, ReadCatalogError> {
    let sources: Vec<CatalogSource> = serde_json::from_reader(buf)?;
    Catalog::new(sources)
}

/// Read a catalog serialised as a yaml sequence of sources.
pub fn catalog_from_yaml<T: std::io::Read>(buf: &mut T) -> Result<Catalog, ReadCatalogError> {
    let sources: Vec<CatalogSource> = serde_yaml::from_reader(buf)?;
    Catalog::new(sources)
}

#[cfg(feature = "fits")]
fn read_fits(path: &Path) -> Result<Catalog, ReadCatalogError> {
    super::fits::parse_catalog(path)
}

#[cfg(not(feature = "fits"))]
fn read_fits(_path: &Path) -> Result<Catalog, ReadCatalogError> {
    Err(ReadCatalogError::FitsNotSupported)
}

fn open(path: &Path) -> Result<BufReader<File>, ReadCatalogError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Try all kinds of catalog until one works.
fn guess_and_read(path: &Path) -> Result<(Catalog, CatalogType), ReadCatalogError> {
    let mut f = open(path)?;
    // FITS files always start with "SIMPLE".
    if f.fill_buf()?.starts_with(b"SIMPLE") {
        return read_fits(path).map(|c| (c, CatalogType::Fits));
    }

    let json_err = match catalog_from_json(&mut f) {
        Ok(c) => return Ok((c, CatalogType::Json)),
        Err(e @ ReadCatalogError::Json(_)) => e.to_string(),
        Err(e) => return Err(e),
    };
    trace!("Failed to read catalog as json");
    // Even a failed attempt to read the file alters the buffer. Open it
    // again.
    let yaml_err = match catalog_from_yaml(&mut open(path)?) {
        Ok(c) => return Ok((c, CatalogType::Yaml)),
        Err(e @ ReadCatalogError::Yaml(_)) => e.to_string(),
        Err(e) => return Err(e),
    };
    trace!("Failed to read catalog as yaml");
    match catalog_from_text(&mut open(path)?) {
        Ok(c) => Ok((c, CatalogType::Text)),
        Err(e) => {
            trace!("Failed to read catalog as text");
            Err(ReadCatalogError::FailedToReadAsAnyType {
                json_err,
                yaml_err,
                text_err: e.to_string(),
            })
        }
    }
}

/// Given the path to a catalog file (and optionally its type), return a
/// [`Catalog`]. The [`CatalogType`] is also returned in case that's
/// interesting to the caller.
pub fn read_catalog_file<P: AsRef<Path>>(
    path: P,
    catalog_type: Option<CatalogType>,
) -> Result<(Catalog, CatalogType), ReadCatalogError> {
    fn inner(
        path: &Path,
        catalog_type: Option<CatalogType>,
    ) -> Result<(Catalog, CatalogType), ReadCatalogError> {
        debug!("Attempting to read catalog {}", path.display());
        if !path.exists() {
            return Err(ReadCatalogError::DoesNotExist(path.to_path_buf()));
        }

        // If the file extension tells us what to target, use it.
        let ext_type = path
            .extension()
            .and_then(|os_str| os_str.to_str())
            .map(|s| s.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "yml" => Some(CatalogType::Yaml),
                "txt" | "csv" | "dat" => Some(CatalogType::Text),
                "fit" => Some(CatalogType::Fits),
                ext => CatalogType::from_str(ext).ok(),
            });

        let result = match catalog_type.or(ext_type) {
            Some(CatalogType::Json) => {
                catalog_from_json(&mut open(path)?).map(|c| (c, CatalogType::Json))
            }
            Some(CatalogType::Yaml) => {
                catalog_from_yaml(&mut open(path)?).map(|c| (c, CatalogType::Yaml))
            }
            Some(CatalogType::Text) => {
                catalog_from_text(&mut open(path)?).map(|c| (c, CatalogType::Text))
            }
            Some(CatalogType::Fits) => read_fits(path).map(|c| (c, CatalogType::Fits)),

            // We're guessing what the format is here.
            None => guess_and_read(path),
        };

        let (catalog, catalog_type) = result?;
        info!(
            "Read {} sources from {} catalog {}",
            catalog.len(),
            catalog_type,
            path.display()
        );
        Ok((catalog, catalog_type))
    }
    inner(path.as_ref(), catalog_type)
}
