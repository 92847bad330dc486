// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read in region tables.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use log::{debug, trace};

use super::{ReadRegionTableError, RegionTable, RegionTableFileType};

fn check_region_table(table: RegionTable) -> Result<RegionTable, ReadRegionTableError> {
    for (name, region) in table.iter() {
        if [
            region.ra,
            region.dec,
            region.apparent_flux,
            region.total_flux,
        ]
        .iter()
        .any(|v| !v.is_finite())
        {
            return Err(ReadRegionTableError::NonFinite { name: name.clone() });
        }
    }
    Ok(table)
}

/// Convert yaml to a [`RegionTable`].
pub fn region_table_from_yaml<T: Read>(buf: &mut T) -> Result<RegionTable, ReadRegionTableError> {
    let table: RegionTable = serde_yaml::from_reader(buf)?;
    check_region_table(table)
}

/// Convert json to a [`RegionTable`].
pub fn region_table_from_json<T: Read>(buf: &mut T) -> Result<RegionTable, ReadRegionTableError> {
    let table: RegionTable = serde_json::from_reader(buf)?;
    check_region_table(table)
}

/// Read a region table file. If the file's extension isn't "json" or "yaml",
/// json and then yaml are attempted.
pub fn read_region_table<P: AsRef<Path>>(path: P) -> Result<RegionTable, ReadRegionTableError> {
    fn inner(path: &Path) -> Result<RegionTable, ReadRegionTableError> {
        if !path.exists() {
            return Err(ReadRegionTableError::DoesNotExist(path.to_path_buf()));
        }
        let open = || -> Result<BufReader<File>, ReadRegionTableError> {
            Ok(BufReader::new(File::open(path)?))
        };

        let table = match RegionTableFileType::from_path(path) {
            Some(RegionTableFileType::Json) => region_table_from_json(&mut open()?)?,
            Some(RegionTableFileType::Yaml) => region_table_from_yaml(&mut open()?)?,
            None => {
                trace!("Guessing the format of region table {}", path.display());
                match region_table_from_json(&mut open()?) {
                    Ok(t) => t,
                    Err(json_err) => match region_table_from_yaml(&mut open()?) {
                        Ok(t) => t,
                        Err(yaml_err) => {
                            return Err(ReadRegionTableError::FailedToDeserialise {
                                yaml_err: yaml_err.to_string(),
                                json_err: json_err.to_string(),
                            })
                        }
                    },
                }
            }
        };

        debug!("Read {} regions from {}", table.len(), path.display());
        Ok(table)
    }
    inner(path.as_ref())
}
