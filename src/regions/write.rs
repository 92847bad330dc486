// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to write out region tables.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use super::{RegionTable, RegionTableFileType, WriteRegionTableError};

/// Write a [`RegionTable`] as yaml.
pub fn region_table_to_yaml<T: Write>(
    buf: &mut T,
    table: &RegionTable,
) -> Result<(), WriteRegionTableError> {
    serde_yaml::to_writer(buf, table)?;
    Ok(())
}

/// Write a [`RegionTable`] as (pretty) json.
pub fn region_table_to_json<T: Write>(
    buf: &mut T,
    table: &RegionTable,
) -> Result<(), WriteRegionTableError> {
    serde_json::to_writer_pretty(&mut *buf, table)?;
    writeln!(buf)?;
    Ok(())
}

/// Write a [`RegionTable`] to a file. The format is determined by the file's
/// extension.
pub fn write_region_table<P: AsRef<Path>>(
    path: P,
    table: &RegionTable,
) -> Result<(), WriteRegionTableError> {
    fn inner(path: &Path, table: &RegionTable) -> Result<(), WriteRegionTableError> {
        let file_type = RegionTableFileType::from_path(path)
            .ok_or_else(|| WriteRegionTableError::InvalidFormat(path.display().to_string()))?;

        let mut buf = BufWriter::new(File::create(path)?);
        match file_type {
            RegionTableFileType::Json => region_table_to_json(&mut buf, table)?,
            RegionTableFileType::Yaml => region_table_to_yaml(&mut buf, table)?,
        }
        buf.flush()?;

        info!(
            "Wrote {} regions to {} ({file_type})",
            table.len(),
            path.display()
        );
        Ok(())
    }
    inner(path.as_ref(), table)
}
