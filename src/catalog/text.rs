// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text catalogs.
//!
//! Each non-empty line that isn't a comment (starting with '#') has five
//! columns, separated by whitespace and/or commas:
//!
//! ```text
//! # name            RA [deg]   Dec [deg]   peak [mJy/beam]   total [mJy]
//! J000001.5-301234  0.00625    -30.2094    512.3             540.1
//! ```
//!
//! A header line without numbers is permitted before the first source.

use std::io::BufRead;

use log::trace;

use super::{Catalog, CatalogSource, ReadCatalogError};

const NUM_COLUMNS: usize = 5;

/// Read a plain-text catalog.
pub fn catalog_from_text<T: BufRead>(buf: &mut T) -> Result<Catalog, ReadCatalogError> {
    let mut sources = vec![];
    let mut line = String::new();
    let mut line_num: usize = 0;
    let mut header_allowed = true;

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            line.clear();
            continue;
        }

        let fields: Vec<&str> = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() != NUM_COLUMNS {
            return Err(ReadCatalogError::WrongColumnCount {
                line_num,
                expected: NUM_COLUMNS,
                got: fields.len(),
            });
        }

        let numbers: Result<Vec<f64>, &str> = fields[1..]
            .iter()
            .map(|f| f.parse::<f64>().map_err(|_| *f))
            .collect();
        match numbers {
            Ok(n) => {
                sources.push(CatalogSource {
                    name: fields[0].to_string(),
                    ra: n[0],
                    dec: n[1],
                    peak_flux: n[2],
                    total_flux: n[3],
                });
            }

            // A header is only allowed if none of the columns are numbers.
            Err(_) if header_allowed && fields[1..].iter().all(|f| f.parse::<f64>().is_err()) => {
                trace!("Skipping catalog header on line {line_num}");
            }

            Err(string) => {
                return Err(ReadCatalogError::ParseFloat {
                    line_num,
                    string: string.to_string(),
                })
            }
        }
        header_allowed = false;
        line.clear();
    }

    Catalog::new(sources)
}
