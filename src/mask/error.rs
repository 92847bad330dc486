// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    coord::CoordError,
    unit_parsing::{Angle, UnitParseError},
};

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Output directory '{0}' does not exist")]
    PathNotFound(PathBuf),

    #[error("Cannot make a field of view from an image size of {imsize} pixels and a cell size of {cell}")]
    InvalidFieldOfView { imsize: u32, cell: Angle },

    #[error("Couldn't write the mask file '{path}': {err}")]
    Write { path: PathBuf, err: std::io::Error },

    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error("Bad region mask radius: {0}")]
    UnitParse(#[from] UnitParseError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
