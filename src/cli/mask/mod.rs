// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Make a clean mask from a region table and a pointing centre.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, InfoPrinter, Warn, ARG_FILE_HELP, CELL_HELP, IMSIZE_HELP, MASK_RADIUS_HELP,
    SOURCE_MASK_RADIUS_HELP,
};
use crate::{
    constants::{
        DEFAULT_BASE_MASK_RADIUS, DEFAULT_CELL_SIZE, DEFAULT_IMSIZE, DEFAULT_MASK_FILENAME,
        DEFAULT_SOURCE_MASK_RADIUS, HERA_DEC_CENTRE_DEG,
    },
    coord::{check_declination_deg, RaDec},
    mask::{set_mask, MaskOutput, MaskParams},
    regions::{read_region_table, RegionTable},
    unit_parsing::{parse_angle, AngleUnit},
    SkymaskError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct MaskArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Path to a region table made by catalog-regions. Without one, the mask
    /// only has the circle around the pointing centre.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) regions: Option<PathBuf>,

    /// The RA of the pointing centre [degrees].
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(super) pointing_ra: Option<f64>,

    /// The RA of the pointing centre [radians]. Can't be used with
    /// --pointing-ra.
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(super) pointing_ra_rad: Option<f64>,

    /// The Dec of the pointing centre [degrees]. Default: the HERA
    /// declination.
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(super) pointing_dec: Option<f64>,

    #[clap(long, help = IMSIZE_HELP.as_str(), help_heading = "IMAGE")]
    pub(super) imsize: Option<u32>,

    #[clap(long, help = CELL_HELP.as_str(), help_heading = "IMAGE")]
    pub(super) cell: Option<String>,

    #[clap(long, help = MASK_RADIUS_HELP.as_str(), help_heading = "MASK")]
    pub(super) mask_radius: Option<String>,

    #[clap(long, help = SOURCE_MASK_RADIUS_HELP.as_str(), help_heading = "MASK")]
    pub(super) source_mask_radius: Option<String>,

    /// The Dec of the circle around the pointing centre [degrees]. Default:
    /// the pointing Dec.
    #[clap(long, allow_hyphen_values = true, help_heading = "MASK")]
    pub(super) mask_dec: Option<f64>,

    /// The directory to write the mask file into. It must exist. Default: the
    /// current directory.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    /// The name of the mask file.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) mask_name: Option<String>,
}

pub(super) struct MaskCliParams {
    pub(super) regions: Option<PathBuf>,
    pub(super) pointing: RaDec,
    pub(super) mask_params: MaskParams,
}

impl MaskArgs {
    /// Consolidate CLI and file arguments, preferring CLI arguments.
    pub(super) fn merge(self) -> Result<MaskArgs, SkymaskError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let MaskArgs {
                args_file: _,
                regions,
                pointing_ra,
                pointing_ra_rad,
                pointing_dec,
                imsize,
                cell,
                mask_radius,
                source_mask_radius,
                mask_dec,
                output_dir,
                mask_name,
            } = unpack_arg_file!(arg_file);

            // Only one form of the pointing RA may survive the merge, and the
            // CLI's form wins.
            let (pointing_ra, pointing_ra_rad) =
                match (cli_args.pointing_ra, cli_args.pointing_ra_rad) {
                    (None, None) => (pointing_ra, pointing_ra_rad),
                    cli => cli,
                };

            Ok(MaskArgs {
                args_file: None,
                regions: cli_args.regions.or(regions),
                pointing_ra,
                pointing_ra_rad,
                pointing_dec: cli_args.pointing_dec.or(pointing_dec),
                imsize: cli_args.imsize.or(imsize),
                cell: cli_args.cell.or(cell),
                mask_radius: cli_args.mask_radius.or(mask_radius),
                source_mask_radius: cli_args.source_mask_radius.or(source_mask_radius),
                mask_dec: cli_args.mask_dec.or(mask_dec),
                output_dir: cli_args.output_dir.or(output_dir),
                mask_name: cli_args.mask_name.or(mask_name),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<MaskCliParams, SkymaskError> {
        trace!("{:#?}", self);

        let MaskArgs {
            args_file: _,
            regions,
            pointing_ra,
            pointing_ra_rad,
            pointing_dec,
            imsize,
            cell,
            mask_radius,
            source_mask_radius,
            mask_dec,
            output_dir,
            mask_name,
        } = self;

        let ra_rad = match (pointing_ra, pointing_ra_rad) {
            (Some(deg), None) => deg.to_radians(),
            (None, Some(rad)) => rad,
            (None, None) => return Err(MaskArgsError::NoPointingRa.into()),
            (Some(_), Some(_)) => return Err(MaskArgsError::TwoPointingRas.into()),
        };
        let dec_deg = pointing_dec.unwrap_or(HERA_DEC_CENTRE_DEG);
        let pointing = RaDec::new(ra_rad, dec_deg.to_radians()).validate()?;

        let angle = |s: Option<String>, default: &str| {
            parse_angle(s.as_deref().unwrap_or(default), AngleUnit::Arcsec)
        };
        let mask_params = MaskParams {
            imsize: imsize.unwrap_or(DEFAULT_IMSIZE),
            cell: angle(cell, DEFAULT_CELL_SIZE)?,
            base_radius: angle(mask_radius, DEFAULT_BASE_MASK_RADIUS)?,
            source_radius: angle(source_mask_radius, DEFAULT_SOURCE_MASK_RADIUS)?,
            base_dec_deg: mask_dec.map(check_declination_deg).transpose()?,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            mask_name: mask_name.unwrap_or_else(|| DEFAULT_MASK_FILENAME.to_string()),
        };

        if regions.is_none() {
            "No region table was given; the mask will only cover the pointing centre".warn();
        }

        let mut printer = InfoPrinter::new("Mask parameters".into());
        printer.push_line(format!("Pointing centre: {pointing}").into());
        printer.push_block(vec![
            format!("Image size: {} pixels", mask_params.imsize).into(),
            format!("Cell size:  {}", mask_params.cell).into(),
        ]);
        printer.push_block(vec![
            format!("Base radius:   {}", mask_params.base_radius).into(),
            format!("Source radius: {}", mask_params.source_radius).into(),
        ]);
        printer.display();
        display_warnings();

        Ok(MaskCliParams {
            regions,
            pointing,
            mask_params,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SkymaskError> {
        debug!("Converting arguments into parameters");
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let output = params.run()?;
        println!("{}", serde_json::to_string(&output)?);
        Ok(())
    }
}

impl MaskCliParams {
    pub(super) fn run(&self) -> Result<MaskOutput, SkymaskError> {
        let table = match &self.regions {
            Some(r) => read_region_table(r)?,
            None => RegionTable::new(),
        };
        let output = set_mask(self.pointing, &table, &self.mask_params)?;
        Ok(output)
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum MaskArgsError {
    #[error("No pointing RA was given; use --pointing-ra or --pointing-ra-rad")]
    NoPointingRa,

    #[error("Both --pointing-ra and --pointing-ra-rad were given; use only one")]
    TwoPointingRas,
}
