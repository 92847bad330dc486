// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the bright regions of a catalog and write them to a region table.

#[cfg(test)]
mod tests;

use std::{io::BufRead, path::PathBuf, str::FromStr};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, prompt_for_f64, InfoPrinter, Warn, ARG_FILE_HELP, BEAM_MODEL_HELP,
    CATALOG_TYPE_HELP, DEC_RANGE_HELP, GAUSSIAN_FWHM_HELP, MIN_FLUX_HELP, REGION_RADIUS_HELP,
};
use crate::{
    beam::{create_beam_object, parse_beam_type, Beam, BeamType},
    catalog::{read_catalog_file, CatalogType},
    constants::{
        DEFAULT_DEC_RANGE_DEG, DEFAULT_MIN_FLUX_JY, DEFAULT_REGION_TABLE_FILENAME,
        HERA_DEC_CENTRE_DEG,
    },
    coord::RaRange,
    regions::{aggregate_regions, write_region_table, AggregateParams},
    unit_parsing::{parse_angle, AngleUnit},
    SkymaskError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct CatalogRegionsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Path to the source catalog, e.g. TGSS ADR1.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) catalog: Option<PathBuf>,

    #[clap(long, help = CATALOG_TYPE_HELP.as_str(), help_heading = "INPUT FILES")]
    pub(super) catalog_type: Option<String>,

    /// Path to the output region table. Supported formats: json, yaml.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    #[clap(long, allow_hyphen_values = true, help = DEC_RANGE_HELP.as_str(), help_heading = "SOURCE SELECTION")]
    pub(super) dec_range: Option<f64>,

    /// Only sources with an RA between LO and HI (each "hh:mm:ss") can be
    /// bright. If LO is larger than HI, the range wraps through 0h.
    #[clap(long, number_of_values = 2, value_names = &["LO", "HI"], help_heading = "SOURCE SELECTION")]
    pub(super) ra_range: Option<Vec<String>>,

    #[clap(long, allow_hyphen_values = true, help = MIN_FLUX_HELP.as_str(), help_heading = "SOURCE SELECTION")]
    pub(super) min_flux: Option<f64>,

    #[clap(long, help = REGION_RADIUS_HELP.as_str(), help_heading = "SOURCE SELECTION")]
    pub(super) region_radius: Option<String>,

    #[clap(long, help = BEAM_MODEL_HELP.as_str(), help_heading = "BEAM")]
    pub(super) beam_model: Option<String>,

    #[clap(long, help = GAUSSIAN_FWHM_HELP.as_str(), help_heading = "BEAM")]
    pub(super) gaussian_fwhm: Option<f64>,

    /// Ask for the declination range and minimum flux density if they weren't
    /// given. Unusable answers fall back to the defaults.
    #[clap(short, long)]
    #[serde(default)]
    pub(super) interactive: bool,
}

/// Everything needed to turn a catalog into a region table.
pub(super) struct CatalogRegionsParams {
    pub(super) catalog: PathBuf,
    pub(super) catalog_type: Option<CatalogType>,
    pub(super) output: PathBuf,
    pub(super) aggregate_params: AggregateParams,
    pub(super) beam: Box<dyn Beam>,
}

impl CatalogRegionsArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct, preferring CLI arguments.
    pub(super) fn merge(self) -> Result<CatalogRegionsArgs, SkymaskError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let CatalogRegionsArgs {
                args_file: _,
                catalog,
                catalog_type,
                output,
                dec_range,
                ra_range,
                min_flux,
                region_radius,
                beam_model,
                gaussian_fwhm,
                interactive,
            } = unpack_arg_file!(arg_file);

            Ok(CatalogRegionsArgs {
                args_file: None,
                catalog: cli_args.catalog.or(catalog),
                catalog_type: cli_args.catalog_type.or(catalog_type),
                output: cli_args.output.or(output),
                dec_range: cli_args.dec_range.or(dec_range),
                ra_range: cli_args.ra_range.or(ra_range),
                min_flux: cli_args.min_flux.or(min_flux),
                region_radius: cli_args.region_radius.or(region_radius),
                beam_model: cli_args.beam_model.or(beam_model),
                gaussian_fwhm: cli_args.gaussian_fwhm.or(gaussian_fwhm),
                interactive: cli_args.interactive || interactive,
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Make sense of the arguments. Answers to interactive questions are read
    /// from `input`.
    pub(super) fn parse<R: BufRead>(
        self,
        input: &mut R,
    ) -> Result<CatalogRegionsParams, SkymaskError> {
        trace!("{:#?}", self);

        let CatalogRegionsArgs {
            args_file: _,
            catalog,
            catalog_type,
            output,
            dec_range,
            ra_range,
            min_flux,
            region_radius,
            beam_model,
            gaussian_fwhm,
            interactive,
        } = self;

        let catalog = catalog.ok_or(CatalogRegionsArgsError::NoCatalog)?;
        let catalog_type = catalog_type
            .map(|t| {
                CatalogType::from_str(&t)
                    .map_err(|_| SkymaskError::Catalog(format!("Unrecognised catalog type '{t}'")))
            })
            .transpose()?;
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_REGION_TABLE_FILENAME));

        let dec_range = match (dec_range, interactive) {
            (Some(d), _) => d,
            (None, true) => prompt_for_f64(
                input,
                "Declination range around the HERA declination [degrees]",
                DEFAULT_DEC_RANGE_DEG,
            ),
            (None, false) => DEFAULT_DEC_RANGE_DEG,
        };
        let min_flux = match (min_flux, interactive) {
            (Some(f), _) => f,
            (None, true) => prompt_for_f64(
                input,
                "Minimum apparent flux density [Jy]",
                DEFAULT_MIN_FLUX_JY,
            ),
            (None, false) => DEFAULT_MIN_FLUX_JY,
        };

        let ra_range = match ra_range.as_deref() {
            None => None,
            Some([lo, hi]) => Some(RaRange::parse(lo, hi)?),
            Some(other) => return Err(CatalogRegionsArgsError::BadRaRange(other.len()).into()),
        };

        let mut aggregate_params = AggregateParams::new(dec_range, min_flux, ra_range)?;
        if let Some(r) = region_radius {
            let radius = parse_angle(&r, AngleUnit::Deg)?;
            aggregate_params = aggregate_params.with_region_radius(radius.to_degrees())?;
        }

        let beam_type = match beam_model {
            Some(b) => parse_beam_type(&b)?,
            None => BeamType::default(),
        };
        if beam_type != BeamType::Gaussian && gaussian_fwhm.is_some() {
            "A gaussian FWHM was given, but the beam model isn't gaussian; ignoring".warn();
        }
        let beam = create_beam_object(beam_type, gaussian_fwhm)?;

        let mut printer = InfoPrinter::new("Bright region parameters".into());
        printer.push_block(vec![
            format!("Catalog: {}", catalog.display()).into(),
            format!("Output:  {}", output.display()).into(),
        ]);
        let mut selection = vec![
            format!(
                "Dec range: ±{}° (around {}°)",
                aggregate_params.dec_range_deg,
                HERA_DEC_CENTRE_DEG
            )
            .into(),
            format!("Minimum apparent flux: {} Jy", aggregate_params.min_flux_jy).into(),
            format!("Region radius: {:.4}°", aggregate_params.region_radius_deg).into(),
        ];
        if let Some(r) = aggregate_params.ra_range {
            selection.push(format!("RA range: {}° to {}°", r.lo_deg, r.hi_deg).into());
        }
        printer.push_block(selection);
        printer.push_line(format!("Beam model: {beam_type}").into());
        printer.display();
        display_warnings();

        Ok(CatalogRegionsParams {
            catalog,
            catalog_type,
            output,
            aggregate_params,
            beam,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SkymaskError> {
        debug!("Converting arguments into parameters");
        let params = self.parse(&mut std::io::stdin().lock())?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()
    }
}

impl CatalogRegionsParams {
    pub(super) fn run(&self) -> Result<(), SkymaskError> {
        let (catalog, _) = read_catalog_file(&self.catalog, self.catalog_type)?;
        let table = aggregate_regions(&catalog, &self.aggregate_params, self.beam.as_ref())?;
        if table.is_empty() {
            "No bright regions were found".warn();
            display_warnings();
        }
        write_region_table(&self.output, &table)?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum CatalogRegionsArgsError {
    #[error("No catalog was specified")]
    NoCatalog,

    #[error("An RA range needs exactly two values (LO and HI); got {0}")]
    BadRaRange(usize),
}
