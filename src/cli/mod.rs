// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `hera-skymask`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `Skymask`, `Skymask::run`,
//! and `SkymaskError`.

#[macro_use]
mod common;
mod catalog_regions;
mod coord_convert;
mod error;
mod mask;

pub use error::SkymaskError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::{info, warn};

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Bright-region tables and clean masks for imaging HERA data.
Documentation: README.md"#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Skymask {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "regions")]
    #[clap(
        about = r#"Find the apparently-bright regions of a source catalog and write them to a region table.
See README.md#region-tables"#
    )]
    CatalogRegions(catalog_regions::CatalogRegionsArgs),

    #[clap(about = r#"Make a clean mask from a region table and a pointing centre. The mask is printed as json.
See README.md#masks"#)]
    Mask(mask::MaskArgs),

    #[clap(about = "Convert coordinates to and from sexagesimal strings.")]
    CoordConvert(coord_convert::CoordConvertArgs),
}

impl Skymask {
    pub fn run(self) -> Result<(), SkymaskError> {
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        // Logging goes to stdout, which would garble coord-convert's output.
        let quiet = matches!(self.command, Command::CoordConvert(_)) && verbosity == 0;
        if !quiet {
            setup_logging(verbosity)
                .map_err(|e| SkymaskError::Generic(format!("Failed to initialise logging: {e}")))?;
        }

        let sub_command = match &self.command {
            Command::CatalogRegions(_) => "catalog-regions",
            Command::Mask(_) => "mask",
            Command::CoordConvert(_) => "coord-convert",
        };
        info!("hera-skymask {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(&toml)?);
                    let toml_str = toml::to_string(&args)?;
                    f.write_all(toml_str.as_bytes())?;
                    f.flush()?;
                    info!("Saved arguments to {}", toml.display());
                }
                args.run(dry_run)?;
            }};
        }

        match self.command {
            Command::CatalogRegions(args) => merge_save_run!(args),
            Command::Mask(args) => merge_save_run!(args),
            Command::CoordConvert(args) => {
                if save_toml.is_some() {
                    warn!("coord-convert has no arguments to save; ignoring --save-toml");
                }
                args.run()?
            }
        }

        info!("hera-skymask {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let file = record.file().unwrap_or("?");
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {file}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => info!("Compiled on git commit hash: {hash}{dirty}"),
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {hr}");
    }
    info!("            {BUILT_TIME_UTC}");
    info!("         with compiler {RUSTC_VERSION}");
    info!("");
}
