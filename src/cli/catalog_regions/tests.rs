// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    io::{Cursor, Write},
    path::Path,
};

use approx::assert_abs_diff_eq;
use clap::Parser;
use indoc::indoc;
use tempfile::TempDir;

use super::CatalogRegionsArgs;
use crate::{
    beam::BeamType,
    constants::{DEFAULT_DEC_RANGE_DEG, HERA_DEC_CENTRE_DEG, REGION_RADIUS_DEG},
    regions::read_region_table,
    SkymaskError,
};

const TEXT_CATALOG: &str = indoc! {"
    # name  RA     Dec       peak   total
    A       10.0   -30.7214  90.0   100.0
    B       10.01  -30.7214  45.0   50.0
    C       50.0   -10.0     1e6    1e6
"};

fn write_catalog(dir: &Path) -> String {
    let path = dir.join("catalog.txt");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(TEXT_CATALOG.as_bytes()).unwrap();
    path.display().to_string()
}

#[test]
fn test_catalog_regions_writes_a_table() {
    let tmp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(tmp_dir.path());
    let output = tmp_dir.path().join("regions.yaml");
    let output_str = output.display().to_string();

    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", &catalog,
        "--output", &output_str,
        "--min-flux", "0.08",
    ]);
    let params = args.parse(&mut Cursor::new("")).unwrap();
    assert_abs_diff_eq!(params.aggregate_params.dec_range_deg, DEFAULT_DEC_RANGE_DEG);
    assert_abs_diff_eq!(params.aggregate_params.region_radius_deg, REGION_RADIUS_DEG);
    assert_eq!(params.beam.get_beam_type(), BeamType::Exponential);
    params.run().unwrap();

    // "C" is far too far north.
    let table = read_region_table(&output).unwrap();
    assert_eq!(table.len(), 1);
    assert_abs_diff_eq!(table["A"].total_flux, 150.0);
    assert_abs_diff_eq!(table["A"].dec, HERA_DEC_CENTRE_DEG);
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().unwrap();
    let catalog = write_catalog(tmp_dir.path());
    let output = tmp_dir.path().join("regions.json");
    let output_str = output.display().to_string();

    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", &catalog,
        "--output", &output_str,
    ]);
    args.run(true).unwrap();
    assert!(!output.exists());
}

#[test]
fn test_interactive_answers() {
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog",
        "catalog.txt",
        "--interactive",
    ]);

    // A bad answer gives the default, a good one is used.
    let params = args.clone().parse(&mut Cursor::new("lots\n5\n")).unwrap();
    assert_abs_diff_eq!(params.aggregate_params.dec_range_deg, DEFAULT_DEC_RANGE_DEG);
    assert_abs_diff_eq!(params.aggregate_params.min_flux_jy, 5.0);

    // No answers at all.
    let params = args.parse(&mut Cursor::new("")).unwrap();
    assert_abs_diff_eq!(params.aggregate_params.dec_range_deg, 7.0);
    assert_abs_diff_eq!(params.aggregate_params.min_flux_jy, 10.0);

    // Given arguments aren't asked for.
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog",
        "catalog.txt",
        "--dec-range",
        "3",
        "--interactive",
    ]);
    let params = args.parse(&mut Cursor::new("2\n")).unwrap();
    assert_abs_diff_eq!(params.aggregate_params.dec_range_deg, 3.0);
    assert_abs_diff_eq!(params.aggregate_params.min_flux_jy, 2.0);
}

#[test]
fn test_options() {
    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", "catalog.fits",
        "--catalog-type", "text",
        "--ra-range", "23:00:00", "01:00:00",
        "--region-radius", "1800arcsec",
        "--beam-model", "gaussian",
        "--gaussian-fwhm", "12",
    ]);
    let params = args.parse(&mut Cursor::new("")).unwrap();
    assert_eq!(params.catalog_type, Some(crate::catalog::CatalogType::Text));
    let ra_range = params.aggregate_params.ra_range.unwrap();
    assert_abs_diff_eq!(ra_range.lo_deg, 345.0);
    assert_abs_diff_eq!(ra_range.hi_deg, 15.0);
    assert_abs_diff_eq!(params.aggregate_params.region_radius_deg, 0.5, epsilon = 1e-12);
    assert_eq!(params.beam.get_beam_type(), BeamType::Gaussian);
    assert_eq!(params.output, Path::new("regions.json"));
}

#[test]
fn test_bad_arguments() {
    let args = CatalogRegionsArgs::parse_from(["catalog-regions"]);
    assert!(matches!(
        args.parse(&mut Cursor::new("")),
        Err(SkymaskError::Catalog(_))
    ));

    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", "catalog.txt",
        "--ra-range", "25:00:00", "01:00:00",
    ]);
    assert!(matches!(
        args.parse(&mut Cursor::new("")),
        Err(SkymaskError::Coord(_))
    ));

    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", "catalog.txt",
        "--beam-model", "airy",
    ]);
    assert!(matches!(
        args.parse(&mut Cursor::new("")),
        Err(SkymaskError::Beam(_))
    ));

    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", "catalog.txt",
        "--min-flux", "-1",
    ]);
    assert!(matches!(
        args.parse(&mut Cursor::new("")),
        Err(SkymaskError::Regions(_))
    ));

    #[rustfmt::skip]
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog", "catalog.txt",
        "--catalog-type", "votable",
    ]);
    assert!(matches!(
        args.parse(&mut Cursor::new("")),
        Err(SkymaskError::Catalog(_))
    ));
}

#[test]
fn test_missing_catalog_file() {
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        "--catalog",
        "/does/not/exist.txt",
    ]);
    let params = args.parse(&mut Cursor::new("")).unwrap();
    assert!(matches!(params.run(), Err(SkymaskError::Catalog(_))));
}

#[test]
fn test_arguments_file() {
    let tmp_dir = TempDir::new().unwrap();
    let arg_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    f.write_all(
        indoc! {r#"
            catalog = "tgss.fits"
            dec_range = 4.0
            min_flux = 20.0
            ra_range = ["01:00:00", "02:00:00"]
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    let arg_file_str = arg_file.display().to_string();
    // CLI arguments win.
    let args = CatalogRegionsArgs::parse_from([
        "catalog-regions",
        &arg_file_str,
        "--min-flux",
        "30",
    ])
    .merge()
    .unwrap();
    assert!(args.args_file.is_none());
    assert_eq!(args.catalog.as_deref(), Some(Path::new("tgss.fits")));
    assert_eq!(args.dec_range, Some(4.0));
    assert_eq!(args.min_flux, Some(30.0));
    assert_eq!(
        args.ra_range,
        Some(vec!["01:00:00".to_string(), "02:00:00".to_string()])
    );
    assert!(!args.interactive);

    let bad_file = tmp_dir.path().join("args.yaml");
    std::fs::write(&bad_file, "catalog: tgss.fits").unwrap();
    let bad_file_str = bad_file.display().to_string();
    let result = CatalogRegionsArgs::parse_from(["catalog-regions", &bad_file_str]).merge();
    assert!(matches!(result, Err(SkymaskError::ArgFile(_))));
}
