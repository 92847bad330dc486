// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{Cursor, Write};

use approx::assert_abs_diff_eq;
use indoc::indoc;

use super::*;
use crate::{
    beam::{ExponentialBeam, GaussianBeam},
    catalog::{Catalog, CatalogSource},
    constants::{HERA_DEC_CENTRE_DEG, REGION_RADIUS_DEG},
    coord::{CoordError, RaRange},
};

fn source(name: &str, ra: f64, dec: f64, total_flux: f64) -> CatalogSource {
    CatalogSource {
        name: name.to_string(),
        ra,
        dec,
        peak_flux: total_flux * 0.9,
        total_flux,
    }
}

fn params(dec_range_deg: f64, min_flux_jy: f64) -> AggregateParams {
    AggregateParams::new(dec_range_deg, min_flux_jy, None).unwrap()
}

#[test]
fn test_region_radius() {
    // (c / 150 MHz) / 100 m in degrees, halved.
    assert_abs_diff_eq!(REGION_RADIUS_DEG, 0.5725, epsilon = 1e-3);
}

#[test]
fn test_nearby_sources_are_summed() {
    let catalog = Catalog::new(vec![
        source("A", 10.0, HERA_DEC_CENTRE_DEG, 100.0),
        source("B", 10.01, HERA_DEC_CENTRE_DEG, 50.0),
    ])
    .unwrap();
    let table = aggregate_regions(&catalog, &params(7.0, 0.08), &ExponentialBeam).unwrap();

    // B is too dim to be the centre of its own region.
    assert_eq!(table.len(), 1);
    let region = &table["A"];
    assert_abs_diff_eq!(region.total_flux, 150.0);
    assert_abs_diff_eq!(region.apparent_flux, 150.0);
    assert_eq!(region.num_sources, 2);
    assert_abs_diff_eq!(region.ra, 10.0);
    assert_abs_diff_eq!(region.dec, HERA_DEC_CENTRE_DEG);
    assert!(region.mask_radius.is_none());
}

#[test]
fn test_distant_sources_are_not_summed() {
    let catalog = Catalog::new(vec![
        source("A", 10.0, HERA_DEC_CENTRE_DEG, 100.0),
        source("B", 11.0, HERA_DEC_CENTRE_DEG, 50.0),
    ])
    .unwrap();
    let table = aggregate_regions(&catalog, &params(7.0, 0.08), &ExponentialBeam).unwrap();

    assert_eq!(table.len(), 1);
    assert_abs_diff_eq!(table["A"].total_flux, 100.0);
    assert_eq!(table["A"].num_sources, 1);
}

#[test]
fn test_dec_band_is_inclusive() {
    let catalog = Catalog::new(vec![
        source("in_north", 0.0, HERA_DEC_CENTRE_DEG + 6.99, 1e6),
        source("out_north", 90.0, HERA_DEC_CENTRE_DEG + 7.01, 1e6),
        source("in_south", 180.0, HERA_DEC_CENTRE_DEG - 6.99, 1e6),
        source("out_south", 270.0, HERA_DEC_CENTRE_DEG - 7.01, 1e6),
    ])
    .unwrap();

    let located = filter_by_location(&catalog, 7.0, None);
    let names: Vec<&str> = located.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["in_north", "in_south"]);

    let table = aggregate_regions(&catalog, &params(7.0, 0.0), &ExponentialBeam).unwrap();
    let names: Vec<&str> = table.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, ["in_north", "in_south"]);
}

#[test]
fn test_sources_outside_the_band_still_contribute() {
    let catalog = Catalog::new(vec![
        source("edge", 45.0, HERA_DEC_CENTRE_DEG + 6.99, 1e6),
        source("neighbour", 45.0, HERA_DEC_CENTRE_DEG + 7.2, 2e6),
    ])
    .unwrap();
    let table = aggregate_regions(&catalog, &params(7.0, 0.0), &ExponentialBeam).unwrap();

    assert_eq!(table.len(), 1);
    let region = &table["edge"];
    assert_eq!(region.num_sources, 2);
    assert_abs_diff_eq!(region.total_flux, 3e6);
    assert_abs_diff_eq!(
        region.apparent_flux,
        1e6 * (-6.99_f64).exp() + 2e6 * (-7.2_f64).exp(),
        epsilon = 1e-6
    );
}

#[test]
fn test_apparent_flux_uses_the_beam() {
    let catalog = vec![
        source("centre", 0.0, HERA_DEC_CENTRE_DEG, 1000.0),
        source("offset", 0.0, HERA_DEC_CENTRE_DEG + 1.0, 1000.0),
    ];
    let located = filter_by_location(&catalog, 7.0, None);

    let apparent = calc_apparent_flux(&located, &ExponentialBeam);
    assert_abs_diff_eq!(apparent[0].beam_factor, 1.0);
    assert_abs_diff_eq!(apparent[0].apparent_total_flux, 1000.0);
    assert_abs_diff_eq!(apparent[0].apparent_peak_flux, 900.0);
    assert_abs_diff_eq!(apparent[1].beam_factor, (-1.0_f64).exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(
        apparent[1].apparent_total_flux,
        1000.0 * (-1.0_f64).exp(),
        epsilon = 1e-9
    );

    let gaussian = GaussianBeam::new(10.0).unwrap();
    let apparent = calc_apparent_flux(&located, &gaussian);
    assert_abs_diff_eq!(apparent[0].beam_factor, 1.0);
    assert!(apparent[1].beam_factor > (-1.0_f64).exp());
    assert!(apparent[1].beam_factor < 1.0);

    // Only "centre" is at least 500 mJy with the exponential beam.
    let bright = filter_by_flux(calc_apparent_flux(&located, &ExponentialBeam), 500.0);
    assert_eq!(bright.len(), 1);
    assert_eq!(bright[0].source.name, "centre");
}

#[test]
fn test_ra_range_filter() {
    let catalog = Catalog::new(vec![
        source("first", 10.0, HERA_DEC_CENTRE_DEG, 1e5),
        source("second", 20.0, HERA_DEC_CENTRE_DEG, 1e5),
        source("third", 350.0, HERA_DEC_CENTRE_DEG, 1e5),
    ])
    .unwrap();

    let ra_range = RaRange::parse("00:00:00", "01:00:00").unwrap();
    let p = AggregateParams::new(7.0, 1.0, Some(ra_range)).unwrap();
    let table = aggregate_regions(&catalog, &p, &ExponentialBeam).unwrap();
    assert_eq!(table.keys().collect::<Vec<_>>(), ["first"]);

    // Wrapping through RA = 0.
    let ra_range = RaRange::parse("23:00:00", "01:00:00").unwrap();
    let p = AggregateParams::new(7.0, 1.0, Some(ra_range)).unwrap();
    let table = aggregate_regions(&catalog, &p, &ExponentialBeam).unwrap();
    assert_eq!(table.keys().collect::<Vec<_>>(), ["first", "third"]);
}

#[test]
fn test_regions_wrap_through_ra_zero() {
    let catalog = Catalog::new(vec![
        source("A", 359.9, HERA_DEC_CENTRE_DEG, 100.0),
        source("B", 0.1, HERA_DEC_CENTRE_DEG, 50.0),
    ])
    .unwrap();
    let table = aggregate_regions(&catalog, &params(7.0, 0.08), &ExponentialBeam).unwrap();
    assert_abs_diff_eq!(table["A"].total_flux, 150.0);
}

#[test]
fn test_regions_keep_catalog_order() {
    let sources: Vec<CatalogSource> = (0..50)
        .rev()
        .map(|i| source(&format!("S{i:02}"), f64::from(i) * 7.0, HERA_DEC_CENTRE_DEG, 1e5))
        .collect();
    let expected: Vec<String> = sources.iter().map(|s| s.name.clone()).collect();
    let catalog = Catalog::new(sources).unwrap();

    let table = aggregate_regions(&catalog, &params(7.0, 1.0), &ExponentialBeam).unwrap();
    assert_eq!(table.keys().cloned().collect::<Vec<_>>(), expected);
}

#[test]
fn test_invalid_params() {
    assert!(matches!(
        AggregateParams::new(f64::NAN, 10.0, None),
        Err(AggregateError::Coord(CoordError::InvalidAngle(_)))
    ));
    assert!(matches!(
        AggregateParams::new(-1.0, 10.0, None),
        Err(AggregateError::NegativeDecRange(_))
    ));
    assert!(matches!(
        AggregateParams::new(7.0, -1.0, None),
        Err(AggregateError::InvalidMinFlux(_))
    ));
    assert!(matches!(
        AggregateParams::new(7.0, f64::INFINITY, None),
        Err(AggregateError::InvalidMinFlux(_))
    ));
    assert!(matches!(
        params(7.0, 10.0).with_region_radius(0.0),
        Err(AggregateError::InvalidRegionRadius(_))
    ));

    // Public fields are checked again when aggregating.
    let mut p = params(7.0, 10.0);
    p.dec_range_deg = f64::INFINITY;
    let catalog = Catalog::new(vec![]).unwrap();
    assert!(aggregate_regions(&catalog, &p, &ExponentialBeam).is_err());
}

fn example_table() -> RegionTable {
    let mut table = RegionTable::new();
    table.insert(
        "J000000-300000".to_string(),
        Region {
            dec: -30.0,
            ra: 0.0,
            apparent_flux: 120.5,
            total_flux: 150.0,
            num_sources: 2,
            mask_radius: None,
        },
    );
    table.insert(
        "J010000-310000".to_string(),
        Region {
            dec: -31.0,
            ra: 15.0,
            apparent_flux: 90.25,
            total_flux: 100.0,
            num_sources: 1,
            mask_radius: Some("1000arcsec".to_string()),
        },
    );
    table
}

#[test]
fn test_region_table_keys() {
    let json = serde_json::to_string(&example_table()).unwrap();
    for key in [
        "\"Dec\"",
        "\"RA\"",
        "\"Apparent_flux\"",
        "\"Total_flux\"",
        "\"Num_sources\"",
    ] {
        assert!(json.contains(key), "{key} missing from {json}");
    }
    // Only the second region has a mask radius.
    assert_eq!(json.matches("\"Mask_radius\"").count(), 1);
}

#[test]
fn test_region_table_file_round_trip() {
    let table = example_table();
    for suffix in [".json", ".yaml", ".yml"] {
        let temp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write_region_table(temp.path(), &table).unwrap();
        let read = read_region_table(temp.path()).unwrap();
        assert_eq!(read, table);
        assert_eq!(read.keys().collect::<Vec<_>>(), table.keys().collect::<Vec<_>>());
    }
}

#[test]
fn test_read_region_table_by_guessing() {
    let yaml = indoc! {"
        J000000-300000:
          Dec: -30.0
          RA: 0.0
          Apparent_flux: 120.5
          Total_flux: 150.0
          Num_sources: 2
        J010000-310000:
          Dec: -31.0
          RA: 15.0
          Apparent_flux: 90.25
          Total_flux: 100.0
          Mask_radius: 1000arcsec
    "};
    let mut temp = tempfile::Builder::new().suffix(".table").tempfile().unwrap();
    temp.write_all(yaml.as_bytes()).unwrap();
    temp.flush().unwrap();

    let table = read_region_table(temp.path()).unwrap();
    // "Num_sources" defaults to 1.
    assert_eq!(table, example_table());

    let table = region_table_from_yaml(&mut Cursor::new(yaml)).unwrap();
    assert_eq!(table, example_table());
}

#[test]
fn test_region_table_errors() {
    let temp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let result = write_region_table(temp.path(), &example_table());
    assert!(matches!(result, Err(WriteRegionTableError::InvalidFormat(_))));

    let result = read_region_table("/does/not/exist.json");
    assert!(matches!(result, Err(ReadRegionTableError::DoesNotExist(_))));

    let result = region_table_from_json(&mut Cursor::new(r#"{"A": {"Dec": 1.0}}"#));
    assert!(matches!(result, Err(ReadRegionTableError::Json(_))));

    let mut temp = tempfile::Builder::new().suffix(".table").tempfile().unwrap();
    temp.write_all(b"[1, 2, 3]").unwrap();
    temp.flush().unwrap();
    let result = read_region_table(temp.path());
    assert!(matches!(
        result,
        Err(ReadRegionTableError::FailedToDeserialise { .. })
    ));
}
