// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use indoc::indoc;
use tempfile::TempDir;

use hera_skymask::{mask::MaskOutput, regions::read_region_table};

const TEXT_CATALOG: &str = indoc! {"
    Source_name  RA     DEC       Peak_flux  Total_flux
    A            10.0   -30.7214  90.0       100.0
    B            10.01  -30.7214  45.0       50.0
    C            50.0   -10.0     1e6        1e6
"};

fn skymask() -> Command {
    Command::cargo_bin("hera-skymask").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.txt");
    std::fs::write(&path, TEXT_CATALOG).unwrap();
    path
}

#[test]
fn test_coord_convert() {
    let cmd = skymask()
        .args([
            "coord-convert",
            "--ra-rad",
            "3.141592653589793",
            "--dec-deg",
            "-5.5",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, "12h0m0s\n-5d30m0s\n");
}

#[test]
fn test_regions_then_mask() {
    let tmp_dir = TempDir::new().unwrap();
    let catalog = make_catalog(tmp_dir.path());
    let regions = tmp_dir.path().join("regions.json");

    let cmd = skymask()
        .arg("catalog-regions")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--output")
        .arg(&regions)
        .args(["--min-flux", "0.08"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let table = read_region_table(&regions).unwrap();
    assert_eq!(table.keys().collect::<Vec<_>>(), ["A"]);
    assert_eq!(table["A"].num_sources, 2);

    let cmd = skymask()
        .arg("mask")
        .arg("--regions")
        .arg(&regions)
        .args(["--pointing-ra", "10.5", "--mask-dec", "-30"])
        .args(["--imsize", "72", "--cell", "100arcsec"])
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    // The mask is the last thing printed.
    let last_line = stdout.lines().last().unwrap();
    let output: MaskOutput = serde_json::from_str(last_line).unwrap();
    let mask_path = tmp_dir.path().join("mask.rgn");
    assert_eq!(output, MaskOutput::File { path: mask_path.clone() });

    let contents = std::fs::read_to_string(mask_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "#CRTFv0");
    assert!(lines[1].ends_with(", -30d0m0s], 32000arcsec]"));
    assert!(lines[2].ends_with("], 2000arcsec]"));
}

#[test]
fn test_inline_mask() {
    let tmp_dir = TempDir::new().unwrap();
    let cmd = skymask()
        .args(["mask", "--pointing-ra", "180", "--mask-dec", "-30"])
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.ends_with(
        "{\"kind\":\"inline\",\"value\":\"circle[[12h0m0s, -30d0m0s], 32000arcsec]\"}\n"
    ));
    assert!(!tmp_dir.path().join("mask.rgn").exists());
}

#[test]
fn test_errors_exit_with_1() {
    let cmd = skymask().args(["mask", "--imsize", "72"]).ok();
    assert!(cmd.is_err());
    let output = match &cmd {
        Err(e) => e.as_output().unwrap().clone(),
        Ok(_) => unreachable!(),
    };
    assert_eq!(output.status.code(), Some(1));
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No pointing RA"), "{stderr}");

    let tmp_dir = TempDir::new().unwrap();
    let missing = tmp_dir.path().join("missing");
    let cmd = skymask()
        .args(["mask", "--pointing-ra", "0"])
        .arg("--output-dir")
        .arg(&missing)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_interactive_fallback() {
    let tmp_dir = TempDir::new().unwrap();
    let catalog = make_catalog(tmp_dir.path());
    let regions = tmp_dir.path().join("regions.yaml");

    let cmd = skymask()
        .arg("catalog-regions")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--output")
        .arg(&regions)
        .arg("--interactive")
        .write_stdin("seven\n0.08\n")
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("using the default (7)"), "{stdout}");
    assert_eq!(read_region_table(&regions).unwrap().len(), 1);
}

#[test]
fn test_dry_run_and_save_toml() {
    let tmp_dir = TempDir::new().unwrap();
    let catalog = make_catalog(tmp_dir.path());
    let regions = tmp_dir.path().join("regions.json");
    let toml = tmp_dir.path().join("args.toml");

    let cmd = skymask()
        .arg("catalog-regions")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--output")
        .arg(&regions)
        .args(["--dec-range", "5"])
        .arg("--dry-run")
        .arg("--save-toml")
        .arg(&toml)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(!regions.exists());

    // The saved arguments reproduce the run.
    let saved = std::fs::read_to_string(&toml).unwrap();
    assert!(saved.contains("dec_range = 5.0"), "{saved}");
    let cmd = skymask().arg("catalog-regions").arg(&toml).ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(regions.exists());
}
