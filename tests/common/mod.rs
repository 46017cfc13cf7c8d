//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Catalog header row, in constructor field order
pub const CATALOG_HEADER: &str =
    "teeth,thickness,id,rated_torque,bore1,bore2,weight1,weight2,pitch_diameter,form_factor\n";

/// Helper to get a ddt command
pub fn ddt() -> Command {
    Command::new(cargo::cargo_bin!("ddt"))
}

/// Write a catalog CSV into the temp dir and return its path
pub fn write_catalog(tmp: &TempDir, rows: &str) -> PathBuf {
    let path = tmp.path().join("gears.csv");
    fs::write(&path, format!("{CATALOG_HEADER}{rows}")).unwrap();
    path
}

/// Catalog whose single viable assembly works out to round numbers:
/// reductions 1.8 and 1.92, widths 6.5, total mass 2.535, span 179
pub fn reference_rows() -> &'static str {
    "20,10,20_10,195,0,25,0,1.0,60,MSGA\n\
     36,10,36_10,526.5,20,0,0.8,0,108,MSGA\n\
     25,10,25_10,351,20,0,0.9,0,70,MSGA\n\
     48,10,48_10,741.312,22,0,1.2,0,120,MSGA\n"
}
