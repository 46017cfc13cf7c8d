//! Catalog input boundary - gear sheet CSV to typed records
//!
//! The catalog is a CSV with a header row followed by data rows of exactly
//! ten fields in constructor order: teeth, thickness, id, rated_torque,
//! bore1, bore2, weight1, weight2, pitch_diameter, form_factor.
//!
//! Malformed rows abort the batch: silently skipping them would mask
//! data-entry errors, which are a different thing from legitimate
//! ineligibility. Ineligible rows, by contrast, are dropped without comment.

use csv::{ReaderBuilder, StringRecord};
use miette::Diagnostic;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::core::gear::Gear;
use crate::core::limits::SearchLimits;

/// Number of fields in a catalog row
const CATALOG_FIELDS: usize = 10;

/// Errors raised at the catalog boundary
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    #[diagnostic(code(ddt::catalog::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog row {row}: {message}")]
    #[diagnostic(
        code(ddt::catalog::parse),
        help(
            "catalog rows need 10 fields: teeth, thickness, id, rated_torque, bore1, bore2, weight1, weight2, pitch_diameter, form_factor"
        )
    )]
    Parse { row: usize, message: String },

    /// A gear with degenerate data slipped past the raw parse; this is a
    /// catalog data error, never a recoverable condition
    #[error("invalid gear '{id}': {reason}")]
    #[diagnostic(code(ddt::catalog::invalid_gear))]
    InvalidGear { id: String, reason: String },
}

/// A parsed gear sheet
///
/// `gears` holds only the eligible records, in catalog order; `rows_read`
/// counts every data row, so callers can tell an empty sheet apart from one
/// where nothing passed the per-gear limits.
#[derive(Debug)]
pub struct Catalog {
    pub gears: Vec<Gear>,
    pub rows_read: usize,
}

impl Catalog {
    /// Number of rows dropped by the eligibility filter
    pub fn ineligible(&self) -> usize {
        self.rows_read - self.gears.len()
    }
}

/// Load a gear sheet from a CSV file
pub fn load_catalog(path: &Path, limits: &SearchLimits) -> Result<Catalog, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(BufReader::new(file), limits)
}

/// Parse a gear sheet from any reader
///
/// The header row is skipped; data rows are validated, then filtered through
/// [`Gear::is_eligible`].
pub fn parse_catalog<R: Read>(reader: R, limits: &SearchLimits) -> Result<Catalog, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut gears = Vec::new();
    let mut rows_read = 0;

    for (idx, result) in rdr.records().enumerate() {
        // 1-based row numbers counting the header, matching what a
        // spreadsheet shows
        let row = idx + 2;
        let record = result.map_err(|e| CatalogError::Parse {
            row,
            message: e.to_string(),
        })?;

        let gear = parse_row(&record, row)?;
        gear.validate()
            .map_err(|reason| CatalogError::InvalidGear {
                id: gear.id.clone(),
                reason,
            })?;

        rows_read += 1;
        if gear.is_eligible(limits) {
            gears.push(gear);
        }
    }

    Ok(Catalog { gears, rows_read })
}

fn parse_row(record: &StringRecord, row: usize) -> Result<Gear, CatalogError> {
    if record.len() != CATALOG_FIELDS {
        return Err(CatalogError::Parse {
            row,
            message: format!("expected {} fields, found {}", CATALOG_FIELDS, record.len()),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default();
    let int_field = |i: usize, name: &str| -> Result<u32, CatalogError> {
        field(i).parse().map_err(|_| CatalogError::Parse {
            row,
            message: format!("field '{}' is not an integer: '{}'", name, field(i)),
        })
    };
    let num_field = |i: usize, name: &str| -> Result<f64, CatalogError> {
        field(i).parse().map_err(|_| CatalogError::Parse {
            row,
            message: format!("field '{}' is not numeric: '{}'", name, field(i)),
        })
    };

    Ok(Gear {
        teeth: int_field(0, "teeth")?,
        thickness: num_field(1, "thickness")?,
        id: field(2).to_string(),
        rated_torque: num_field(3, "rated_torque")?,
        bore1: int_field(4, "bore1")?,
        bore2: int_field(5, "bore2")?,
        weight1: num_field(6, "weight1")?,
        weight2: num_field(7, "weight2")?,
        pitch_diameter: num_field(8, "pitch_diameter")?,
        form_factor: field(9).to_string(),
    })
}
