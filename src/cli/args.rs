//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::{gears::GearsArgs, limits::LimitsArgs, search::SearchArgs};
use crate::core::limits::SearchLimits;

#[derive(Parser)]
#[command(name = "ddt")]
#[command(author, version, about = "Drivetrain Design Toolkit")]
#[command(
    long_about = "A batch toolkit for selecting viable two-stage gear reductions from off-the-shelf gear catalogs."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a gear catalog for viable two-stage reductions
    Search(SearchArgs),

    /// List the catalog gears that pass the per-gear limits
    Gears(GearsArgs),

    /// Show the effective search limits
    Limits(LimitsArgs),
}

/// Output formats across subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV for search/gears, YAML for limits
    Auto,
    Table,
    Csv,
    Json,
}

/// Limit sources and overrides shared by all subcommands
///
/// Resolution is layered: built-in defaults (or the global limits file),
/// then an explicit `--limits` file, then individual flags.
#[derive(clap::Args, Clone, Debug)]
pub struct LimitOverrides {
    /// Limits file (YAML) overriding the built-in defaults
    #[arg(long, value_name = "FILE")]
    pub limits: Option<PathBuf>,

    /// Override the lower bound on total reduction (exclusive)
    #[arg(long)]
    pub min_ratio: Option<f64>,

    /// Override the upper bound on total reduction (exclusive)
    #[arg(long)]
    pub max_ratio: Option<f64>,

    /// Override the maximum assembly mass (kg)
    #[arg(long)]
    pub max_mass: Option<f64>,

    /// Override the per-gear FOS floor
    #[arg(long)]
    pub min_fos: Option<f64>,

    /// Override the per-gear FOS ceiling
    #[arg(long)]
    pub max_fos: Option<f64>,

    /// Override the minimum center-to-center span (mm)
    #[arg(long)]
    pub min_length: Option<f64>,

    /// Override the maximum engine torque (Nm)
    #[arg(long)]
    pub engine_torque: Option<f64>,

    /// Override the maximum CVT reduction
    #[arg(long)]
    pub max_cvt: Option<f64>,
}

impl LimitOverrides {
    /// Resolve the effective limits for this invocation
    pub fn resolve(&self) -> Result<SearchLimits> {
        let mut limits = match &self.limits {
            Some(path) => SearchLimits::load_file(path)?,
            None => SearchLimits::load(),
        };

        if let Some(v) = self.min_ratio {
            limits.min_ratio = v;
        }
        if let Some(v) = self.max_ratio {
            limits.max_ratio = v;
        }
        if let Some(v) = self.max_mass {
            limits.max_mass = v;
        }
        if let Some(v) = self.min_fos {
            limits.min_fos = v;
        }
        if let Some(v) = self.max_fos {
            limits.max_fos = v;
        }
        if let Some(v) = self.min_length {
            limits.min_length = v;
        }
        if let Some(v) = self.engine_torque {
            limits.engine_torque = v;
        }
        if let Some(v) = self.max_cvt {
            limits.max_cvt = v;
        }

        limits.validate()?;
        Ok(limits)
    }
}
