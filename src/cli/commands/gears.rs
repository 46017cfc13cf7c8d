//! `ddt gears` command - list catalog gears that pass the per-gear limits

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::catalog;
use crate::cli::args::{GlobalOpts, LimitOverrides, OutputFormat};
use crate::cli::helpers::{fmt_value, truncate_str};

#[derive(clap::Args, Debug)]
pub struct GearsArgs {
    /// Path to the gear catalog CSV
    pub catalog: PathBuf,

    /// Only print the eligible gear count
    #[arg(long)]
    pub count: bool,

    #[command(flatten)]
    pub limits: LimitOverrides,
}

pub fn run(args: GearsArgs, global: &GlobalOpts) -> Result<()> {
    let limits = args.limits.resolve()?;
    let catalog = catalog::load_catalog(&args.catalog, &limits)?;

    if args.count {
        println!("{}", catalog.gears.len());
        return Ok(());
    }

    if catalog.rows_read == 0 {
        println!("No gear rows found in {}.", args.catalog.display());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&catalog.gears).into_diagnostic()?;
            println!("{}", json);
        }
        // CSV output mirrors the catalog schema, so a filtered sheet can be
        // fed straight back into `ddt search`
        OutputFormat::Auto | OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record([
                "teeth",
                "thickness",
                "id",
                "rated_torque",
                "bore1",
                "bore2",
                "weight1",
                "weight2",
                "pitch_diameter",
                "form_factor",
            ])
            .into_diagnostic()?;
            for gear in &catalog.gears {
                wtr.write_record([
                    gear.teeth.to_string(),
                    fmt_value(gear.thickness),
                    gear.id.clone(),
                    fmt_value(gear.rated_torque),
                    gear.bore1.to_string(),
                    gear.bore2.to_string(),
                    fmt_value(gear.weight1),
                    fmt_value(gear.weight2),
                    fmt_value(gear.pitch_diameter),
                    gear.form_factor.clone(),
                ])
                .into_diagnostic()?;
            }
            wtr.flush().into_diagnostic()?;
        }
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record([
                "ID", "TEETH", "THICK", "TORQUE", "BORE1", "BORE2", "PITCHD", "FORM",
            ]);
            for gear in &catalog.gears {
                builder.push_record([
                    gear.id.clone(),
                    gear.teeth.to_string(),
                    fmt_value(gear.thickness),
                    fmt_value(gear.rated_torque),
                    gear.bore1.to_string(),
                    gear.bore2.to_string(),
                    fmt_value(gear.pitch_diameter),
                    truncate_str(&gear.form_factor, 12),
                ]);
            }
            println!("{}", builder.build().with(TableStyle::markdown()));

            if !global.quiet {
                println!();
                println!(
                    "{} {} of {} catalog row(s) pass the per-gear limits",
                    style("✓").green(),
                    catalog.gears.len(),
                    catalog.rows_read
                );
            }
        }
    }

    Ok(())
}
