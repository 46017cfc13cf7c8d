//! `ddt limits` command - show the effective search limits

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::args::{GlobalOpts, LimitOverrides, OutputFormat};
use crate::cli::helpers::fmt_value;

#[derive(clap::Args, Debug)]
pub struct LimitsArgs {
    #[command(flatten)]
    pub limits: LimitOverrides,
}

pub fn run(args: LimitsArgs, global: &GlobalOpts) -> Result<()> {
    let limits = args.limits.resolve()?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&limits).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: [(&str, String); 12] = [
                ("min_bore", limits.min_bore.to_string()),
                ("max_teeth", limits.max_teeth.to_string()),
                ("max_gear_length", fmt_value(limits.max_gear_length)),
                ("min_thickness", fmt_value(limits.min_thickness)),
                ("min_fos", fmt_value(limits.min_fos)),
                ("max_fos", fmt_value(limits.max_fos)),
                ("min_ratio", fmt_value(limits.min_ratio)),
                ("max_ratio", fmt_value(limits.max_ratio)),
                ("max_mass", fmt_value(limits.max_mass)),
                ("min_length", fmt_value(limits.min_length)),
                ("max_cvt", fmt_value(limits.max_cvt)),
                ("engine_torque", fmt_value(limits.engine_torque)),
            ];

            if global.format == OutputFormat::Csv {
                for (name, value) in rows {
                    println!("{},{}", name, value);
                }
            } else {
                let mut builder = Builder::default();
                builder.push_record(["LIMIT", "VALUE"]);
                for (name, value) in rows {
                    builder.push_record([name.to_string(), value]);
                }
                println!("{}", builder.build().with(TableStyle::markdown()));
            }
        }
        // YAML by default: the output is itself a valid limits file
        OutputFormat::Auto => {
            let yaml = serde_yml::to_string(&limits).into_diagnostic()?;
            print!("{}", yaml);
        }
    }

    Ok(())
}
