//! `ddt search` command - run the reduction search over a gear catalog

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::catalog::{self, Catalog};
use crate::cli::args::{GlobalOpts, LimitOverrides, OutputFormat};
use crate::cli::helpers::fmt_value;
use crate::core::search::{run_search, SearchOutcome};
use crate::report;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Path to the gear catalog CSV
    pub catalog: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Only print the number of accepted assemblies
    #[arg(long)]
    pub count: bool,

    /// Print run statistics instead of the report
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub limits: LimitOverrides,
}

pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let limits = args.limits.resolve()?;
    let catalog = catalog::load_catalog(&args.catalog, &limits)?;

    // An empty sheet and a sheet with no eligible gears are both valid
    // inputs with an empty answer; tell them apart for the caller
    if catalog.rows_read == 0 {
        if args.count {
            println!("0");
        } else {
            println!("No gear rows found in {}.", args.catalog.display());
        }
        return Ok(());
    }
    if catalog.gears.is_empty() {
        if args.count {
            println!("0");
        } else {
            println!(
                "{} catalog row(s) read, none pass the per-gear limits.",
                catalog.rows_read
            );
        }
        return Ok(());
    }

    let outcome = run_search(&catalog.gears, &limits);

    if outcome.fos_inversions > 0 && !global.quiet {
        eprintln!(
            "{} {} candidate(s) fell below the FOS floor after width optimization; check the catalog torque ratings",
            style("⚠").yellow(),
            outcome.fos_inversions
        );
    }

    if args.count {
        println!("{}", outcome.assemblies.len());
        return Ok(());
    }

    if args.summary {
        print_summary(&catalog, &outcome);
        return Ok(());
    }

    let content = match global.format {
        OutputFormat::Auto | OutputFormat::Csv => {
            let mut buf = Vec::new();
            report::write_report(&mut buf, &outcome.assemblies).into_diagnostic()?;
            String::from_utf8(buf).into_diagnostic()?
        }
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&outcome.assemblies).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Table => render_table(&outcome),
    };

    write_output(&content, args.output.as_deref(), outcome.assemblies.len(), global)
}

/// Markdown-style summary table of the accepted assemblies
fn render_table(outcome: &SearchOutcome) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "GEAR1", "GEAR2", "GEAR3", "GEAR4", "BORE", "RATIO", "MASS", "LENGTH",
    ]);

    for assembly in &outcome.assemblies {
        builder.push_record([
            assembly.gears[0].id.clone(),
            assembly.gears[1].id.clone(),
            assembly.gears[2].id.clone(),
            assembly.gears[3].id.clone(),
            assembly.bores[1].to_string(),
            fmt_value(assembly.total_reduction),
            fmt_value(assembly.mass),
            fmt_value(assembly.center_distance),
        ]);
    }

    let mut table = builder.build().with(TableStyle::markdown()).to_string();
    table.push('\n');
    table
}

fn print_summary(catalog: &Catalog, outcome: &SearchOutcome) {
    println!(
        "{} of {} catalog row(s) pass the per-gear limits",
        catalog.gears.len(),
        catalog.rows_read
    );
    println!("{} candidate assembly(ies) built", outcome.candidates);
    if outcome.fos_inversions > 0 {
        println!(
            "{} candidate(s) flagged for FOS inversion",
            outcome.fos_inversions
        );
    }
    println!(
        "{} {} viable assembly(ies)",
        style("✓").green(),
        outcome.assemblies.len()
    );
}

fn write_output(
    content: &str,
    output_path: Option<&std::path::Path>,
    accepted: usize,
    global: &GlobalOpts,
) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            if !global.quiet {
                println!(
                    "{} Report written to {} ({} assembly(ies))",
                    style("✓").green(),
                    style(path.display()).cyan(),
                    accepted
                );
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
