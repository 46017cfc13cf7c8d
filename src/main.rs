use clap::Parser;
use ddt::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => ddt::cli::commands::search::run(args, &cli.global),
        Commands::Gears(args) => ddt::cli::commands::gears::run(args, &cli.global),
        Commands::Limits(args) => ddt::cli::commands::limits::run(args, &cli.global),
    }
}
