use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use srcscan::cli;
use srcscan::logging::{self, Verbosity};
use srcscan::output::OutputFormatter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    args.validate().context("Invalid arguments")?;
    let config = args.build_config()?;

    for dir in &args.dirs {
        let units = config
            .scan(dir)
            .with_context(|| format!("Scan failed: {}", dir.display()))?;
        tracing::info!(
            dir = %dir.display(),
            units = units.len(),
            format = args.format.as_str(),
            "scanned"
        );

        let output = OutputFormatter::format(&units, args.format)?;
        match args.format {
            cli::OutputFormat::Text => print!("{output}"),
            cli::OutputFormat::Json => println!("{output}"),
        }
    }

    Ok(())
}
