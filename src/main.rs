use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod parsing;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("gff_density=debug,info")
    } else {
        EnvFilter::new("gff_density=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Count(args) => {
            cli::count::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
