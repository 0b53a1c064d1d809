use anyhow::Result;
use clap::Parser;
use perflab::cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = cli::Cli::parse();
    match cli::run(args) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
