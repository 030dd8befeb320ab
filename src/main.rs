use anyhow::Result;
use clap::Parser;
use parscan::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
