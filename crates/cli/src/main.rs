use anyhow::Result;
use clap::Parser;
use codebox_fonts_cli::cli::Cli;
use env_logger::init;

fn main() -> Result<()> {
    init();
    Cli::parse().command.run()
}
