use clap::Parser;

mod args;
mod uno;
use self::args::Args;
use self::uno::cli_main;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli_main(&args)
}
