use clap::Parser;
use tickerlens::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
