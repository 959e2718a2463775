use std::io::{self, IsTerminal};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cconv::cli;
use cconv::models::banner::Banner;
use cconv::pipeline::DictionaryBuilder;

fn main() -> ExitCode {
    //setup tracing subscriber that will output to stderr, RUST_LOG overrides the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let collector = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(collector)
        .expect("failed to set tracing default subscriber");

    let code = cli::main_with(std::env::args_os(), &Banner::DEFAULT, &DictionaryBuilder, io::stdout());
    ExitCode::from(code)
}
