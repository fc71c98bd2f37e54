use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::Parser;
use log::debug;

use stine_interpreter::Evaluator;
use stine_lexer::{Lexer, WriteObserver};

/// Run a stine script.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dump every token to stderr as `Token: <text> (<kind>)` before running.
    #[arg(long, env = "STINE_TRACE_TOKENS", value_parser = BoolishValueParser::new())]
    trace_tokens: bool,

    /// Path to the `.stine` source file.
    path: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version are not failures
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run_file(&args.path, args.trace_tokens) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &Path, trace_tokens: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to open file: {}", path.display()))?;
    debug!("read {} bytes from {}", source.len(), path.display());

    let mut observer = WriteObserver::new(io::stderr(), trace_tokens);
    let tokens = Lexer::new(&source).tokenize_with(&mut observer);

    Evaluator::new().run(&tokens)?;

    Ok(())
}
