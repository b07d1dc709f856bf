//! `amoeba` — REPL and batch driver for the Amoeba language (spec.md §4.I,
//! component I). Thin orchestration layer: lexing, parsing and evaluation
//! all live in `amoeba-eval`; this crate only owns argument parsing, I/O,
//! and diagnostic formatting.
//!
//! ```text
//! --file=<path> or stdin line
//!        │
//!        ▼
//!   [amoeba_eval::run] ──▶ amoeba-par::Parser ──▶ amoeba-lex::Lexer
//!        │                        │
//!        │                        ▼
//!        │                 Vec<String> diagnostics (on parse failure)
//!        ▼
//!   Object (on success)
//!        │
//!        ▼
//!   Object::inspect() printed to stdout
//! ```
//!
//! There is no separate compile step and nothing is cached between runs:
//! a REPL line and a `--file` source go through the exact same
//! [`amoeba_eval::run`] call, the only difference being whether the
//! `Environment` persists across calls (REPL) or is created fresh for the
//! one call (`--file`).

use amoeba_eval::{run as eval_source, Environment, Object};
use amoeba_util::SourceError;
use clap::Parser as ClapParser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const PROMPT: &str = ">> ";

#[derive(ClapParser, Debug)]
#[command(name = "amoeba", version, about = "A small expression-oriented scripting language")]
pub struct Cli {
    /// Evaluate a script file instead of starting the REPL.
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Suppress the REPL banner.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();
    match cli.file {
        Some(path) => run_file(&path),
        None => run_repl(cli.quiet),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
}

fn run_file(path: &PathBuf) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .map_err(|source| SourceError::Read { path: path.display().to_string(), source })?;
    let env = Environment::new();
    tracing::debug!(path = %path.display(), "evaluating file");
    match eval_source(&source, &env) {
        Ok(value) => {
            if !matches!(value, Object::Null(_)) {
                println!("{}", value.inspect());
            }
            Ok(())
        }
        Err(errors) => Err(anyhow::anyhow!(format_diagnostics(&errors))),
    }
}

fn run_repl(quiet: bool) -> anyhow::Result<()> {
    if !colors_enabled() {
        colored::control::set_override(false);
    }
    if !quiet {
        print_banner();
    }
    let env = Environment::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 {
            println!();
            break;
        }
        let trimmed = line.trim();
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        tracing::debug!(input = trimmed, "evaluating repl line");
        match eval_source(trimmed, &env) {
            Ok(value) => {
                if !matches!(value, Object::Null(_)) {
                    println!("{}", value.inspect());
                }
            }
            Err(errors) => println!("{}", format_diagnostics(&errors).red()),
        }
    }
    Ok(())
}

fn print_banner() {
    println!("{}", "Amoeba".bold().green());
    println!("Type `exit` or `quit` to leave, or press Ctrl-D.");
}

fn format_diagnostics(errors: &[String]) -> String {
    let mut out = String::from("parse errors:\n");
    for error in errors {
        out.push_str("\t");
        out.push_str(error);
        out.push('\n');
    }
    out.pop();
    out
}

pub fn format_error(err: &anyhow::Error) -> String {
    format!("{}", err.to_string().red())
}
