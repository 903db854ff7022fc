//! compilateur-drv - Command-line driver.
//!
//! Wires a source file on disk to [`compilateur_par::compile`] and writes
//! its result to an output file, translating the three kinds of failure a
//! run can hit — a bad path, an I/O error, a [`compilateur_util::CompileError`]
//! — into the stdout/stderr contract and exit code `spec.md` §6 requires.
//!
//! `CompileError` is returned as-is from [`run`] (via `anyhow`'s blanket
//! `From` impl) so its `Display` impl produces the exact `ERREUR
//! LEXICALE/SYNTAXIQUE/SEMANTIQUE [l:c] <msg> -> '<tok>'` line verbatim —
//! this crate never reformats it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use tracing::{info, instrument};

/// `compilateur <input_file> [-o <output_file>]`
#[derive(Debug, Clone, ClapParser)]
#[command(name = "compilateur", about = "Compiles a source program to C")]
pub struct Config {
    /// Source file to compile.
    pub input_file: PathBuf,

    /// Output file for the generated C.
    #[arg(short = 'o', long = "output", default_value = "output.c")]
    pub output_file: PathBuf,
}

/// Runs one compilation: reads `config.input_file`, compiles it, writes
/// `config.output_file`. Prints the progress messages `spec.md` §6
/// names to stdout; any [`compilateur_util::CompileError`] propagates
/// as-is so its own `Display` impl is what reaches the caller.
#[instrument(skip(config), fields(input = %config.input_file.display()))]
pub fn run(config: &Config) -> Result<()> {
    println!("Compilation du fichier {}", config.input_file.display());

    info!("reading source file");
    let source = fs::read(&config.input_file)
        .with_context(|| format!("lecture de {} impossible", config.input_file.display()))?;

    info!(bytes = source.len(), "parsing and emitting");
    let generated = compilateur_par::compile(&source)?;

    info!(output = %config.output_file.display(), "writing generated C");
    fs::write(&config.output_file, generated)
        .with_context(|| format!("ecriture de {} impossible", config.output_file.display()))?;

    println!("Compilation reussie");
    println!("Fichier compile: {}", config.output_file.display());
    Ok(())
}

/// Initializes the `tracing` subscriber from `RUST_LOG` (default `info`).
/// This is internal diagnostic logging only — independent of the
/// stdout progress lines and stderr error diagnostic `run` itself
/// prints, which are emitted regardless of log level.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}
