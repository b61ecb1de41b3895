//! cli component of huffpack.
//!
//! > `$exename encode <input> [output] [--keep-trailing-whitespace]`
//!
//! compresses a UTF-8 text file. without an output path the artifact is written next to the input
//! as `<input stem>.bin`. trailing whitespace is dropped from the text unless
//! `--keep-trailing-whitespace` is passed.
//!
//! > `$exename decode <input> [output]`
//!
//! restores the text of an artifact. without an output path it goes to `<input stem>_decompressed.txt`.
//!
//! > `$exename test <input>`
//!
//! compresses and decompresses a file in memory and reports whether the round trip held, along with
//! sizes and timings. nothing is written.
//!
//! > `$exename inspect <input> [--json]`
//!
//! prints the frequency header of an artifact together with the code every symbol was given.
//!
//! log output is controlled with `RUST_LOG`, e.g. `RUST_LOG=huffpack=debug`.
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod decode;
pub mod encode;
pub mod inspect;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot derive an output path from {0:?}, pass one explicitly")]
    NoFileStem(PathBuf),

    #[error("refusing to overwrite the input file {0:?}")]
    OutputIsInput(PathBuf),
}

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a text file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decompress an artifact back into text
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Round-trip a file in memory and report the result
    Test(TestArgs),

    /// Show the frequency header and codes of an artifact
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Path for the compressed output, defaults to `<input stem>.bin`
    pub output: Option<PathBuf>,

    /// Compress the text exactly as read, including trailing whitespace
    #[arg(long)]
    pub keep_trailing_whitespace: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Path for the restored text, defaults to `<input stem>_decompressed.txt`
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Round-trip the text exactly as read, including trailing whitespace
    #[arg(long)]
    pub keep_trailing_whitespace: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolves the output path, deriving `<input without extension><suffix>` when none was given.
pub fn output_path(input: &Path, output: Option<PathBuf>, suffix: &str) -> Result<PathBuf, CliError> {
    let path = match output {
        Some(path) => path,
        None => {
            let stem = input.file_stem().ok_or_else(|| CliError::NoFileStem(input.to_path_buf()))?;
            let mut name = OsString::from(stem);
            name.push(suffix);
            input.with_file_name(name)
        }
    };

    if path == input {
        return Err(CliError::OutputIsInput(path));
    }
    Ok(path)
}
