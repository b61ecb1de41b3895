use std::fs;

use anyhow::{Context, Result};
use huffpack::codec::{ArtifactSummary, inspect as inspect_artifact};

use crate::cli::InspectArgs;

pub fn inspect(args: InspectArgs) -> Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    let summary = inspect_artifact(&data).with_context(|| format!("{} is not a valid artifact", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render(&summary));
    }
    Ok(())
}

fn render(summary: &ArtifactSummary) -> String {
    use core::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "header: {} bytes, {} distinct symbols, {} symbols total\npayload: {} bits + {} padding bits",
        summary.header_len,
        summary.symbols.len(),
        summary.total_symbols,
        summary.payload_bits,
        summary.padding
    );
    for entry in &summary.symbols {
        let _ = writeln!(out, "{:>8?} {:>10} {}", entry.symbol, entry.count, entry.code);
    }
    out
}
