use std::fs;

use anyhow::{Context, Result};
use huffpack::HuffmanCoding;
use voxell_timer::time_fn;

use crate::cli::{EncodeArgs, output_path};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = output_path(input_path, args.output.clone(), ".bin")?;
    let coding = HuffmanCoding::new().with_trim_trailing_whitespace(!args.keep_trailing_whitespace);

    let text = fs::read_to_string(input_path).with_context(|| format!("failed to read text from {}", input_path.display()))?;
    let (compressed, comp_dur) = time_fn(|| coding.compress(&text));
    let compressed = compressed?;
    if_tracing! {{
        tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %comp_dur.as_micros(), compressed_len = compressed.len(), "encode finished");
    }}

    fs::write(&output_path, &compressed).with_context(|| format!("failed to write {}", output_path.display()))?;
    println!("Compression successful ({:.0?}). Output file: {}", comp_dur, output_path.display());
    Ok(())
}
