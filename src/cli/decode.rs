use std::fs;

use anyhow::{Context, Result};

use crate::cli::{DecodeArgs, output_path};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = output_path(input_path, args.output.clone(), "_decompressed.txt")?;

    let compressed = fs::read(input_path).with_context(|| format!("failed to read {}", input_path.display()))?;
    let text = huffpack::decompress(&compressed).with_context(|| format!("failed to decompress {}", input_path.display()))?;
    if_tracing! {{
        tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), decompressed_len = text.len(), "decode finished");
    }}

    fs::write(&output_path, text).with_context(|| format!("failed to write {}", output_path.display()))?;
    println!("Decompression successful. Output file: {}", output_path.display());
    Ok(())
}
