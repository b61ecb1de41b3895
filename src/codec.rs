//! Static Huffman codec over Unicode text.
//!
//! Artifact layout: `[header][padding count][packed code bits][padding]`. See [`header`] and [`bits`]
//! for the exact byte formats.

use anyhow::Context;
use serde::Serialize;

use crate::compressor::{CapacityError, Compressor, FormatError, HuffmanError, Result};

if_tracing! {
    use tracing::{Level, info, span, warn};
}

pub mod bits;
pub mod code_table;
pub mod frequency;
pub mod header;
pub mod tree;

use self::bits::{Payload, pack_payload};
use self::code_table::{Code, CodeTable};
use self::frequency::FrequencyTable;
use self::header::{read_header, write_header};
use self::tree::HuffmanTree;

/// Compresses `text` with default options.
///
/// Trailing whitespace is stripped first, so that is what [`decompress`] gives back.
pub fn compress(text: &str) -> Result<Vec<u8>, HuffmanError> {
    HuffmanCoding::default().compress(text)
}

/// Restores the text of an artifact produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<String, HuffmanError> {
    if_tracing! {
        let span = span!(Level::INFO, "decompress", input_len = data.len());
        let _enter = span.enter();
    }

    let (frequencies, header_len) = read_header(data)?;
    let payload = Payload::unpack(&data[header_len..])?;
    let tree = HuffmanTree::build(&frequencies);
    let codes = CodeTable::from_tree(&tree)?;

    let text = decode_payload(&frequencies, &codes, payload).inspect_err(|_err| {
        if_tracing! {{
            warn!(target = "codec", error = %_err, "payload rejected");
        }}
    })?;

    if_tracing! {{
        info!(target = "codec", input_len = data.len(), header_len = header_len, payload_bits = payload.bit_len(), output_chars = frequencies.total(), "decompress complete");
    }}

    Ok(text)
}

/// Greedy prefix matching: extend the accumulated code one bit at a time and emit a symbol as soon
/// as it names one. Prefix-freedom makes the first match the only possible one.
fn decode_payload(frequencies: &FrequencyTable, codes: &CodeTable, payload: Payload<'_>) -> Result<String, FormatError> {
    let declared = frequencies.total();

    if codes.is_empty() {
        if payload.bit_len() > 0 {
            return Err(FormatError::UnexpectedPayload(payload.bit_len()));
        }
        return Ok(String::new());
    }

    // A lone symbol has the empty code, so its run length only lives in the header.
    if let Some(symbol) = codes.symbol(&Code::empty()) {
        if payload.bit_len() > 0 {
            return Err(FormatError::DanglingBits(payload.bit_len()));
        }
        return repeat_symbol(symbol, declared);
    }

    let mut text = String::with_capacity(declared.min(payload.bit_len() as u64) as usize);
    let mut decoded = 0u64;
    let mut current = Code::empty();
    for bit in payload.bits() {
        current = current.push(bit).ok_or(FormatError::DanglingBits(Code::MAX_LEN + 1))?;
        if let Some(symbol) = codes.symbol(&current) {
            text.push(symbol);
            decoded += 1;
            current = Code::empty();
        }
    }

    if !current.is_empty() {
        return Err(FormatError::DanglingBits(current.len()));
    }
    if decoded != declared {
        return Err(FormatError::SymbolCountMismatch { declared, decoded });
    }
    Ok(text)
}

/// Expands a single-symbol payload, reporting rather than aborting when the output can not be held.
fn repeat_symbol(symbol: char, count: u64) -> Result<String, FormatError> {
    let too_large = FormatError::OutputTooLarge { symbol, count };
    let bytes = usize::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(symbol.len_utf8()))
        .ok_or_else(|| too_large.clone())?;

    let mut text = String::new();
    text.try_reserve_exact(bytes).map_err(|_| too_large)?;
    text.extend(core::iter::repeat_n(symbol, bytes / symbol.len_utf8()));
    Ok(text)
}

/// Trailing characters dropped before compressing: Unicode whitespace plus the information
/// separators U+001C..=U+001F, which are also treated as line breaks.
fn is_trailing_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// The Huffman codec as a [`Compressor`].
#[derive(Clone, Copy, Debug)]
pub struct HuffmanCoding {
    trim_trailing_whitespace: bool,
}

impl Default for HuffmanCoding {
    fn default() -> Self {
        Self {
            trim_trailing_whitespace: true,
        }
    }
}

impl HuffmanCoding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether trailing whitespace is stripped before compressing. On by default.
    pub const fn with_trim_trailing_whitespace(mut self, trim: bool) -> Self {
        self.trim_trailing_whitespace = trim;
        self
    }

    /// The text [`compress`](Self::compress) actually encodes.
    pub fn normalize<'t>(&self, text: &'t str) -> &'t str {
        if self.trim_trailing_whitespace {
            text.trim_end_matches(is_trailing_space)
        } else {
            text
        }
    }

    /// Compresses `text`.
    ///
    /// # Errors
    ///
    /// Fails with [`HuffmanError::Capacity`] when the text can not be described by the header, in
    /// which case nothing is produced.
    pub fn compress(&self, text: &str) -> Result<Vec<u8>, HuffmanError> {
        if_tracing! {
            let span = span!(Level::INFO, "compress", input_len = text.len());
            let _enter = span.enter();
        }

        let text = self.normalize(text);
        let frequencies = FrequencyTable::count(text);
        let mut out = write_header(&frequencies)?;
        let tree = HuffmanTree::build(&frequencies);
        let codes = CodeTable::from_tree(&tree)?;

        let weighted = codes.weighted_length(&frequencies);
        let payload_bits = usize::try_from(weighted).map_err(|_| CapacityError::PayloadTooLong(weighted))?;
        out.reserve(payload_bits / 8 + 2);
        pack_payload(text.chars().filter_map(|symbol| codes.code(symbol)), payload_bits, &mut out)
            .map_err(|e| HuffmanError::BitStream(e.to_string()))?;

        if_tracing! {{
            let section_len = payload_bits / 8 + 1;
            info!(target = "codec", input_chars = frequencies.total(), distinct = frequencies.len(), header_len = out.len() - section_len, payload_bits = payload_bits, output_len = out.len(), "compress complete");
        }}

        Ok(out)
    }
}

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let text = core::str::from_utf8(data).context("huffman input must be UTF-8 text")?;
        Ok(HuffmanCoding::compress(self, text)?)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(decompress(data)?.into_bytes())
    }

    fn normalize_input<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        match core::str::from_utf8(data) {
            Ok(text) => self.normalize(text).as_bytes(),
            Err(_) => data,
        }
    }

    fn compressor_name(&self) -> String {
        "Huffman Coding".into()
    }
}

/// What an artifact contains, without decoding the payload.
#[derive(Clone, Debug, Serialize)]
pub struct ArtifactSummary {
    pub header_len: usize,
    pub payload_bits: usize,
    pub padding: u8,
    pub total_symbols: u64,
    pub symbols: Vec<SymbolSummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SymbolSummary {
    pub symbol: char,
    pub count: u64,
    pub code: String,
}

/// Parses the header and payload framing of an artifact and derives its code table.
pub fn inspect(data: &[u8]) -> Result<ArtifactSummary, HuffmanError> {
    let (frequencies, header_len) = read_header(data)?;
    let payload = Payload::unpack(&data[header_len..])?;
    let codes = CodeTable::from_tree(&HuffmanTree::build(&frequencies))?;

    let symbols = frequencies
        .iter()
        .map(|(symbol, count)| SymbolSummary {
            symbol,
            count,
            code: codes.code(symbol).map(|code| code.to_string()).unwrap_or_default(),
        })
        .collect();

    Ok(ArtifactSummary {
        header_len,
        payload_bits: payload.bit_len(),
        padding: payload.padding(),
        total_symbols: frequencies.total(),
        symbols,
    })
}
