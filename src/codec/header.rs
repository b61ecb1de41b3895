//! The frequency header.
//!
//! ```text
//! [u16 BE: symbol count N]
//! N times:
//!     [u8: UTF-8 length L] [L bytes: symbol] [u32 BE: count]
//! ```
//!
//! Entries are written in table order, which the decoder preserves when it rebuilds the table.

use crate::codec::frequency::FrequencyTable;
use crate::compressor::{CapacityError, FormatError};

if_tracing! {
    use tracing::{debug, warn};
}

pub const MAX_SYMBOLS: usize = u16::MAX as usize;
pub const MAX_SYMBOL_LEN: usize = u8::MAX as usize;

/// Serializes `table`. Every entry is checked against the format limits before anything is written.
pub fn write_header(table: &FrequencyTable) -> Result<Vec<u8>, CapacityError> {
    check_capacity(table)?;

    let mut out = Vec::with_capacity(2 + table.len() * (1 + 4 + 4));
    out.extend_from_slice(&(table.len() as u16).to_be_bytes());
    let mut utf8 = [0u8; 4];
    for (symbol, count) in table.iter() {
        let encoded = symbol.encode_utf8(&mut utf8).as_bytes();
        out.push(encoded.len() as u8);
        out.extend_from_slice(encoded);
        out.extend_from_slice(&(count as u32).to_be_bytes());
    }

    if_tracing! {{
        debug!(target = "header", symbols = table.len(), header_len = out.len(), "header written");
    }}

    Ok(out)
}

fn check_capacity(table: &FrequencyTable) -> Result<(), CapacityError> {
    if table.len() > MAX_SYMBOLS {
        return Err(CapacityError::TooManySymbols(table.len()));
    }
    for (symbol, count) in table.iter() {
        if symbol.len_utf8() > MAX_SYMBOL_LEN {
            return Err(CapacityError::SymbolTooLong {
                symbol,
                len: symbol.len_utf8(),
            });
        }
        if u32::try_from(count).is_err() {
            return Err(CapacityError::CountTooLarge { symbol, count });
        }
    }
    Ok(())
}

/// Parses a header from the front of `data`.
///
/// Returns the table and the number of bytes the header spans; the payload section starts there.
pub fn read_header(data: &[u8]) -> Result<(FrequencyTable, usize), FormatError> {
    if data.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut reader = HeaderReader { data, offset: 0 };
    let symbols = u16::from_be_bytes(reader.array("symbol count")?);
    let mut table = FrequencyTable::new();

    for _ in 0..symbols {
        let [len] = reader.array::<1>("symbol length")?;
        let symbol_offset = reader.offset;
        let bytes = reader.take(usize::from(len), "symbol")?;
        let text = core::str::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8 { offset: symbol_offset })?;
        let mut chars = text.chars();
        let (Some(symbol), None) = (chars.next(), chars.next()) else {
            return Err(FormatError::NotASingleSymbol {
                offset: symbol_offset,
                found: text.to_owned(),
            });
        };

        let count = u32::from_be_bytes(reader.array("frequency")?);
        if count == 0 {
            return Err(FormatError::ZeroCount(symbol));
        }
        if table.insert(symbol, u64::from(count)).is_some() {
            return Err(FormatError::DuplicateSymbol(symbol));
        }
    }

    if_tracing! {{
        debug!(target = "header", symbols = table.len(), header_len = reader.offset, "header read");
    }}

    Ok((table, reader.offset))
}

struct HeaderReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> HeaderReader<'a> {
    fn take(&mut self, needed: usize, what: &'static str) -> Result<&'a [u8], FormatError> {
        let remaining = self.data.len() - self.offset;
        if needed > remaining {
            if_tracing! {{
                warn!(target = "header", what = what, offset = self.offset, needed = needed, remaining = remaining, "header truncated");
            }}
            return Err(FormatError::Truncated {
                what,
                offset: self.offset,
                needed,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }
}
