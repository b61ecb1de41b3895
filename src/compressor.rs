pub use anyhow::Result;
use thiserror::Error;

/// Represents an error emitted by the Huffman codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    /// Input given to the decompressor was malformed, truncated, or otherwise impossible to decode.
    #[error("input data was malformed, and could not be decoded: {0}")]
    Format(#[from] FormatError),

    /// Input given to the compressor can not be represented in the artifact format.
    ///
    /// Raised before any output is produced.
    #[error("input data exceeds the capacity of the artifact format: {0}")]
    Capacity(#[from] CapacityError),

    /// Writing the packed payload failed.
    #[error("bit stream error: {0}")]
    BitStream(String),
}

/// Ways an artifact can fail to decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("artifact is empty")]
    Empty,

    #[error("unexpected end of data while reading {what} at offset {offset}: needed {needed} bytes, {remaining} remain")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("symbol at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("symbol at offset {offset} must be exactly one character, found {found:?}")]
    NotASingleSymbol { offset: usize, found: String },

    #[error("symbol {0:?} is declared more than once")]
    DuplicateSymbol(char),

    #[error("symbol {0:?} is declared with a count of zero")]
    ZeroCount(char),

    #[error("padding byte is missing")]
    MissingPadding,

    #[error("padding count {padding} is invalid for a payload of {payload_bits} bits")]
    InvalidPadding { padding: u8, payload_bits: usize },

    #[error("payload carries {0} bits but the header declares no symbols")]
    UnexpectedPayload(usize),

    #[error("payload ends with {0} bits that do not form a complete code")]
    DanglingBits(usize),

    #[error("{count} repetitions of {symbol:?} do not fit in memory")]
    OutputTooLarge { symbol: char, count: u64 },

    #[error("decoded {decoded} symbols but the header declares {declared}")]
    SymbolCountMismatch { declared: u64, decoded: u64 },
}

/// Limits of the artifact format that an input can exceed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("{0} distinct symbols exceed the header limit of 65535")]
    TooManySymbols(usize),

    #[error("symbol {symbol:?} takes {len} bytes as UTF-8, the header limit is 255")]
    SymbolTooLong { symbol: char, len: usize },

    #[error("symbol {symbol:?} occurs {count} times, the header limit is 4294967295")]
    CountTooLarge { symbol: char, count: u64 },

    #[error("payload of {0} bits is too long for this platform")]
    PayloadTooLong(u64),

    #[error("tree depth {0} exceeds the maximum code length of 128 bits")]
    CodeTooLong(usize),
}

/// Represents shared behavior for all compressors.
///
/// Provides a method [`compress_bytes`](Compressor::compress_bytes) to compress data and
/// [`decompress_bytes`](Compressor::decompress_bytes) to decompress data.
///
/// # Note
///
/// No guarantees are made about the length of the resulting [`Vec<u8>`] from
/// [`compress_bytes`](Compressor::compress_bytes). It can be shorter, equal in length, or longer.
/// The only guarantee is that [`decompress_bytes`](Compressor::decompress_bytes) will be able to
/// reconstruct the original data, after any normalization the compressor applies to its input.
pub trait Compressor: 'static {
    /// Compresses a given byte slice and returns the encoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input can not be represented by the compressor's format.
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses a given byte slice and returns the decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input data was malformed.
    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Human readable name, used in reports.
    fn compressor_name(&self) -> String;

    /// The part of `data` a round trip is expected to reproduce.
    ///
    /// Defaults to all of it. Compressors that normalize their input first return the normalized form.
    fn normalize_input<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        data
    }

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the compressor and decompressor.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let compressed = <Self as Compressor>::compress_bytes(self, data)?;
        let decompressed = <Self as Compressor>::decompress_bytes(self, &compressed)?;
        let equal = <Self as Compressor>::normalize_input(self, data) == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original data`][RoundTripTestResult::get_original],
/// the [`compressed data`][RoundTripTestResult::get_compressed],
/// and the [`decompressed data`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the decompressed data matched the (normalized) original.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original data before any action was taken.
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// The data after it has been encoded by the compressor.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// The data after it has been decoded by the decompressor.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }

    /// Compressed length over original length. Zero for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original.is_empty() {
            return 0.0;
        }
        self.compressed.len() as f64 / self.original.len() as f64
    }
}
