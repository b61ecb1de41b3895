//! Static Huffman compression for text.
//!
//! The artifact produced by [`codec::compress`] is a frequency header followed by a padded bit
//! stream. The header carries just enough for [`codec::decompress`] to rebuild the exact same tree
//! the encoder used, so the code table itself is never stored.

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

pub mod codec;
pub mod compressor;

#[cfg(test)]
mod tests;

pub use codec::{HuffmanCoding, compress, decompress};
pub use compressor::{CapacityError, Compressor, FormatError, HuffmanError, RoundTripTestResult};
