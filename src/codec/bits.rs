//! Bit packing for the payload section.
//!
//! The section is one byte holding the padding count `p`, followed by the code bits packed most
//! significant bit first, followed by `p` zero bits. `p = 8 - (bits % 8)`, so it is never zero: a
//! bit count that is already a multiple of 8 gets a whole byte of padding.

use std::io::{self, Cursor};

use arcode::bitbit::{BitReader, BitWriter, MSB};

use crate::codec::code_table::Code;
use crate::compressor::FormatError;

/// Appends the payload section for `codes` to `out`.
///
/// `payload_bits` must be the total length of `codes`; the padding count is written before the
/// first code, so it has to be known up front.
pub fn pack_payload<I>(codes: I, payload_bits: usize, out: &mut Vec<u8>) -> io::Result<()>
where
    I: IntoIterator<Item = Code>,
{
    let padding = 8 - (payload_bits % 8) as u8;
    out.push(padding);
    let start = out.len();

    let mut written = 0usize;
    {
        let mut cursor = Cursor::new(&mut *out);
        cursor.set_position(start as u64);
        let mut writer = BitWriter::new(cursor);
        for code in codes {
            for bit in code.bits() {
                writer.write_bit(bit)?;
            }
            written += code.len();
        }
        writer.pad_to_byte()?;
    }

    if written != payload_bits {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("codes hold {written} bits, {payload_bits} were announced"),
        ));
    }

    // a payload ending on a byte boundary still carries a whole padding byte
    out.resize(start + payload_bits / 8 + 1, 0);
    Ok(())
}

/// The code bits of a payload section with framing and padding removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payload<'a> {
    data: &'a [u8],
    bit_len: usize,
    padding: u8,
}

impl<'a> Payload<'a> {
    /// Splits off the padding count and strips that many bits from the end.
    pub fn unpack(section: &'a [u8]) -> Result<Self, FormatError> {
        let Some((&padding, data)) = section.split_first() else {
            return Err(FormatError::MissingPadding);
        };
        let total = data.len() * 8;
        if padding == 0 || padding > 8 || usize::from(padding) > total {
            return Err(FormatError::InvalidPadding {
                padding,
                payload_bits: total,
            });
        }

        Ok(Self {
            data,
            bit_len: total - usize::from(padding),
            padding,
        })
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + 'a {
        let mut reader = BitReader::<_, MSB>::new(self.data);
        (0..self.bit_len).map_while(move |_| reader.read_bit().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(bits: &str) -> Code {
        bits.chars().fold(Code::empty(), |code, bit| code.push(bit == '1').unwrap())
    }

    fn write(bits: &str) -> Vec<u8> {
        let mut out = Vec::new();
        pack_payload(bits.chars().map(|bit| code(&bit.to_string())), bits.len(), &mut out).unwrap();
        out
    }

    fn read(section: &[u8]) -> String {
        Payload::unpack(section)
            .unwrap()
            .bits()
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn partial_byte_is_padded_with_zeros() {
        assert_eq!(write("101"), vec![5, 0b1010_0000]);
        assert_eq!(write("1111111110"), vec![6, 0xFF, 0b1000_0000]);
    }

    #[test]
    fn whole_bytes_get_a_full_padding_byte() {
        assert_eq!(write("10000001"), vec![8, 0b1000_0001, 0]);
        assert_eq!(write(""), vec![8, 0]);
    }

    #[test]
    fn appends_after_existing_bytes() {
        let mut out = vec![0xAB, 0xCD];
        pack_payload([code("10"), code("0111")], 6, &mut out).unwrap();
        assert_eq!(out, vec![0xAB, 0xCD, 2, 0b1001_1100]);
    }

    #[test]
    fn rejects_a_wrong_bit_count() {
        let mut out = Vec::new();
        assert!(pack_payload([code("101")], 4, &mut out).is_err());
    }

    #[test]
    fn unpack_strips_padding_from_the_end() {
        assert_eq!(read(&[5, 0b1010_0000]), "101");
        assert_eq!(read(&[8, 0b1000_0001, 0]), "10000001");
        assert_eq!(read(&[8, 0]), "");

        let payload = Payload::unpack(&[6, 0xFF, 0b1000_0000]).unwrap();
        assert_eq!(payload.padding(), 6);
        assert_eq!(payload.bit_len(), 10);
    }

    #[test]
    fn section_length_is_always_whole_bytes_with_padding_in_range() {
        for len in 0..40 {
            let bits: String = (0..len).map(|i| if i % 3 == 0 { '1' } else { '0' }).collect();
            let section = write(&bits);
            let padding = section[0] as usize;
            assert!((1..=8).contains(&padding));
            assert_eq!((section.len() - 1) * 8, len + padding);
            assert_eq!(read(&section), bits);
        }
    }

    #[test]
    fn rejects_bad_framing() {
        assert_eq!(Payload::unpack(&[]), Err(FormatError::MissingPadding));
        assert_eq!(
            Payload::unpack(&[3]),
            Err(FormatError::InvalidPadding { padding: 3, payload_bits: 0 })
        );
        assert_eq!(
            Payload::unpack(&[0, 0xAA]),
            Err(FormatError::InvalidPadding { padding: 0, payload_bits: 8 })
        );
        assert_eq!(
            Payload::unpack(&[9, 0, 0]),
            Err(FormatError::InvalidPadding { padding: 9, payload_bits: 16 })
        );
    }
}
