use voxell_rng::rng::XorShift128;

use crate::compressor::Compressor;

const SHORT_DATA: &str = "Hello, World!";
const LONG_DATA: &str =
    "This is a longer string to test the huffman coding algorithm. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &str = "a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const MULTILINGUAL_DATA: &str = "Grüße, 世界! Ελληνικά καὶ русский текст 🦀🦀 ünïcödé\n\tsecond line";
const SINGLE_SYMBOL_DATA: &str = "zzzzzzzzzzzzzzzzzzzzzzz";
const TRAILING_WHITESPACE_DATA: &str = "   leading stays, trailing goes \n\t \r\n\u{1f}";
const EMPTY_DATA: &str = "";

const TEST_CASES: &[(&str, &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (MULTILINGUAL_DATA, "multilingual data"),
    (SINGLE_SYMBOL_DATA, "single symbol data"),
    (TRAILING_WHITESPACE_DATA, "trailing whitespace data"),
    (EMPTY_DATA, "empty data"),
];

/// Pseudo-random text over a skewed alphabet, so that code lengths differ.
fn rng_data() -> String {
    const ALPHABET: &[char] = &['e', 't', 'a', 'o', ' ', 'n', 'é', 'ß', '字', '\n', 'q', '🦀'];
    let mut rng = XorShift128::new(0xdeadcafe);
    let mut text = String::with_capacity(4000);
    for _ in 0..1000 {
        let value = rng.peek_next_u64();
        // squaring the fraction biases towards the front of the alphabet
        let fraction = (value & 0xFFFF) as f64 / 65536.0;
        text.push(ALPHABET[(fraction * fraction * ALPHABET.len() as f64) as usize]);
        rng = XorShift128::new(value);
    }
    text
}

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    let rng_text = rng_data();
    let cases = TEST_CASES.iter().copied().chain([(rng_text.as_str(), "rng data")]);

    for (test_case, test_name) in cases {
        match compressor.test_roundtrip(test_case.as_bytes()) {
            Ok(eq) => {
                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    compressor.compressor_name(),
                    eq.ratio() * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    compressor.compressor_name(),
                    test_name,
                    String::from_utf8_lossy(compressor.normalize_input(eq.get_original())),
                    String::from_utf8_lossy(eq.get_decompressed()),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {}",
                    test_name,
                    compressor.compressor_name(),
                    e
                );
            }
        }
    }
}
