use core::fmt;
use std::collections::HashMap;

use crate::codec::frequency::FrequencyTable;
use crate::codec::tree::{HuffmanNode, HuffmanTree};
use crate::compressor::CapacityError;

if_tracing! {
    use tracing::debug;
}

/// A variable-length code of at most [`Code::MAX_LEN`] bits.
///
/// Bits are kept right-aligned in `bits`; the first bit of the code is the most significant of the
/// `len` low bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    pub const MAX_LEN: usize = 128;

    pub const fn empty() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Appends one bit, or returns `None` if the code is already [`Code::MAX_LEN`] long.
    pub const fn push(self, bit: bool) -> Option<Self> {
        if self.len as usize == Self::MAX_LEN {
            return None;
        }
        Some(Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        })
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits in transmission order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(|shift| (self.bits >> shift) & 1 == 1)
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        // the empty code would need a full-width shift
        self.is_empty() || other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Bidirectional mapping between symbols and their codes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<char, Code>,
    symbols: HashMap<Code, char>,
}

impl CodeTable {
    /// Walks the tree depth first, appending `0` for every left branch and `1` for every right one.
    ///
    /// A tree whose root is a leaf assigns that symbol the empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self, CapacityError> {
        let mut table = Self::default();
        let Some(root) = tree.root() else {
            return Ok(table);
        };

        let mut stack = vec![(root, Code::empty())];
        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                HuffmanNode::Leaf { symbol, .. } => {
                    table.codes.insert(symbol, code);
                    table.symbols.insert(code, symbol);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let (Some(left_code), Some(right_code)) = (code.push(false), code.push(true)) else {
                        return Err(CapacityError::CodeTooLong(code.len() + 1));
                    };
                    // right goes on the stack first so the left subtree is visited first
                    stack.push((right, right_code));
                    stack.push((left, left_code));
                }
            }
        }

        if_tracing! {{
            debug!(target = "code_table", symbols = table.len(), max_len = table.max_len(), "code table derived");
        }}

        Ok(table)
    }

    pub fn code(&self, symbol: char) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    pub fn symbol(&self, code: &Code) -> Option<char> {
        self.symbols.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Code)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Number of payload bits the text described by `frequencies` encodes to.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.code(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(bits: &str) -> Code {
        bits.chars().fold(Code::empty(), |code, bit| code.push(bit == '1').unwrap())
    }

    fn table_for(text: &str) -> CodeTable {
        CodeTable::from_tree(&HuffmanTree::build(&FrequencyTable::count(text))).unwrap()
    }

    #[test]
    fn codes_for_aaabbc() {
        let table = table_for("aaabbc");
        assert_eq!(table.code('a'), Some(code("0")));
        assert_eq!(table.code('c'), Some(code("10")));
        assert_eq!(table.code('b'), Some(code("11")));
        assert_eq!(table.symbol(&code("10")), Some('c'));
        assert_eq!(table.symbol(&code("1")), None);
        assert_eq!(table.weighted_length(&FrequencyTable::count("aaabbc")), 9);
    }

    #[test]
    fn single_symbol_gets_empty_code() {
        let table = table_for("zzzz");
        assert_eq!(table.len(), 1);
        assert_eq!(table.code('z'), Some(Code::empty()));
        assert_eq!(table.symbol(&Code::empty()), Some('z'));
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn empty_tree_gives_empty_table() {
        let table = table_for("");
        assert!(table.is_empty());
    }

    #[test]
    fn code_display_and_prefix() {
        let short = code("10");
        let long = code("1011");
        assert_eq!(long.to_string(), "1011");
        assert_eq!(Code::empty().to_string(), "");
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(!code("11").is_prefix_of(&long));
        assert!(Code::empty().is_prefix_of(&short));
    }

    #[test]
    fn code_push_stops_at_max_len() {
        let mut full = Code::empty();
        for _ in 0..Code::MAX_LEN {
            full = full.push(true).unwrap();
        }
        assert_eq!(full.len(), Code::MAX_LEN);
        assert_eq!(full.push(false), None);
    }

    #[test]
    fn no_code_is_prefix_of_another() {
        let table = table_for("the quick brown fox jumps over the lazy dog, twice: the quick brown fox");
        let codes: Vec<Code> = table.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }
}
