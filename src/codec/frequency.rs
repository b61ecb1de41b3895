use std::collections::HashMap;

if_tracing! {
    use tracing::debug;
}

/// Occurrence counts of every symbol of one input.
///
/// Entries keep the order in which their symbol was first seen. That order is what the header
/// stores and what the tree builder inserts leaves in, so it decides how equal weights are broken.
/// Equality ignores it: two tables are equal when they hold the same `(symbol, count)` pairs.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    entries: Vec<(char, u64)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every character of `text`.
    pub fn count(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in text.chars() {
            match table.index.get(&symbol) {
                Some(&slot) => table.entries[slot].1 += 1,
                None => {
                    table.index.insert(symbol, table.entries.len());
                    table.entries.push((symbol, 1));
                }
            }
        }

        if_tracing! {{
            debug!(target = "frequency", input_chars = table.total(), distinct = table.len(), "frequency count complete");
        }}

        table
    }

    /// Sets the count of `symbol`, returning the previous count if it was already present.
    ///
    /// A new symbol is appended; an existing one keeps its position.
    pub fn insert(&mut self, symbol: char, count: u64) -> Option<u64> {
        if let Some(&slot) = self.index.get(&symbol) {
            return Some(core::mem::replace(&mut self.entries[slot].1, count));
        }
        self.index.insert(symbol, self.entries.len());
        self.entries.push((symbol, count));
        None
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.index.get(&symbol).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length in characters of the text this table describes.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(symbol, count)| other.get(symbol) == Some(count))
    }
}

impl Eq for FrequencyTable {}

impl FromIterator<(char, u64)> for FrequencyTable {
    /// Later duplicates of a symbol are added onto its first entry.
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            if let Some(&slot) = table.index.get(&symbol) {
                table.entries[slot].1 += count;
            } else {
                table.index.insert(symbol, table.entries.len());
                table.entries.push((symbol, count));
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_seen_order() {
        let table = FrequencyTable::count("abracadabra");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![('a', 5), ('b', 2), ('r', 2), ('c', 1), ('d', 1)]);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn counts_code_points_not_bytes() {
        let table = FrequencyTable::count("héé→");
        assert_eq!(table.get('é'), Some(2));
        assert_eq!(table.get('→'), Some(1));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_text_gives_empty_table() {
        let table = FrequencyTable::count("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn equality_ignores_order() {
        let a: FrequencyTable = [('x', 1), ('y', 2)].into_iter().collect();
        let b: FrequencyTable = [('y', 2), ('x', 1)].into_iter().collect();
        let c: FrequencyTable = [('y', 2), ('x', 3)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn insert_returns_previous_count() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.insert('q', 4), None);
        assert_eq!(table.insert('r', 1), None);
        assert_eq!(table.insert('q', 9), Some(4));
        assert_eq!(table.get('q'), Some(9));
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![('q', 9), ('r', 1)]);
    }
}
