//! Symbol alphabet and frequency counting.
//!
//! The alphabet is the 256 byte values plus one synthetic [`Symbol::Sentinel`].
//! The sentinel never occurs in input; it is always handed to the tree builder
//! with weight 0 so that a single distinct byte still gets a one-bit code.

use std::fmt;
use std::io::{ErrorKind, Read};

use crate::error::Result;

/// Number of symbols: every byte value plus the sentinel.
pub const ALPHABET_SIZE: usize = 257;

/// Dense index of the sentinel symbol.
pub const SENTINEL_INDEX: usize = 256;

/// A member of the coding alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A literal input byte.
    Byte(u8),
    /// The synthetic zero-weight symbol.
    Sentinel,
}

impl Symbol {
    /// Dense index in `0..ALPHABET_SIZE`; the sentinel sorts last.
    pub fn index(self) -> usize {
        match self {
            Symbol::Byte(b) => b as usize,
            Symbol::Sentinel => SENTINEL_INDEX,
        }
    }

    /// Inverse of [`Symbol::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=255 => Some(Symbol::Byte(index as u8)),
            SENTINEL_INDEX => Some(Symbol::Sentinel),
            _ => None,
        }
    }

    /// True for bytes in the printable ASCII range, space included.
    pub fn is_printable(self) -> bool {
        matches!(self, Symbol::Byte(b) if b == b' ' || b.is_ascii_graphic())
    }
}

/// Printable bytes render quoted (`'a'`), everything else as its octal index
/// (`12` for a newline, `400` for the sentinel).
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Byte(b) if self.is_printable() => write!(f, "'{}'", b as char),
            _ => write!(f, "{:o}", self.index()),
        }
    }
}

/// Occurrence counts for every symbol of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// An empty table: every count, including the sentinel's, is zero.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `bytes` in one pass.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        table.count_all(bytes);
        table
    }

    /// Use precomputed byte counts; the sentinel count stays 0.
    pub fn from_counts(counts: &[u64; SENTINEL_INDEX]) -> Self {
        let mut table = Self::new();
        table.counts[..SENTINEL_INDEX].copy_from_slice(counts);
        table
    }

    /// Count every byte produced by `reader` until end of stream.
    ///
    /// # Errors
    /// Returns `Error::Io` if reading fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            table.count_all(&buf[..n]);
        }
        Ok(table)
    }

    /// Add one occurrence of `byte`. Counts saturate at `u64::MAX`.
    pub fn count_byte(&mut self, byte: u8) {
        let count = &mut self.counts[byte as usize];
        *count = count.saturating_add(1);
    }

    /// Add one occurrence of each byte in `bytes`.
    pub fn count_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.count_byte(b);
        }
    }

    /// Number of occurrences of `symbol`; always 0 for the sentinel.
    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    /// Raw counts indexed by [`Symbol::index`].
    pub fn counts(&self) -> &[u64; ALPHABET_SIZE] {
        &self.counts
    }

    /// Total number of counted bytes, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Number of distinct byte values seen.
    pub fn distinct_bytes(&self) -> usize {
        self.counts[..SENTINEL_INDEX].iter().filter(|&&c| c > 0).count()
    }

    /// True if no byte has been counted.
    pub fn is_empty(&self) -> bool {
        self.distinct_bytes() == 0
    }

    /// Symbols that become leaves: every byte with a non-zero count in table
    /// order, then the sentinel, which is always present.
    pub fn present_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.counts[..SENTINEL_INDEX]
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(b, _)| Symbol::Byte(b as u8))
            .chain(std::iter::once(Symbol::Sentinel))
    }

    /// Shannon entropy of the byte distribution, in bits per byte.
    ///
    /// This is the lower bound on the average code length; 0 for empty input.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        -self
            .counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total;
                p * p.log2()
            })
            .sum::<f64>()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_bytes() {
        let table = FrequencyTable::from_bytes(b"aaab");
        assert_eq!(table.get(Symbol::Byte(b'a')), 3);
        assert_eq!(table.get(Symbol::Byte(b'b')), 1);
        assert_eq!(table.get(Symbol::Sentinel), 0);
        assert_eq!(table.total(), 4);
        assert_eq!(table.distinct_bytes(), 2);
        let present: Vec<_> = table.present_symbols().collect();
        assert_eq!(
            present,
            vec![Symbol::Byte(b'a'), Symbol::Byte(b'b'), Symbol::Sentinel]
        );
    }

    #[test]
    fn test_empty_input_keeps_sentinel() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.present_symbols().collect::<Vec<_>>(), vec![Symbol::Sentinel]);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_reader_matches_slice() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let from_reader = FrequencyTable::from_reader(&data[..]).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn test_counts_saturate() {
        let mut counts = [0u64; 256];
        counts[b'a' as usize] = u64::MAX;
        counts[b'b' as usize] = 1;
        let mut table = FrequencyTable::from_counts(&counts);
        table.count_byte(b'a');
        assert_eq!(table.get(Symbol::Byte(b'a')), u64::MAX);
        assert_eq!(table.get(Symbol::Sentinel), 0);
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_reader_interrupted_and_short_reads() {
        struct Choppy<'a> {
            data: &'a [u8],
            interrupt: bool,
        }
        impl Read for Choppy<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.interrupt = !self.interrupt;
                if self.interrupt {
                    return Err(ErrorKind::Interrupted.into());
                }
                let n = buf.len().min(3).min(self.data.len());
                buf[..n].copy_from_slice(&self.data[..n]);
                self.data = &self.data[n..];
                Ok(n)
            }
        }
        let data = b"mississippi river";
        let table = FrequencyTable::from_reader(Choppy {
            data,
            interrupt: false,
        })
        .unwrap();
        assert_eq!(table, FrequencyTable::from_bytes(data));
    }

    #[test]
    fn test_symbol_rendering() {
        assert_eq!(Symbol::Byte(b'a').to_string(), "'a'");
        assert_eq!(Symbol::Byte(b' ').to_string(), "' '");
        assert_eq!(Symbol::Byte(b'\n').to_string(), "12");
        assert_eq!(Symbol::Byte(0xff).to_string(), "377");
        assert_eq!(Symbol::Sentinel.to_string(), "400");
    }

    #[test]
    fn test_symbol_index_roundtrip() {
        for i in 0..ALPHABET_SIZE {
            assert_eq!(Symbol::from_index(i).unwrap().index(), i);
        }
        assert_eq!(Symbol::from_index(ALPHABET_SIZE), None);
    }

    #[test]
    fn test_entropy_of_uniform_pair() {
        let table = FrequencyTable::from_bytes(b"abab");
        assert!((table.entropy() - 1.0).abs() < 1e-12);
    }
}
