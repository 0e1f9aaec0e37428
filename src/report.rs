//! Per-symbol code lengths and bit costs.
//!
//! The report is what a packer has to reproduce: for every leaf, the symbol's
//! count, its code length, and `count * depth` bits. The `Display` form is one
//! line per symbol:
//!
//! ```text
//! 'a' : 3 * 1 = 3 bits.
//! 'b' : 1 * 2 = 2 bits.
//! 400 : 0 * 2 = 0 bits.
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::HuffmanTree;

/// One line of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEntry {
    /// The coded symbol.
    pub symbol: Symbol,
    /// Occurrences in the input.
    pub count: u64,
    /// Code length in bits.
    pub depth: usize,
    /// `count * depth`.
    pub bits: u64,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} * {} = {} bits.",
            self.symbol, self.count, self.depth, self.bits
        )
    }
}

/// Code lengths for every leaf of a tree, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLengthReport {
    entries: Vec<ReportEntry>,
    total_bits: u64,
    input_len: u64,
}

impl CodeLengthReport {
    /// Walk each leaf of `tree` up to the root and cost it against `table`.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` if a present symbol has no leaf or
    /// a leaf's weight differs from the table's count, and
    /// `Error::BitCountOverflow` if a bit count does not fit in `u64`.
    pub fn new(table: &FrequencyTable, tree: &HuffmanTree) -> Result<Self> {
        let mut entries = Vec::with_capacity(tree.leaf_count());
        let mut total_bits = 0u64;
        for symbol in table.present_symbols() {
            let leaf = tree.leaf(symbol).ok_or_else(|| {
                Error::InvariantViolation(format!("symbol {} has no leaf", symbol))
            })?;
            let count = table.get(symbol);
            let weight = tree.node(leaf).map(|n| n.weight());
            if weight != Some(count) {
                return Err(Error::InvariantViolation(format!(
                    "leaf for {} weighs {:?}, table counts {}",
                    symbol, weight, count
                )));
            }
            let depth = tree.depth(leaf).ok_or_else(|| {
                Error::InvariantViolation(format!("leaf for {} is not in the tree", symbol))
            })?;
            let bits = count.checked_mul(depth as u64).ok_or_else(|| {
                Error::BitCountOverflow(format!("{} * {} for {}", count, depth, symbol))
            })?;
            total_bits = total_bits.checked_add(bits).ok_or_else(|| {
                Error::BitCountOverflow(format!("total exceeds {} bits", u64::MAX))
            })?;
            entries.push(ReportEntry {
                symbol,
                count,
                depth,
                bits,
            });
        }
        if entries.len() != tree.leaf_count() {
            return Err(Error::InvariantViolation(format!(
                "tree has {} leaves, table has {} symbols",
                tree.leaf_count(),
                entries.len()
            )));
        }
        Ok(Self {
            entries,
            total_bits,
            input_len: table.total(),
        })
    }

    /// Entries in table order, sentinel last.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Number of reported symbols, sentinel included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the sentinel is always reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Σ count × depth: the encoded payload length in bits.
    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    /// Mean code length per input byte; 0 for empty input.
    pub fn average_code_length(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.total_bits() as f64 / self.input_len as f64
    }
}

impl fmt::Display for CodeLengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
