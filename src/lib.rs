//! # Optimal Prefix Codes
//!
//! *Huffman code lengths for byte streams, built on an explicit min-heap.*
//!
//! ## Intuition First
//!
//! Give frequent bytes short codes and rare bytes long ones. Huffman's rule for
//! doing this optimally is almost embarrassingly simple: take the two rarest
//! things, glue them together into one thing whose frequency is their sum, and
//! repeat until one thing is left. The glue steps form a binary tree; a byte's
//! code length is how far its leaf sits below the root.
//!
//! ## The Problem
//!
//! A file made of a single repeated byte has one leaf and nothing to glue, so
//! that byte would get a zero-length code, which no decoder can read. This
//! crate always adds a synthetic zero-weight **sentinel** symbol to the
//! alphabet. It is the lightest leaf, it is merged first, and so every real
//! byte ends up at depth one or more.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Kraft       Sum of 2^-len <= 1 for any prefix code
//! 1952  Huffman     Greedy merge is optimal for prefix codes
//! 1964  Williams    Binary heap (heapsort)
//! ```
//!
//! ## Mathematical Formulation
//!
//! For leaf weights $w_s$ and depths $d_s$ the tree minimizes the weighted path
//! length
//!
//! ```text
//! L = Σ_s w_s · d_s
//! ```
//!
//! over all binary prefix-code trees, and every tree it builds is full, so the
//! Kraft sum $\sum_s 2^{-d_s}$ is exactly 1.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(n \log n)$ for $n$ present symbols (each merge is two
//!   extractions and one insertion); $O(\text{input})$ for counting.
//! - **Space**: $2n - 1$ nodes in one arena.
//!
//! ## Failure Modes
//!
//! 1. **Ties**: equal weights may merge in either order. Different tie
//!    resolutions give different trees with the same optimal $L$.
//! 2. **Long codes**: skewed (Fibonacci-like) counts produce deep trees; no
//!    length limit is applied here.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`pqueue`]: a binary min-heap with a caller-supplied comparator.
//! - [`frequency`]: the 257-symbol alphabet and its counts.
//! - [`tree`]: the greedy builder, arena-backed with upward parent links.
//! - [`report`]: per-symbol `count * depth` costs and their total.
//!
//! ```
//! use optimal_prefix::{CodeLengthReport, FrequencyTable, HuffmanTree, Symbol};
//!
//! let table = FrequencyTable::from_bytes(b"aaab");
//! let tree = HuffmanTree::build(&table)?;
//! assert_eq!(tree.depth_of(Symbol::Byte(b'a')), Some(1));
//!
//! let report = CodeLengthReport::new(&table, &tree)?;
//! assert_eq!(report.total_bits(), 5);
//! # Ok::<(), optimal_prefix::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cormen, T. H., et al. "Introduction to Algorithms", ch. 6 (Heapsort) and 16.3 (Huffman codes).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod frequency;
pub mod pqueue;
pub mod report;
pub mod tree;

pub use error::{Error, Result};
pub use frequency::{FrequencyTable, Symbol, ALPHABET_SIZE, SENTINEL_INDEX};
pub use pqueue::{Comparator, PriorityQueue};
pub use report::{CodeLengthReport, ReportEntry};
pub use tree::{HuffmanTree, Node, NodeId, NodeKind};
