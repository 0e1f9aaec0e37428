#![no_main]
use libfuzzer_sys::fuzz_target;
use optimal_prefix::{CodeLengthReport, FrequencyTable, HuffmanTree, Symbol};

fuzz_target!(|data: &[u8]| {
    let table = FrequencyTable::from_bytes(data);
    let tree = match HuffmanTree::build(&table) {
        Ok(tree) => tree,
        Err(_) => return,
    };

    assert_eq!(tree.len(), 2 * tree.leaf_count() - 1);
    assert!((tree.kraft_sum() - 1.0).abs() < 1e-9);

    if !data.is_empty() {
        for (symbol, id) in tree.leaves() {
            assert!(tree.depth(id) >= Some(1), "{} at depth 0", symbol);
        }
    } else {
        assert_eq!(tree.depth_of(Symbol::Sentinel), Some(0));
    }

    let report = CodeLengthReport::new(&table, &tree).unwrap();
    assert_eq!(Some(report.total_bits()), tree.weighted_path_length());
});
