//! This helper function is part of the huffman encoding system.
//!
//! It turns symbol weights into code lengths with the classic Huffman construction. No length
//! limit is applied. Instead of a tree of boxed nodes, the merge history is recorded in a flat
//! parent array indexed by node id, and each leaf's length is found by counting the hops up to
//! the root.
//!
//! Node ids: leaves are `m..2m`, internal nodes are handed out downwards from `m - 1`, and the
//! root always ends up as node 1.
//!

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Return the Huffman code length of every entry in `weights`. Zero weights are allowed and
/// produce the longest codes.
pub fn code_lengths(weights: &[u64]) -> Vec<u32> {
    let m = weights.len();
    match m {
        0 => return vec![],
        1 => return vec![1],
        _ => {}
    }

    // parent[id] is the node that absorbed id
    let mut parent = vec![0_usize; 2 * m];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| Reverse((w, m + i)))
        .collect();

    // Pop the two lightest nodes and merge them until only the root is left
    let mut next_id = m;
    while let (Some(Reverse((wa, a))), Some(Reverse((wb, b)))) = (heap.pop(), heap.pop()) {
        next_id -= 1;
        parent[a] = next_id;
        parent[b] = next_id;
        heap.push(Reverse((wa.saturating_add(wb), next_id)));
        if heap.len() == 1 {
            break;
        }
    }

    (0..m)
        .map(|i| {
            let mut node = parent[m + i];
            let mut len = 1;
            while node > 1 {
                node = parent[node];
                len += 1;
            }
            len
        })
        .collect()
}
