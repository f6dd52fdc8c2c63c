//! Shared helpers for the accumulator tests.

use crate::{Caller, Hash, InsertPolicy, MerkleTreeState, Pubkey, TreeParams, combine, leaf_hash};

pub(crate) const AUTHORITY: Pubkey = [0xAA; 32];
pub(crate) const STRANGER: Pubkey = [0xBB; 32];

/// A deterministic, distinct leaf per index.
pub(crate) fn test_leaf(index: u32) -> Hash {
    *blake3::hash(&index.to_be_bytes()).as_bytes()
}

pub(crate) fn authority() -> Caller {
    Caller::signer(AUTHORITY)
}

/// A freshly initialized tree with the given capacity.
pub(crate) fn new_tree(max_leaves: u32, policy: InsertPolicy) -> MerkleTreeState {
    let params = TreeParams::new(max_leaves).expect("valid params");
    let mut slot = None;
    MerkleTreeState::initialize(&mut slot, &authority(), params, policy).expect("initialize");
    slot.expect("slot filled by initialize")
}

/// A tree with `count` test leaves already inserted.
pub(crate) fn filled_tree(max_leaves: u32, count: u32) -> MerkleTreeState {
    let mut tree = new_tree(max_leaves, InsertPolicy::AnySigner);
    for i in 0..count {
        tree.insert_leaf(&test_leaf(i), &authority())
            .value
            .expect("insert");
    }
    tree
}

/// Fold an authentication path back up to a root.
pub(crate) fn fold_path(leaf: &Hash, index: u32, path: &[Hash]) -> Hash {
    let mut node = leaf_hash(leaf);
    let mut position = index;
    for sibling in path {
        node = if position & 1 == 0 {
            parent(&node, sibling)
        } else {
            parent(sibling, &node)
        };
        position >>= 1;
    }
    node
}

fn parent(left: &Hash, right: &Hash) -> Hash {
    if *left == [0u8; 32] && *right == [0u8; 32] {
        [0u8; 32]
    } else {
        combine(left, right)
    }
}
