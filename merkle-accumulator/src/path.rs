//! Full-tree computations over the stored leaves.
//!
//! These rebuild every level from scratch and cost `O(capacity)`; the
//! incremental path through [`Frontier`](crate::Frontier) is what inserts use.

use accumulator_costs::{CostContext, CostsExt, OperationCost};

use crate::{
    AccumulatorError, TreeParams,
    hash::{EMPTY_HASH, Hash, leaf_hash, parent_hash},
};

/// Root of a tree with `params` holding `leaves`, computed level by level.
///
/// Agrees bit for bit with the root maintained incrementally by inserts.
pub fn compute_root_from_leaves(params: &TreeParams, leaves: &[Hash]) -> CostContext<Hash> {
    let mut cost = OperationCost::default();
    let mut layer = leaf_layer(leaves, &mut cost);
    for _ in 0..params.depth() {
        layer = next_layer(&layer, &mut cost);
    }
    layer
        .first()
        .copied()
        .unwrap_or(EMPTY_HASH)
        .wrap_with_cost(cost)
}

/// Sibling hashes on the way from leaf `index` to the root.
pub(crate) fn authentication_path(
    depth: u8,
    leaves: &[Hash],
    index: u32,
) -> Result<Vec<Hash>, AccumulatorError> {
    if index as usize >= leaves.len() {
        return Err(AccumulatorError::LeafIndexOutOfRange {
            index,
            leaf_count: leaves.len() as u32,
        });
    }

    let mut cost = OperationCost::default();
    let mut layer = leaf_layer(leaves, &mut cost);
    let mut position = index as usize;
    let mut path = Vec::with_capacity(depth as usize);
    for _ in 0..depth {
        path.push(layer.get(position ^ 1).copied().unwrap_or(EMPTY_HASH));
        layer = next_layer(&layer, &mut cost);
        position >>= 1;
    }
    Ok(path)
}

fn leaf_layer(leaves: &[Hash], cost: &mut OperationCost) -> Vec<Hash> {
    cost.hash_node_calls += leaves.len() as u32;
    leaves.iter().map(leaf_hash).collect()
}

fn next_layer(layer: &[Hash], cost: &mut OperationCost) -> Vec<Hash> {
    layer
        .chunks(2)
        .map(|pair| {
            let right = pair.get(1).unwrap_or(&EMPTY_HASH);
            parent_hash(&pair[0], right).unwrap_add_cost(cost)
        })
        .collect()
}
