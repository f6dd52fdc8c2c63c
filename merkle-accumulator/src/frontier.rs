use accumulator_costs::{
    CostContext, CostResult, CostsExt, OperationCost, cost_return_on_error_no_add,
};
use bincode::{Decode, Encode};

use crate::{
    AccumulatorError,
    hash::{EMPTY_HASH, Hash, parent_hash},
};

/// Right edge of an append-only Merkle tree.
///
/// Slot `i` holds the root of the most recent complete subtree of `2^i`
/// leaves that is still waiting for its right sibling. The number of slots is
/// the tree depth and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Frontier {
    slots: Vec<Option<Hash>>,
}

impl Frontier {
    /// A frontier with `depth` empty slots.
    pub fn empty(depth: u8) -> Self {
        Self {
            slots: vec![None; depth as usize],
        }
    }

    /// Number of levels.
    pub fn depth(&self) -> u8 {
        self.slots.len() as u8
    }

    /// Carried hash at `level`, if any.
    pub fn slot(&self, level: u8) -> Option<&Hash> {
        self.slots.get(level as usize).and_then(Option::as_ref)
    }

    /// All slots, lowest level first.
    pub fn slots(&self) -> &[Option<Hash>] {
        &self.slots
    }

    /// True when no level carries a hash.
    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Fold the hash of the leaf at position `index` into the frontier and
    /// return the new root.
    ///
    /// `index` is the number of leaves appended before this one. It must be
    /// below `2^depth`, and every level where `index` has a set bit must carry
    /// a left sibling; otherwise nothing is changed and
    /// [`AccumulatorError::CorruptedState`] is returned.
    ///
    /// While the node is a right child it is merged with the carried left
    /// sibling and climbs; the first time it is a left child it is carried at
    /// that level. A node that climbs past the top level is the root of a
    /// completely filled tree, and the frontier is left clear.
    pub fn append(&mut self, leaf_hash: Hash, index: u64) -> CostResult<Hash, AccumulatorError> {
        let mut cost = OperationCost::default();
        cost_return_on_error_no_add!(cost, self.check_position(index));

        let mut current = leaf_hash;
        let mut index = index;
        for level in 0..self.slots.len() {
            if index & 1 == 0 {
                self.slots[level] = Some(current);
                return Ok(self.root().unwrap_add_cost(&mut cost)).wrap_with_cost(cost);
            }
            let left = self.slots[level].take().unwrap_or(EMPTY_HASH);
            current = parent_hash(&left, &current).unwrap_add_cost(&mut cost);
            index >>= 1;
        }

        Ok(current).wrap_with_cost(cost)
    }

    /// Reject a position the frontier cannot hold or whose left siblings are
    /// not carried.
    fn check_position(&self, index: u64) -> Result<(), AccumulatorError> {
        let depth = self.slots.len() as u32;
        if index >> depth != 0 {
            return Err(AccumulatorError::CorruptedState(format!(
                "leaf position {} does not fit a frontier of depth {}",
                index, depth
            )));
        }
        let mut position = index;
        for (level, slot) in self.slots.iter().enumerate() {
            if position & 1 == 0 {
                break;
            }
            if slot.is_none() {
                return Err(AccumulatorError::CorruptedState(format!(
                    "no carried sibling at level {} for leaf position {}",
                    level, index
                )));
            }
            position >>= 1;
        }
        Ok(())
    }

    /// Root of the tree described by this frontier, padding every missing
    /// right sibling with an empty subtree.
    ///
    /// Only meaningful while the tree is not completely filled; a full tree's
    /// root is the value returned by the [`append`](Self::append) that filled
    /// it.
    pub fn root(&self) -> CostContext<Hash> {
        let mut cost = OperationCost::default();
        let mut acc = EMPTY_HASH;
        for slot in &self.slots {
            acc = match slot {
                Some(left) => parent_hash(left, &acc),
                None => parent_hash(&acc, &EMPTY_HASH),
            }
            .unwrap_add_cost(&mut cost);
        }
        acc.wrap_with_cost(cost)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{combine, leaf_hash};

    fn h(byte: u8) -> Hash {
        leaf_hash(&[byte; 32])
    }

    #[test]
    fn empty_frontier_root_is_sentinel() {
        let frontier = Frontier::empty(5);
        let ctx = frontier.root();
        assert_eq!(ctx.value, EMPTY_HASH);
        assert_eq!(ctx.cost.hash_node_calls, 0);
        assert!(frontier.is_clear());
        assert_eq!(frontier.depth(), 5);
    }

    #[test]
    fn carries_and_merges_by_position() {
        let mut frontier = Frontier::empty(2);

        let root1 = frontier.append(h(1), 0).value.expect("append 0");
        assert_eq!(frontier.slot(0), Some(&h(1)));
        assert_eq!(frontier.slot(1), None);
        assert_eq!(root1, combine(&combine(&h(1), &EMPTY_HASH), &EMPTY_HASH));

        let root2 = frontier.append(h(2), 1).value.expect("append 1");
        let pair = combine(&h(1), &h(2));
        assert_eq!(frontier.slot(0), None);
        assert_eq!(frontier.slot(1), Some(&pair));
        assert_eq!(root2, combine(&pair, &EMPTY_HASH));

        let root3 = frontier.append(h(3), 2).value.expect("append 2");
        assert_eq!(frontier.slot(0), Some(&h(3)));
        assert_eq!(root3, combine(&pair, &combine(&h(3), &EMPTY_HASH)));

        // fourth leaf fills a depth-2 tree and climbs out of the frontier
        let root4 = frontier.append(h(4), 3).value.expect("append 3");
        assert!(frontier.is_clear());
        assert_eq!(root4, combine(&pair, &combine(&h(3), &h(4))));
    }

    #[test]
    fn append_costs_one_hash_per_level() {
        let mut frontier = Frontier::empty(5);
        for index in 0..30u64 {
            let ctx = frontier.append(h(index as u8), index);
            assert!(ctx.value.is_ok());
            assert_eq!(ctx.cost.hash_node_calls, 5, "index {}", index);
        }
    }

    #[test]
    fn rejects_position_without_carried_sibling() {
        let mut frontier = Frontier::empty(2);
        let before = frontier.clone();

        let ctx = frontier.append(h(1), 1);
        assert_matches!(ctx.value, Err(AccumulatorError::CorruptedState(_)));
        assert_eq!(ctx.cost.hash_node_calls, 0);
        assert_eq!(frontier, before);

        // slot 0 carried but slot 1 missing for position 3
        frontier.append(h(1), 0).value.expect("append 0");
        let before = frontier.clone();
        assert_matches!(
            frontier.append(h(2), 3).value,
            Err(AccumulatorError::CorruptedState(_))
        );
        assert_eq!(frontier, before);
    }

    #[test]
    fn rejects_position_past_capacity() {
        let mut frontier = Frontier::empty(2);
        for index in 0..4u64 {
            frontier.append(h(index as u8), index).value.expect("within capacity");
        }
        assert!(frontier.is_clear());

        let ctx = frontier.append(h(5), 4);
        assert_matches!(ctx.value, Err(AccumulatorError::CorruptedState(_)));
        assert!(frontier.is_clear());

        let mut fresh = Frontier::empty(2);
        assert_matches!(
            fresh.append(h(5), 4).value,
            Err(AccumulatorError::CorruptedState(_))
        );
        assert_eq!(fresh.slot(0), None);
    }
}
