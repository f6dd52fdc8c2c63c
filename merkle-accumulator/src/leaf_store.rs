use bincode::{Decode, Encode};

use crate::{AccumulatorError, HASH_LENGTH, Hash, TreeParams};

/// Ordered leaves with a hard capacity.
///
/// The backing vector is allocated once at full capacity and only ever grows
/// by [`push`](Self::push), which callers reach after
/// [`check_insert`](Self::check_insert) has accepted the leaf.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LeafStore {
    max_leaves: u32,
    leaves: Vec<Hash>,
}

impl LeafStore {
    /// An empty store sized for `params`.
    pub fn new(params: &TreeParams) -> Self {
        Self {
            max_leaves: params.max_leaves(),
            leaves: Vec::with_capacity(params.max_leaves() as usize),
        }
    }

    /// Number of stored leaves.
    pub fn len(&self) -> u32 {
        self.leaves.len() as u32
    }

    /// True before the first insert.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Capacity of the store.
    pub fn max_leaves(&self) -> u32 {
        self.max_leaves
    }

    /// True once no further leaf fits.
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_leaves
    }

    /// How many more leaves fit.
    pub fn remaining(&self) -> u32 {
        self.max_leaves.saturating_sub(self.len())
    }

    /// Leaf at `index`, in insertion order.
    pub fn get(&self, index: u32) -> Option<&Hash> {
        self.leaves.get(index as usize)
    }

    /// All leaves in insertion order.
    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    /// Validate a candidate leaf against shape and capacity without touching
    /// the store. Returns the leaf as a fixed-size value.
    pub fn check_insert(&self, leaf: &[u8]) -> Result<Hash, AccumulatorError> {
        let leaf: Hash = leaf
            .try_into()
            .map_err(|_| AccumulatorError::InvalidLeafLength {
                expected: HASH_LENGTH,
                actual: leaf.len(),
            })?;
        if self.is_full() {
            return Err(AccumulatorError::MaxLeavesExceeded {
                max_leaves: self.max_leaves,
            });
        }
        Ok(leaf)
    }

    pub(crate) fn push(&mut self, leaf: Hash) {
        debug_assert!(!self.is_full(), "push past capacity");
        self.leaves.push(leaf);
    }
}
