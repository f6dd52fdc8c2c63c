use accumulator_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error, cost_return_on_error_no_add,
};
use bincode::{Decode, Encode};
use tracing::{debug, info};

use crate::{
    AccumulatorError, Caller, EMPTY_HASH, Frontier, Hash, InsertPolicy, LeafStore, Pubkey,
    TreeParams, hash::leaf_hash, path,
};

/// The complete persistent state of one tree.
///
/// Mutated only through [`insert_leaf`](Self::insert_leaf), which validates
/// everything before writing anything.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct MerkleTreeState {
    params: TreeParams,
    authority: Pubkey,
    policy: InsertPolicy,
    root: Hash,
    leaves: LeafStore,
    frontier: Frontier,
}

impl MerkleTreeState {
    /// Create the zero state in `slot`.
    ///
    /// The caller must be a signer and becomes the tree authority. Fails with
    /// [`AccumulatorError::AlreadyInitialized`] if `slot` already holds a
    /// state, leaving it untouched.
    pub fn initialize<'a>(
        slot: &'a mut Option<MerkleTreeState>,
        caller: &Caller,
        params: TreeParams,
        policy: InsertPolicy,
    ) -> Result<&'a MerkleTreeState, AccumulatorError> {
        if slot.is_some() {
            debug!("refusing to initialize an existing tree");
            return Err(AccumulatorError::AlreadyInitialized);
        }
        caller.require_signer()?;
        params.validate()?;

        let state = slot.insert(Self::zeroed(*caller.key(), params, policy));
        info!(
            authority = %hex::encode(state.authority),
            max_leaves = params.max_leaves(),
            depth = params.depth(),
            ?policy,
            "initialized merkle tree"
        );
        Ok(state)
    }

    fn zeroed(authority: Pubkey, params: TreeParams, policy: InsertPolicy) -> Self {
        Self {
            params,
            authority,
            policy,
            root: EMPTY_HASH,
            leaves: LeafStore::new(&params),
            frontier: Frontier::empty(params.depth()),
        }
    }

    /// Append `leaf` and return the new `(leaf_count, root)`.
    ///
    /// Authorization, leaf length and capacity are checked in that order
    /// before any field changes; on error the state is left exactly as it was.
    pub fn insert_leaf(
        &mut self,
        leaf: &[u8],
        caller: &Caller,
    ) -> CostResult<(u32, Hash), AccumulatorError> {
        let mut cost = OperationCost::default();

        cost_return_on_error_no_add!(
            cost,
            self.policy.authorize(caller, &self.authority)
        );
        let leaf = cost_return_on_error_no_add!(
            cost,
            self.leaves.check_insert(leaf).inspect_err(|e| {
                debug!(error = %e, leaf_count = self.leaves.len(), "leaf rejected")
            })
        );

        let index = u64::from(self.leaves.len());
        let hashed = leaf_hash(&leaf);
        cost.hash_node_calls += 1;
        let root = cost_return_on_error!(&mut cost, self.frontier.append(hashed, index));

        self.leaves.push(leaf);
        self.root = root;

        let leaf_count = self.leaves.len();
        info!(
            root = %hex::encode(root),
            leaf_count,
            hash_node_calls = cost.hash_node_calls,
            "updated merkle root"
        );
        Ok((leaf_count, root)).wrap_with_cost(cost)
    }

    /// Current root.
    pub fn root(&self) -> &Hash {
        &self.root
    }

    /// Inserted leaves in order.
    pub fn leaves(&self) -> &[Hash] {
        self.leaves.leaves()
    }

    /// Number of inserted leaves.
    pub fn leaf_count(&self) -> u32 {
        self.leaves.len()
    }

    /// The leaf store.
    pub fn leaf_store(&self) -> &LeafStore {
        &self.leaves
    }

    /// The carried subtree hashes.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Capacity configuration.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Key of the signer that initialized the tree.
    pub fn authority(&self) -> &Pubkey {
        &self.authority
    }

    /// Insert authorization policy.
    pub fn policy(&self) -> InsertPolicy {
        self.policy
    }

    /// Sibling hashes from the leaf at `index` up to the root, lowest level
    /// first. Always `depth` entries long.
    pub fn authentication_path(&self, index: u32) -> Result<Vec<Hash>, AccumulatorError> {
        path::authentication_path(self.params.depth(), self.leaves(), index)
    }

    /// Check that the stored root and frontier are the ones the stored leaves
    /// produce. Used when loading persisted state.
    pub(crate) fn verify_integrity(&self) -> Result<(), AccumulatorError> {
        self.params
            .validate()
            .map_err(|e| AccumulatorError::CorruptedState(e.to_string()))?;
        if self.leaves.max_leaves() != self.params.max_leaves() {
            return Err(AccumulatorError::CorruptedState(format!(
                "leaf store capacity {} does not match params {}",
                self.leaves.max_leaves(),
                self.params.max_leaves()
            )));
        }
        if self.leaves.len() > self.params.max_leaves() {
            return Err(AccumulatorError::CorruptedState(format!(
                "leaf count {} exceeds capacity {}",
                self.leaves.len(),
                self.params.max_leaves()
            )));
        }
        if self.frontier.depth() != self.params.depth() {
            return Err(AccumulatorError::CorruptedState(format!(
                "frontier depth {} does not match tree depth {}",
                self.frontier.depth(),
                self.params.depth()
            )));
        }

        let mut replayed = Frontier::empty(self.params.depth());
        let mut root = EMPTY_HASH;
        for (index, leaf) in self.leaves().iter().enumerate() {
            root = replayed.append(leaf_hash(leaf), index as u64).value?;
        }
        if replayed != self.frontier {
            return Err(AccumulatorError::CorruptedState(
                "frontier does not match leaves".to_string(),
            ));
        }
        if root != self.root {
            return Err(AccumulatorError::CorruptedState(format!(
                "root {} does not match leaves (expected {})",
                hex::encode(self.root),
                hex::encode(root)
            )));
        }
        Ok(())
    }
}
