use accumulator_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error, cost_return_on_error_no_add,
};
use tracing::debug;

use crate::{
    AccountStore, AccumulatorError, Address, Caller, Hash, InsertPolicy, MerkleTreeState,
    TreeParams, decode_state, encode_state,
};

/// Host-side entry points over trees kept in an [`AccountStore`].
///
/// Each call loads the account, runs one state transition and writes the
/// account back only if the transition succeeded. Callers are expected to
/// serialize calls that target the same address.
pub struct TreeProgram<S> {
    store: S,
}

impl<S: AccountStore> TreeProgram<S> {
    /// A program over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a zeroed tree at `address`. Returns its root, which is always
    /// `[0; 32]`.
    pub fn initialize(
        &self,
        address: &Address,
        caller: &Caller,
        params: TreeParams,
        policy: InsertPolicy,
    ) -> CostResult<Hash, AccumulatorError> {
        let mut cost = OperationCost::default();
        let mut slot = cost_return_on_error!(&mut cost, self.load(address));
        let state = cost_return_on_error_no_add!(
            cost,
            MerkleTreeState::initialize(&mut slot, caller, params, policy)
        );
        let root = *state.root();
        let data = cost_return_on_error_no_add!(cost, encode_state(state));
        cost_return_on_error!(&mut cost, self.store.put_account(address, &data));
        Ok(root).wrap_with_cost(cost)
    }

    /// Insert `leaf` into the tree at `address`, returning the new
    /// `(leaf_count, root)`.
    pub fn insert_leaf(
        &self,
        address: &Address,
        leaf: &[u8],
        caller: &Caller,
    ) -> CostResult<(u32, Hash), AccumulatorError> {
        let mut cost = OperationCost::default();
        let mut state = cost_return_on_error!(&mut cost, self.fetch(address));
        let inserted = cost_return_on_error!(&mut cost, state.insert_leaf(leaf, caller));
        let data = cost_return_on_error_no_add!(cost, encode_state(&state));
        cost_return_on_error!(&mut cost, self.store.put_account(address, &data));
        Ok(inserted).wrap_with_cost(cost)
    }

    /// Load the tree at `address`.
    pub fn fetch(&self, address: &Address) -> CostResult<MerkleTreeState, AccumulatorError> {
        self.load(address).map(|result| {
            result.and_then(|slot| slot.ok_or(AccumulatorError::NotInitialized))
        })
    }

    fn load(&self, address: &Address) -> CostResult<Option<MerkleTreeState>, AccumulatorError> {
        self.store.get_account(address).flat_map_ok(|data| {
            let decoded = match data {
                None => Ok(None),
                Some(data) => {
                    debug!(
                        address = %hex::encode(address),
                        bytes = data.len(),
                        "loaded tree account"
                    );
                    decode_state(&data).map(Some)
                }
            };
            decoded.wrap_with_cost(OperationCost::default())
        })
    }
}
