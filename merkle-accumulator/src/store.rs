use std::{cell::RefCell, collections::BTreeMap};

use accumulator_costs::{CostResult, CostsExt, OperationCost};

use crate::AccumulatorError;

/// Address of an account holding one tree.
pub type Address = [u8; 32];

/// Account storage provided by the host.
///
/// Uses `&self` (interior mutability) so a program can read and write through
/// a shared handle. Returns `CostResult` to track storage I/O.
pub trait AccountStore {
    /// Raw bytes of the account at `address`, or `None` if it does not exist.
    fn get_account(&self, address: &Address) -> CostResult<Option<Vec<u8>>, AccumulatorError>;
    /// Replace the bytes of the account at `address`.
    fn put_account(&self, address: &Address, data: &[u8]) -> CostResult<(), AccumulatorError>;
}

/// In-memory account store backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemAccountStore {
    accounts: RefCell<BTreeMap<Address, Vec<u8>>>,
}

impl MemAccountStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.borrow().len()
    }

    /// True if no account exists.
    pub fn is_empty(&self) -> bool {
        self.accounts.borrow().is_empty()
    }

    /// Overwrite raw account bytes, bypassing any program logic.
    pub fn set_raw(&self, address: Address, data: Vec<u8>) {
        self.accounts.borrow_mut().insert(address, data);
    }
}

impl AccountStore for MemAccountStore {
    fn get_account(&self, address: &Address) -> CostResult<Option<Vec<u8>>, AccumulatorError> {
        let data = self.accounts.borrow().get(address).cloned();
        let loaded = data.as_ref().map_or(0, |d| d.len() as u32);
        Ok(data).wrap_with_cost(OperationCost::with_account_load(loaded))
    }

    fn put_account(&self, address: &Address, data: &[u8]) -> CostResult<(), AccumulatorError> {
        self.accounts.borrow_mut().insert(*address, data.to_vec());
        Ok(()).wrap_with_cost(OperationCost::with_storage_written_bytes(data.len() as u32))
    }
}
