#![deny(missing_docs)]
//! Cost accounting for accumulator operations.
//!
//! Every operation that hashes nodes or touches account storage hands its
//! result back inside a [`CostContext`], so callers can observe how much work
//! an insert actually did without a separate profiling layer.

use std::ops::{Add, AddAssign};

mod context;

pub use context::{CostContext, CostResult, CostsExt};

/// Approximate resources consumed by one operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// Account reads performed.
    pub seek_count: u32,
    /// Bytes written back to account storage.
    pub storage_written_bytes: u32,
    /// Bytes loaded from account storage.
    pub storage_loaded_bytes: u32,
    /// Node hashes computed (leaf hashes and pair combines).
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// Cost consisting only of `hash_node_calls` node hashes.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Cost of a single account read of `loaded` bytes.
    pub fn with_account_load(loaded: u32) -> Self {
        OperationCost {
            seek_count: 1,
            storage_loaded_bytes: loaded,
            ..Default::default()
        }
    }

    /// Cost consisting only of `written` bytes of account storage.
    pub fn with_storage_written_bytes(written: u32) -> Self {
        OperationCost {
            storage_written_bytes: written,
            ..Default::default()
        }
    }

    /// True if nothing was spent.
    pub fn is_nothing(&self) -> bool {
        *self == OperationCost::default()
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.seek_count += rhs.seek_count;
        self.storage_written_bytes += rhs.storage_written_bytes;
        self.storage_loaded_bytes += rhs.storage_loaded_bytes;
        self.hash_node_calls += rhs.hash_node_calls;
    }
}

/// Unwraps a `CostResult`, folding its cost into `$cost`, or returns early
/// with the error and everything accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Like [`cost_return_on_error`] but for a plain `Result`: nothing is added,
/// the early return carries the cost accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
