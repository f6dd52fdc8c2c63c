//! Capacity-bounded, append-only Merkle accumulator.
//!
//! Leaves are 32-byte values appended one at a time. After every append the
//! tree root is updated in `O(depth)` by folding the new leaf into a frontier
//! of carried subtree hashes, so the commitment never has to be rebuilt from
//! the full leaf set.
//!
//! Hashing uses BLAKE3 with a one-byte domain tag:
//!
//! - leaf: `blake3(0x00 || leaf)`
//! - internal node: `blake3(0x01 || left || right)`
//!
//! An absent subtree is `[0; 32]` at every level, which makes the root of an
//! empty tree exactly the zeroed root written at initialization.

#![deny(missing_docs)]

mod auth;
mod error;
mod frontier;
pub(crate) mod hash;
mod leaf_store;
mod params;
pub(crate) mod path;
mod program;
mod serialization;
mod state;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use accumulator_costs::{CostContext, CostResult, OperationCost};
pub use auth::{Caller, InsertPolicy, Pubkey};
pub use error::{AccumulatorError, ErrorKind};
pub use frontier::Frontier;
pub use hash::{EMPTY_HASH, HASH_LENGTH, Hash, combine, empty_hash, empty_subtree_hash, leaf_hash};
pub use leaf_store::LeafStore;
pub use params::{MAX_LEAVES, MAX_SUPPORTED_LEAVES, TreeParams};
pub use path::compute_root_from_leaves;
pub use program::TreeProgram;
pub use serialization::{ACCOUNT_DISCRIMINATOR, decode_state, encode_state};
pub use state::MerkleTreeState;
pub use store::{AccountStore, Address, MemAccountStore};
