use thiserror::Error;

/// Errors surfaced by accumulator operations.
///
/// The `Display` text of every variant starts with its [`name`], which is the
/// identifier external callers match on.
///
/// [`name`]: AccumulatorError::name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccumulatorError {
    /// The tree already holds its maximum number of leaves.
    #[error("MaxLeavesExceeded: the maximum number of leaves ({max_leaves}) has been exceeded")]
    MaxLeavesExceeded {
        /// Capacity of the tree.
        max_leaves: u32,
    },
    /// A leaf was not exactly 32 bytes.
    #[error("InvalidLeafLength: leaf must be {expected} bytes, got {actual}")]
    InvalidLeafLength {
        /// Required leaf length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// The caller presented no verified signature.
    #[error("MissingSigner: {} did not sign", hex::encode(.caller))]
    MissingSigner {
        /// Key of the caller.
        caller: [u8; 32],
    },
    /// The signer is not allowed to insert into this tree.
    #[error("UnauthorizedSigner: {} is not the tree authority", hex::encode(.caller))]
    UnauthorizedSigner {
        /// Key of the rejected signer.
        caller: [u8; 32],
    },
    /// Initialize was called on an existing tree.
    #[error("AlreadyInitialized: merkle tree state already exists")]
    AlreadyInitialized,
    /// No tree exists at the target.
    #[error("NotInitialized: merkle tree state has not been initialized")]
    NotInitialized,
    /// Persisted state does not decode or is inconsistent.
    #[error("CorruptedState: {0}")]
    CorruptedState(String),
    /// Capacity configuration out of range.
    #[error("InvalidParams: {0}")]
    InvalidParams(String),
    /// The account store failed.
    #[error("StoreError: {0}")]
    StoreError(String),
    /// A leaf index past the current leaf count.
    #[error("LeafIndexOutOfRange: no leaf at index {index} (leaf count {leaf_count})")]
    LeafIndexOutOfRange {
        /// Requested leaf index.
        index: u32,
        /// Leaves currently stored.
        leaf_count: u32,
    },
}

/// Broad class of an [`AccumulatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input.
    Validation,
    /// The tree is full.
    Capacity,
    /// The caller may not perform the operation.
    Authorization,
    /// The state is in the wrong lifecycle phase or does not decode.
    State,
    /// The account store failed.
    Storage,
}

impl AccumulatorError {
    /// Stable identifier of the error.
    pub fn name(&self) -> &'static str {
        match self {
            AccumulatorError::MaxLeavesExceeded { .. } => "MaxLeavesExceeded",
            AccumulatorError::InvalidLeafLength { .. } => "InvalidLeafLength",
            AccumulatorError::MissingSigner { .. } => "MissingSigner",
            AccumulatorError::UnauthorizedSigner { .. } => "UnauthorizedSigner",
            AccumulatorError::AlreadyInitialized => "AlreadyInitialized",
            AccumulatorError::NotInitialized => "NotInitialized",
            AccumulatorError::CorruptedState(_) => "CorruptedState",
            AccumulatorError::InvalidParams(_) => "InvalidParams",
            AccumulatorError::StoreError(_) => "StoreError",
            AccumulatorError::LeafIndexOutOfRange { .. } => "LeafIndexOutOfRange",
        }
    }

    /// Stable numeric code, starting at 6000 for `MaxLeavesExceeded`.
    pub fn code(&self) -> u32 {
        match self {
            AccumulatorError::MaxLeavesExceeded { .. } => 6000,
            AccumulatorError::InvalidLeafLength { .. } => 6001,
            AccumulatorError::MissingSigner { .. } => 6002,
            AccumulatorError::UnauthorizedSigner { .. } => 6003,
            AccumulatorError::AlreadyInitialized => 6004,
            AccumulatorError::NotInitialized => 6005,
            AccumulatorError::CorruptedState(_) => 6006,
            AccumulatorError::InvalidParams(_) => 6007,
            AccumulatorError::StoreError(_) => 6008,
            AccumulatorError::LeafIndexOutOfRange { .. } => 6009,
        }
    }

    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccumulatorError::InvalidLeafLength { .. }
            | AccumulatorError::InvalidParams(_)
            | AccumulatorError::LeafIndexOutOfRange { .. } => ErrorKind::Validation,
            AccumulatorError::MaxLeavesExceeded { .. } => ErrorKind::Capacity,
            AccumulatorError::MissingSigner { .. } | AccumulatorError::UnauthorizedSigner { .. } => {
                ErrorKind::Authorization
            }
            AccumulatorError::AlreadyInitialized
            | AccumulatorError::NotInitialized
            | AccumulatorError::CorruptedState(_) => ErrorKind::State,
            AccumulatorError::StoreError(_) => ErrorKind::Storage,
        }
    }
}
