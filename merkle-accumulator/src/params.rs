use bincode::{Decode, Encode};

use crate::AccumulatorError;

/// Default leaf capacity of a tree.
pub const MAX_LEAVES: u32 = 30;

/// Largest capacity a tree may be configured with (depth 16).
pub const MAX_SUPPORTED_LEAVES: u32 = 1 << 16;

/// Capacity configuration of a tree, fixed at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct TreeParams {
    max_leaves: u32,
}

impl TreeParams {
    /// Params for a tree holding at most `max_leaves` leaves.
    ///
    /// `max_leaves` must be between 2 and [`MAX_SUPPORTED_LEAVES`] inclusive.
    pub fn new(max_leaves: u32) -> Result<Self, AccumulatorError> {
        let params = Self { max_leaves };
        params.validate()?;
        Ok(params)
    }

    /// Maximum number of leaves.
    pub fn max_leaves(&self) -> u32 {
        self.max_leaves
    }

    /// Number of frontier levels, `ceil(log2(max_leaves))`.
    pub fn depth(&self) -> u8 {
        depth_for(self.max_leaves)
    }

    pub(crate) fn validate(&self) -> Result<(), AccumulatorError> {
        if !(2..=MAX_SUPPORTED_LEAVES).contains(&self.max_leaves) {
            return Err(AccumulatorError::InvalidParams(format!(
                "max_leaves must be between 2 and {}, got {}",
                MAX_SUPPORTED_LEAVES, self.max_leaves
            )));
        }
        Ok(())
    }
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_leaves: MAX_LEAVES,
        }
    }
}

/// `ceil(log2(max_leaves))` for `max_leaves >= 2`.
fn depth_for(max_leaves: u32) -> u8 {
    (u32::BITS - (max_leaves - 1).leading_zeros()) as u8
}
