//! Account encoding of [`MerkleTreeState`].
//!
//! Layout: an 8-byte discriminator followed by the bincode encoding of the
//! state (standard config, big-endian).

use crate::{AccumulatorError, MerkleTreeState};

/// Prefix identifying an account that holds a tree.
pub const ACCOUNT_DISCRIMINATOR: [u8; 8] = *b"mrkltree";

/// Upper bound on a decoded account, comfortably above the largest tree.
const MAX_ACCOUNT_BYTES: usize = 4 * 1024 * 1024;

/// Encode `state` into account bytes.
pub fn encode_state(state: &MerkleTreeState) -> Result<Vec<u8>, AccumulatorError> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_no_limit();
    let body = bincode::encode_to_vec(state, config)
        .map_err(|e| AccumulatorError::StoreError(format!("encode error: {}", e)))?;
    let mut data = Vec::with_capacity(ACCOUNT_DISCRIMINATOR.len() + body.len());
    data.extend_from_slice(&ACCOUNT_DISCRIMINATOR);
    data.extend_from_slice(&body);
    Ok(data)
}

/// Decode account bytes into a state.
///
/// Rejects a wrong discriminator, trailing bytes, and any state whose root or
/// frontier is not the one its leaves produce.
pub fn decode_state(data: &[u8]) -> Result<MerkleTreeState, AccumulatorError> {
    let body = data
        .strip_prefix(ACCOUNT_DISCRIMINATOR.as_slice())
        .ok_or_else(|| {
            AccumulatorError::CorruptedState("missing account discriminator".to_string())
        })?;
    let config = bincode::config::standard()
        .with_big_endian()
        .with_limit::<MAX_ACCOUNT_BYTES>();
    let (state, read): (MerkleTreeState, usize) = bincode::decode_from_slice(body, config)
        .map_err(|e| AccumulatorError::CorruptedState(format!("decode error: {}", e)))?;
    if read != body.len() {
        return Err(AccumulatorError::CorruptedState(format!(
            "{} trailing bytes after state",
            body.len() - read
        )));
    }
    state.verify_integrity()?;
    Ok(state)
}
