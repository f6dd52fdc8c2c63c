use bincode::{Decode, Encode};
use tracing::debug;

use crate::AccumulatorError;

/// Public key identifying a caller.
pub type Pubkey = [u8; 32];

/// The credential a caller presents to a mutating operation.
///
/// Signature verification happens in the host before the core sees the
/// caller; the core only learns whether a verified signature was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    key: Pubkey,
    is_signer: bool,
}

impl Caller {
    /// A caller whose signature the host verified.
    pub fn signer(key: Pubkey) -> Self {
        Self {
            key,
            is_signer: true,
        }
    }

    /// A caller that did not sign.
    pub fn unsigned(key: Pubkey) -> Self {
        Self {
            key,
            is_signer: false,
        }
    }

    /// The caller's key.
    pub fn key(&self) -> &Pubkey {
        &self.key
    }

    /// Whether a verified signature was attached.
    pub fn is_signer(&self) -> bool {
        self.is_signer
    }

    pub(crate) fn require_signer(&self) -> Result<(), AccumulatorError> {
        if !self.is_signer {
            debug!(caller = %hex::encode(self.key), "caller did not sign");
            return Err(AccumulatorError::MissingSigner { caller: self.key });
        }
        Ok(())
    }
}

/// Who may insert leaves into a tree. Chosen at initialization and stored
/// with the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub enum InsertPolicy {
    /// Any verified signer.
    #[default]
    AnySigner,
    /// Only the signer that initialized the tree.
    AuthorityOnly,
}

impl InsertPolicy {
    /// Check `caller` against this policy for a tree owned by `authority`.
    pub fn authorize(&self, caller: &Caller, authority: &Pubkey) -> Result<(), AccumulatorError> {
        caller.require_signer()?;
        match self {
            InsertPolicy::AnySigner => Ok(()),
            InsertPolicy::AuthorityOnly if caller.key() == authority => Ok(()),
            InsertPolicy::AuthorityOnly => {
                debug!(
                    caller = %hex::encode(caller.key()),
                    authority = %hex::encode(authority),
                    "signer is not the tree authority"
                );
                Err(AccumulatorError::UnauthorizedSigner {
                    caller: *caller.key(),
                })
            }
        }
    }
}
