use accumulator_costs::{CostContext, CostsExt, OperationCost};

/// A 32-byte node, leaf or root value.
pub type Hash = [u8; 32];

/// Byte length of every leaf and hash.
pub const HASH_LENGTH: usize = 32;

/// The absent-subtree sentinel, shared by every level.
pub const EMPTY_HASH: Hash = [0u8; 32];

pub(crate) const LEAF_DOMAIN_TAG: u8 = 0x00;
pub(crate) const INTERNAL_DOMAIN_TAG: u8 = 0x01;

/// Hash a leaf value: `blake3(0x00 || leaf)`.
pub fn leaf_hash(leaf: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_DOMAIN_TAG]);
    hasher.update(leaf);
    *hasher.finalize().as_bytes()
}

/// Combine two child hashes: `blake3(0x01 || left || right)`.
///
/// Order matters; `combine(a, b) != combine(b, a)` for `a != b`.
pub fn combine(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[INTERNAL_DOMAIN_TAG]);
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// The sentinel standing in for an absent subtree.
pub fn empty_hash() -> Hash {
    EMPTY_HASH
}

/// Hash of a parent node under the padding rule.
///
/// Two absent children form an absent parent and cost nothing; any other pair
/// goes through [`combine`].
pub(crate) fn parent_hash(left: &Hash, right: &Hash) -> CostContext<Hash> {
    if *left == EMPTY_HASH && *right == EMPTY_HASH {
        return EMPTY_HASH.wrap_with_cost(OperationCost::default());
    }
    combine(left, right).wrap_with_cost(OperationCost::with_hash_node_calls(1))
}

/// Hash of a completely empty subtree `level` levels tall.
pub fn empty_subtree_hash(level: u8) -> Hash {
    (0..level).fold(EMPTY_HASH, |acc, _| parent_hash(&acc, &acc).value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_order_sensitive() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_ne!(combine(&a, &b), combine(&b, &a));
        assert_eq!(combine(&a, &b), combine(&a, &b));
    }

    #[test]
    fn combine_matches_tagged_blake3() {
        let a = [3u8; 32];
        let b = [4u8; 32];
        let mut bytes = vec![INTERNAL_DOMAIN_TAG];
        bytes.extend_from_slice(&a);
        bytes.extend_from_slice(&b);
        assert_eq!(combine(&a, &b), *blake3::hash(&bytes).as_bytes());
    }

    #[test]
    fn leaf_and_node_domains_differ() {
        let leaf = [5u8; 32];
        let mut plain = vec![LEAF_DOMAIN_TAG];
        plain.extend_from_slice(&leaf);
        assert_eq!(leaf_hash(&leaf), *blake3::hash(&plain).as_bytes());
        assert_ne!(leaf_hash(&leaf), *blake3::hash(&leaf).as_bytes());
        // a zeroed leaf is still a real leaf, not the sentinel
        assert_ne!(leaf_hash(&EMPTY_HASH), EMPTY_HASH);
    }

    #[test]
    fn empty_subtrees_collapse_to_sentinel() {
        for level in 0..=16 {
            assert_eq!(empty_subtree_hash(level), EMPTY_HASH);
        }
        assert_eq!(empty_hash(), [0u8; 32]);
    }

    #[test]
    fn parent_of_absent_pair_costs_nothing() {
        let ctx = parent_hash(&EMPTY_HASH, &EMPTY_HASH);
        assert_eq!(ctx.value, EMPTY_HASH);
        assert_eq!(ctx.cost.hash_node_calls, 0);

        let real = [9u8; 32];
        let ctx = parent_hash(&real, &EMPTY_HASH);
        assert_eq!(ctx.value, combine(&real, &EMPTY_HASH));
        assert_eq!(ctx.cost.hash_node_calls, 1);
    }
}
