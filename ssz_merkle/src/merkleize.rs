use crate::BYTES_PER_CHUNK;
use eth2_hashing::hash;
use ethereum_types::H256;

/// Deepest zero subtree the cache can supply. A descriptor limit is at
/// most `u32::MAX` elements, which keeps every tree well below this.
pub const MAX_TREE_DEPTH: usize = 48;

lazy_static! {
    static ref ZERO_HASHES: Vec<H256> = {
        let mut hashes = vec![H256::zero(); MAX_TREE_DEPTH + 1];

        for i in 0..MAX_TREE_DEPTH {
            hashes[i + 1] = hash_concat(hashes[i], hashes[i]);
        }

        hashes
    };
}

/// Hashes two chunks into their parent node.
pub fn hash_concat(left: H256, right: H256) -> H256 {
    let mut preimage = [0; BYTES_PER_CHUNK * 2];
    preimage[..BYTES_PER_CHUNK].copy_from_slice(left.as_bytes());
    preimage[BYTES_PER_CHUNK..].copy_from_slice(right.as_bytes());

    H256::from_slice(&hash(&preimage))
}

/// Returns the root of a perfectly balanced zero subtree of the given
/// height.
///
/// Panics if `depth` exceeds [`MAX_TREE_DEPTH`].
pub fn zero_hash(depth: usize) -> H256 {
    if depth > MAX_TREE_DEPTH {
        panic!("zero hash depth {} exceeds maximum of {}", depth, MAX_TREE_DEPTH)
    }

    ZERO_HASHES[depth]
}

/// Partitions `bytes` into 32-byte chunks, zero-padding the final one.
///
/// An empty input yields no chunks at all; Merkleization padding is the
/// caller's concern via the chunk limit.
pub fn pack(bytes: &[u8]) -> Vec<H256> {
    let mut chunks = Vec::with_capacity((bytes.len() + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK);

    for piece in bytes.chunks(BYTES_PER_CHUNK) {
        let mut chunk = H256::zero();
        chunk.as_bytes_mut()[..piece.len()].copy_from_slice(piece);
        chunks.push(chunk);
    }

    chunks
}

/// Computes the root of a binary Merkle tree over `chunks`, padded with
/// zero subtrees as if the tree held `limit` leaves.
///
/// `limit` must be at least the actual chunk count; the padding is
/// supplied level by level from the zero-hash table rather than by
/// materializing `limit` chunks.
pub fn merkleize(chunks: &[H256], limit: usize) -> H256 {
    let depth = depth_for(limit);
    debug_assert!(chunks.len() <= limit);

    if chunks.is_empty() {
        return zero_hash(depth);
    }

    let mut layer = chunks.to_vec();
    for height in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(zero_hash(height));
        }

        layer = layer
            .chunks(2)
            .map(|pair| hash_concat(pair[0], pair[1]))
            .collect();
    }

    layer[0]
}

/// Mixes the length of a variable-size collection into its root:
/// `H(root, LE64(length) padded to a chunk)`.
pub fn mix_in_length(root: H256, length: u64) -> H256 {
    let mut length_chunk = H256::zero();
    length_chunk.as_bytes_mut()[..8].copy_from_slice(&length.to_le_bytes());

    hash_concat(root, length_chunk)
}

/// Number of tree levels needed for `limit` leaves.
fn depth_for(limit: usize) -> usize {
    if limit <= 1 {
        0
    } else {
        (usize::BITS - (limit - 1).leading_zeros()) as usize
    }
}
