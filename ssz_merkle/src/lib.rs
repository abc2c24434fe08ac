//! Merkleization primitives shared by every SSZ type descriptor.
//!
//! The chunk hash is SHA-256 over the 64-byte concatenation of two
//! chunks; everything here is a deterministic function of its inputs
//! except the zero-hash table, which is computed once on first use.

#[macro_use]
extern crate lazy_static;

mod merkleize;

pub use ethereum_types::H256;
pub use merkleize::{hash_concat, merkleize, mix_in_length, pack, zero_hash, MAX_TREE_DEPTH};

/// Number of bytes in a Merkle tree leaf.
pub const BYTES_PER_CHUNK: usize = 32;
