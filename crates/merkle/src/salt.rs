//! Deterministic per-leaf salt generation.
//!
//! A [`Salter`] is a deterministic random-bit generator seeded with a
//! 32-byte entropy value: the entropy is the ChaCha20 key and the stream
//! starts at position zero, with no personalization. Given identical
//! entropy and an identical sequence of draws, the output is bit-for-bit
//! reproducible, so an auditor holding a tree's stored entropy can
//! re-derive every salt. Draw N depends on draws 1..N-1 having been
//! consumed; a single salt cannot be regenerated in isolation.
//!
//! One salter is owned exclusively by one tree build and is consumed by
//! it; it is never shared across trees or reused afterwards.

use alloy_primitives::B256;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use veiltree_core::{ENTROPY_LEN, SALT_LEN};

use crate::error::{MerkleError, Result};

/// Deterministic salt generator for a single tree build.
#[derive(Debug)]
pub struct Salter {
    rng: ChaCha20Rng,
}

impl Salter {
    /// Seed a salter from a 32-byte entropy value.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::InvalidEntropy`] unless `entropy` is
    /// exactly 32 bytes.
    pub fn new(entropy: &[u8]) -> Result<Self> {
        if entropy.len() != ENTROPY_LEN {
            return Err(MerkleError::InvalidEntropy(entropy.len()));
        }
        let mut seed = [0u8; ENTROPY_LEN];
        seed.copy_from_slice(entropy);
        Ok(Self {
            rng: ChaCha20Rng::from_seed(seed),
        })
    }

    /// Draw the next `n` bytes of the generator stream.
    pub fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.rng.fill_bytes(&mut out);
        out
    }

    /// Draw the next 32-byte leaf salt.
    pub fn next_salt(&mut self) -> B256 {
        let mut out = [0u8; SALT_LEN];
        self.rng.fill_bytes(&mut out);
        B256::from(out)
    }
}
