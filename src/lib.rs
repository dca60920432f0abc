//! A implementation of the Speck block ciphers for Rust.
//!
//! See <https://eprint.iacr.org/2013/404.pdf> for more information about Speck.
//!
//! Only the 128-bit block variants (Speck128/128, Speck128/192 and
//! Speck128/256) are implemented. Ciphers operate on a single block; no
//! chaining mode is provided.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod error;
mod params;
pub mod speck128;

pub use crate::error::Error;
pub use crate::params::{new, SpeckParameters};
pub use crate::speck128::Speck128;

/// A block cipher keyed at construction time.
///
/// `dst` and `src` must both be exactly [`block_size`](BlockCipher::block_size)
/// bytes long. Implementations panic otherwise.
pub trait BlockCipher {
    /// Encrypt the block `src` into `dst`
    fn encrypt(&self, dst: &mut [u8], src: &[u8]);

    /// Decrypt the block `src` into `dst`
    fn decrypt(&self, dst: &mut [u8], src: &[u8]);

    fn encrypt_in_place(&self, block: &mut [u8]);

    fn decrypt_in_place(&self, block: &mut [u8]);

    /// Block size in bytes
    fn block_size(&self) -> usize;

    /// Name of the algorithm and variant, e.g. `Speck128/256`
    fn algorithm(&self) -> &'static str;
}
