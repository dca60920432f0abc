//! Speck128 block ciphers: 128-bit block, 128, 192 or 256-bit key.

use byteorder::{BigEndian, ByteOrder};
use core::fmt;

use crate::error::Error;
use crate::params::SpeckParameters;
use crate::BlockCipher;

pub const BLOCK_SIZE: usize = 16;
pub const KEY_SIZE_128: usize = 16;
pub const KEY_SIZE_192: usize = 24;
pub const KEY_SIZE_256: usize = 32;

pub const ROUNDS_128: usize = 32;
pub const ROUNDS_192: usize = 33;
pub const ROUNDS_256: usize = 34;

const MAX_ROUNDS: usize = ROUNDS_256;

/// Apply one Speck round with the round key `k` to the words `(x1, x2)`
#[inline]
pub fn round(x1: &mut u64, x2: &mut u64, k: u64) {
    *x1 = x1.rotate_right(8).wrapping_add(*x2) ^ k;
    *x2 = x2.rotate_left(3) ^ *x1;
}

/// Undo one Speck round with the round key `k`
#[inline]
pub fn inverse_round(x1: &mut u64, x2: &mut u64, k: u64) {
    *x2 = (*x2 ^ *x1).rotate_right(3);
    *x1 = (*x1 ^ k).wrapping_sub(*x2).rotate_left(8);
}

/// Expanded round keys, one word per round.
#[derive(Clone, PartialEq, Eq)]
pub struct KeySchedule {
    keys: [u64; MAX_ROUNDS],
    rounds: usize,
}

impl KeySchedule {
    /// The round keys, in the order encryption consumes them
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.keys[..self.rounds]
    }

    /// Number of rounds, which is also the number of round keys
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySchedule")
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

/// Compute the key schedule from the master key `key`
///
/// The key length selects the variant: 16, 24 or 32 bytes. Any other length
/// is rejected with [`Error::InvalidKeyLength`].
pub fn key_schedule(key: &[u8]) -> Result<KeySchedule, Error> {
    let params = SpeckParameters::speck128_for_key(key)?;
    Ok(expand_key(params, key))
}

// `key` has already been checked against `params.key_size()`.
//
// The left words are stored in reverse so that round `i` updates `k[i % m]`,
// and the running right word sits right after them at `k[m]`.
pub(crate) fn expand_key(params: SpeckParameters, key: &[u8]) -> KeySchedule {
    let mut k = [0u64; 4];
    let m = match params {
        SpeckParameters::Speck128_128 => {
            k[0] = BigEndian::read_u64(&key[0..8]);
            k[1] = BigEndian::read_u64(&key[8..16]);
            1
        }
        SpeckParameters::Speck128_192 => {
            k[0] = BigEndian::read_u64(&key[8..16]);
            k[1] = BigEndian::read_u64(&key[0..8]);
            k[2] = BigEndian::read_u64(&key[16..24]);
            2
        }
        SpeckParameters::Speck128_256 => {
            k[0] = BigEndian::read_u64(&key[16..24]);
            k[1] = BigEndian::read_u64(&key[8..16]);
            k[2] = BigEndian::read_u64(&key[0..8]);
            k[3] = BigEndian::read_u64(&key[24..32]);
            3
        }
        _ => unreachable!("{} is not a Speck128 variant", params),
    };

    let rounds = params.rounds();
    let mut ks = KeySchedule {
        keys: [0u64; MAX_ROUNDS],
        rounds,
    };
    ks.keys[0] = k[m];
    for i in 0..rounds - 1 {
        let (left, right) = k.split_at_mut(m);
        round(&mut left[i % m], &mut right[0], i as u64);
        ks.keys[i + 1] = right[0];
    }
    ks
}

#[inline]
fn load(block: &[u8]) -> (u64, u64) {
    (
        BigEndian::read_u64(&block[..8]),
        BigEndian::read_u64(&block[8..]),
    )
}

#[inline]
fn store(block: &mut [u8], (x1, x2): (u64, u64)) {
    BigEndian::write_u64(&mut block[..8], x1);
    BigEndian::write_u64(&mut block[8..], x2);
}

#[inline]
fn encrypt_words((mut x1, mut x2): (u64, u64), ks: &KeySchedule) -> (u64, u64) {
    for &k in ks.as_slice() {
        round(&mut x1, &mut x2, k);
    }
    (x1, x2)
}

#[inline]
fn decrypt_words((mut x1, mut x2): (u64, u64), ks: &KeySchedule) -> (u64, u64) {
    for &k in ks.as_slice().iter().rev() {
        inverse_round(&mut x1, &mut x2, k);
    }
    (x1, x2)
}

#[inline]
fn check_block_size(len: usize) {
    assert!(
        len == BLOCK_SIZE,
        "incorrect block size, expected 128 bits, got {} bytes",
        len
    );
}

/// Encrypt a single block `block` using the key schedule `ks`
pub fn encrypt_block(block: &mut [u8; BLOCK_SIZE], ks: &KeySchedule) {
    let words = encrypt_words(load(block), ks);
    store(block, words);
}

/// Decrypt a single block `block` using the key schedule `ks`
pub fn decrypt_block(block: &mut [u8; BLOCK_SIZE], ks: &KeySchedule) {
    let words = decrypt_words(load(block), ks);
    store(block, words);
}

/// A Speck128 cipher context.
///
/// Holds the round keys derived from the master key. It never changes after
/// construction, so a single instance can be shared between threads.
#[derive(Clone, Debug)]
pub struct Speck128 {
    ks: KeySchedule,
}

impl Speck128 {
    /// Create a cipher from a 16, 24 or 32-byte master key
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        Ok(Speck128 {
            ks: key_schedule(key)?,
        })
    }

    pub(crate) fn with_parameters(params: SpeckParameters, key: &[u8]) -> Self {
        Speck128 {
            ks: expand_key(params, key),
        }
    }

    /// The expanded round keys
    pub fn round_keys(&self) -> &[u64] {
        self.ks.as_slice()
    }

    /// Encrypt `src` into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is not exactly [`BLOCK_SIZE`] bytes long.
    pub fn encrypt(&self, dst: &mut [u8], src: &[u8]) {
        check_block_size(dst.len());
        check_block_size(src.len());
        store(dst, encrypt_words(load(src), &self.ks));
    }

    /// Decrypt `src` into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is not exactly [`BLOCK_SIZE`] bytes long.
    pub fn decrypt(&self, dst: &mut [u8], src: &[u8]) {
        check_block_size(dst.len());
        check_block_size(src.len());
        store(dst, decrypt_words(load(src), &self.ks));
    }

    /// Encrypt `block` in place. Panics unless it is [`BLOCK_SIZE`] bytes long.
    pub fn encrypt_in_place(&self, block: &mut [u8]) {
        check_block_size(block.len());
        let words = encrypt_words(load(block), &self.ks);
        store(block, words);
    }

    /// Decrypt `block` in place. Panics unless it is [`BLOCK_SIZE`] bytes long.
    pub fn decrypt_in_place(&self, block: &mut [u8]) {
        check_block_size(block.len());
        let words = decrypt_words(load(block), &self.ks);
        store(block, words);
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// The algorithm name, determined by the number of rounds
    pub fn algorithm(&self) -> &'static str {
        match self.ks.rounds() {
            ROUNDS_128 => "Speck128/128",
            ROUNDS_192 => "Speck128/192",
            ROUNDS_256 => "Speck128/256",
            rounds => unreachable!("no Speck128 variant has {} rounds", rounds),
        }
    }
}

impl BlockCipher for Speck128 {
    fn encrypt(&self, dst: &mut [u8], src: &[u8]) {
        Speck128::encrypt(self, dst, src)
    }

    fn decrypt(&self, dst: &mut [u8], src: &[u8]) {
        Speck128::decrypt(self, dst, src)
    }

    fn encrypt_in_place(&self, block: &mut [u8]) {
        Speck128::encrypt_in_place(self, block)
    }

    fn decrypt_in_place(&self, block: &mut [u8]) {
        Speck128::decrypt_in_place(self, block)
    }

    fn block_size(&self) -> usize {
        Speck128::block_size(self)
    }

    fn algorithm(&self) -> &'static str {
        Speck128::algorithm(self)
    }
}

#[cfg(test)]
const VECTORS: [(&str, &str, &str, &str); 3] = [
    (
        "0f0e0d0c0b0a09080706050403020100",
        "6c617669757165207469206564616d20",
        "a65d9851797832657860fedf5c570d18",
        "Speck128/128",
    ),
    (
        "17161514131211100f0e0d0c0b0a09080706050403020100",
        "726148206665696843206f7420746e65",
        "1be4cf3a13135566f9bc185de03c1886",
        "Speck128/192",
    ),
    (
        "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
        "65736f6874206e49202e72656e6f6f70",
        "4109010405c0f53e4eeeb48d9c188f43",
        "Speck128/256",
    ),
];

#[test]
fn test_vectors() {
    for &(key, plaintext, ciphertext, name) in VECTORS.iter() {
        let key = hex::decode(key).unwrap();
        let plaintext = hex::decode(plaintext).unwrap();
        let ciphertext = hex::decode(ciphertext).unwrap();

        let cipher = Speck128::new(&key).unwrap();
        assert_eq!(cipher.block_size(), BLOCK_SIZE);
        assert_eq!(cipher.algorithm(), name);

        let src = plaintext.clone();
        let mut dst = [0u8; BLOCK_SIZE];
        cipher.encrypt(&mut dst, &src);
        assert_eq!(src, plaintext);
        assert_eq!(dst[..], ciphertext[..], "{}", name);

        let src = ciphertext.clone();
        let mut dst = [0u8; BLOCK_SIZE];
        cipher.decrypt(&mut dst, &src);
        assert_eq!(src, ciphertext);
        assert_eq!(dst[..], plaintext[..], "{}", name);

        let mut block = plaintext.clone();
        cipher.encrypt_in_place(&mut block);
        assert_eq!(block, ciphertext, "{}", name);
        cipher.decrypt_in_place(&mut block);
        assert_eq!(block, plaintext, "{}", name);
    }
}

#[test]
fn test_block_functions() {
    let (key, plaintext, ciphertext, _) = VECTORS[0];
    let ks = key_schedule(&hex::decode(key).unwrap()).unwrap();
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&hex::decode(plaintext).unwrap());
    encrypt_block(&mut block, &ks);
    assert_eq!(block[..], hex::decode(ciphertext).unwrap()[..]);
    decrypt_block(&mut block, &ks);
    assert_eq!(block[..], hex::decode(plaintext).unwrap()[..]);
}

#[test]
fn test_key_schedule() {
    let expected: [(usize, u64); 3] = [
        (ROUNDS_128, 0x2199c870db8ec93f),
        (ROUNDS_192, 0x372dd2b830c61709),
        (ROUNDS_256, 0xf4d26f589a56b276),
    ];
    for (&(key, _, _, _), &(rounds, last)) in VECTORS.iter().zip(expected.iter()) {
        let ks = key_schedule(&hex::decode(key).unwrap()).unwrap();
        assert_eq!(ks.rounds(), rounds);
        assert_eq!(ks.as_slice().len(), rounds);
        // all three test keys end in the same two words
        assert_eq!(ks.as_slice()[0], 0x0706050403020100);
        assert_eq!(ks.as_slice()[1], 0x37253b31171d0309);
        assert_eq!(ks.as_slice()[rounds - 1], last);
    }
}

#[test]
fn test_round() {
    let (mut x1, mut x2) = (0xfedcba9876543210, 0x0f1e2d3c4b5a6978);
    round(&mut x1, &mut x2, 0x0123456789abcdef);
    assert_eq!((x1, x2), (0x213e4c916a7b7045, 0x59cf257330a83b85));
    inverse_round(&mut x1, &mut x2, 0x0123456789abcdef);
    assert_eq!((x1, x2), (0xfedcba9876543210, 0x0f1e2d3c4b5a6978));

    let (mut x1, mut x2) = (0u64, 0u64);
    round(&mut x1, &mut x2, 0);
    assert_eq!((x1, x2), (0, 0));
}

#[test]
fn test_inverse_round_random() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let (k, a, b): (u64, u64, u64) = rng.gen();
        let (mut x1, mut x2) = (a, b);
        round(&mut x1, &mut x2, k);
        inverse_round(&mut x1, &mut x2, k);
        assert_eq!((x1, x2), (a, b));
    }
}

#[test]
fn test_round_trip_random() {
    use rand::RngCore;

    let mut rng = rand::thread_rng();
    for &key_size in [KEY_SIZE_128, KEY_SIZE_192, KEY_SIZE_256].iter() {
        for _ in 0..100 {
            let mut key = [0u8; KEY_SIZE_256];
            let mut block = [0u8; BLOCK_SIZE];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut block);
            let cipher = Speck128::new(&key[..key_size]).unwrap();

            let mut ct = [0u8; BLOCK_SIZE];
            cipher.encrypt(&mut ct, &block);
            let mut pt = [0u8; BLOCK_SIZE];
            cipher.decrypt(&mut pt, &ct);
            assert_eq!(pt, block);

            let mut in_place = block;
            cipher.encrypt_in_place(&mut in_place);
            assert_eq!(in_place, ct);
            cipher.decrypt_in_place(&mut in_place);
            assert_eq!(in_place, block);
        }
    }
}

#[test]
fn test_invalid_key_length() {
    for &len in [0usize, 4, 8, 15, 17, 23, 25, 31, 33, 64].iter() {
        let key = vec![0u8; len];
        assert_eq!(Speck128::new(&key).unwrap_err(), Error::InvalidKeyLength);
        assert_eq!(key_schedule(&key).unwrap_err(), Error::InvalidKeyLength);
    }
}

#[test]
fn test_algorithm_matches_key_size() {
    let names = [
        (KEY_SIZE_128, ROUNDS_128, "Speck128/128"),
        (KEY_SIZE_192, ROUNDS_192, "Speck128/192"),
        (KEY_SIZE_256, ROUNDS_256, "Speck128/256"),
    ];
    for &(key_size, rounds, name) in names.iter() {
        let cipher = Speck128::new(&vec![0x5au8; key_size]).unwrap();
        assert_eq!(cipher.round_keys().len(), rounds);
        assert_eq!(cipher.algorithm(), name);
        assert_eq!(cipher.block_size(), BLOCK_SIZE);
    }
}

#[test]
fn test_bad_block_size_panics() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    for &key_size in [KEY_SIZE_128, KEY_SIZE_192, KEY_SIZE_256].iter() {
        let cipher = Speck128::new(&vec![1u8; key_size]).unwrap();
        for &len in [BLOCK_SIZE - 1, BLOCK_SIZE + 1].iter() {
            let good = [0u8; BLOCK_SIZE];
            let bad = vec![0u8; len];
            let panics = |f: &dyn Fn()| catch_unwind(AssertUnwindSafe(f)).is_err();

            assert!(panics(&|| cipher.encrypt(&mut bad.clone(), &good)));
            assert!(panics(&|| cipher.encrypt(&mut good.clone(), &bad)));
            assert!(panics(&|| cipher.decrypt(&mut bad.clone(), &good)));
            assert!(panics(&|| cipher.decrypt(&mut good.clone(), &bad)));
            assert!(panics(&|| cipher.encrypt_in_place(&mut bad.clone())));
            assert!(panics(&|| cipher.decrypt_in_place(&mut bad.clone())));
        }
        let mut block = [0u8; BLOCK_SIZE];
        cipher.encrypt_in_place(&mut block);
        cipher.decrypt_in_place(&mut block);
        assert_eq!(block, [0u8; BLOCK_SIZE]);
    }
}

#[test]
#[should_panic(expected = "incorrect block size")]
fn test_encrypt_short_block() {
    let cipher = Speck128::new(&[0u8; KEY_SIZE_128]).unwrap();
    let mut dst = [0u8; BLOCK_SIZE - 1];
    cipher.encrypt(&mut dst, &[0u8; BLOCK_SIZE]);
}

#[test]
#[should_panic(expected = "incorrect block size")]
fn test_decrypt_long_block() {
    let cipher = Speck128::new(&[0u8; KEY_SIZE_256]).unwrap();
    cipher.decrypt_in_place(&mut [0u8; BLOCK_SIZE + 1]);
}
