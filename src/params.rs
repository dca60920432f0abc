//! Speck parameter sets and the cipher factory.

use alloc::boxed::Box;
use core::fmt;

use crate::error::Error;
use crate::speck128::Speck128;
use crate::BlockCipher;

/// Block and key size combinations defined for Speck.
///
/// Only the 128-bit block variants are implemented. The others can still be
/// selected, and [`new`] reports them as [`Error::NotImplemented`].
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SpeckParameters {
    Speck32_64,
    Speck48_72,
    Speck48_96,
    Speck64_96,
    Speck64_128,
    Speck96_96,
    Speck96_144,
    Speck128_128,
    Speck128_192,
    Speck128_256,
}

use self::SpeckParameters::*;

const SPECK128: [SpeckParameters; 3] = [Speck128_128, Speck128_192, Speck128_256];

impl SpeckParameters {
    pub const ALL: [SpeckParameters; 10] = [
        Speck32_64,
        Speck48_72,
        Speck48_96,
        Speck64_96,
        Speck64_128,
        Speck96_96,
        Speck96_144,
        Speck128_128,
        Speck128_192,
        Speck128_256,
    ];

    /// Block size in bytes
    pub const fn block_size(self) -> usize {
        match self {
            Speck32_64 => 4,
            Speck48_72 | Speck48_96 => 6,
            Speck64_96 | Speck64_128 => 8,
            Speck96_96 | Speck96_144 => 12,
            Speck128_128 | Speck128_192 | Speck128_256 => 16,
        }
    }

    /// Key size in bytes
    pub const fn key_size(self) -> usize {
        match self {
            Speck32_64 => 8,
            Speck48_72 => 9,
            Speck48_96 | Speck64_96 | Speck96_96 => 12,
            Speck64_128 | Speck128_128 => 16,
            Speck96_144 => 18,
            Speck128_192 => 24,
            Speck128_256 => 32,
        }
    }

    pub const fn rounds(self) -> usize {
        match self {
            Speck32_64 | Speck48_72 => 22,
            Speck48_96 => 23,
            Speck64_96 => 26,
            Speck64_128 => 27,
            Speck96_96 => 28,
            Speck96_144 => 29,
            Speck128_128 => 32,
            Speck128_192 => 33,
            Speck128_256 => 34,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Speck32_64 => "Speck32/64",
            Speck48_72 => "Speck48/72",
            Speck48_96 => "Speck48/96",
            Speck64_96 => "Speck64/96",
            Speck64_128 => "Speck64/128",
            Speck96_96 => "Speck96/96",
            Speck96_144 => "Speck96/144",
            Speck128_128 => "Speck128/128",
            Speck128_192 => "Speck128/192",
            Speck128_256 => "Speck128/256",
        }
    }

    /// Whether [`new`] can build a cipher for this variant
    pub fn is_implemented(self) -> bool {
        SPECK128.contains(&self)
    }

    // The only place key lengths are checked.
    pub(crate) fn check_key(self, key: &[u8]) -> Result<(), Error> {
        if key.len() == self.key_size() {
            Ok(())
        } else {
            Err(Error::InvalidKeyLength)
        }
    }

    pub(crate) fn speck128_for_key(key: &[u8]) -> Result<Self, Error> {
        SPECK128
            .iter()
            .copied()
            .find(|params| params.check_key(key).is_ok())
            .ok_or(Error::InvalidKeyLength)
    }
}

impl fmt::Display for SpeckParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create a Speck cipher for the variant `params` from the master key `key`.
///
/// The key length is checked first, so a wrong-sized key is reported as
/// [`Error::InvalidKeyLength`] even for variants that are not implemented.
pub fn new(
    key: &[u8],
    params: SpeckParameters,
) -> Result<Box<dyn BlockCipher + Send + Sync>, Error> {
    params.check_key(key)?;
    match params {
        Speck128_128 | Speck128_192 | Speck128_256 => {
            Ok(Box::new(Speck128::with_parameters(params, key)))
        }
        _ => Err(Error::NotImplemented(params)),
    }
}

#[test]
fn test_new() {
    let vectors = [
        (
            "0f0e0d0c0b0a09080706050403020100",
            "6c617669757165207469206564616d20",
            "a65d9851797832657860fedf5c570d18",
            Speck128_128,
        ),
        (
            "17161514131211100f0e0d0c0b0a09080706050403020100",
            "726148206665696843206f7420746e65",
            "1be4cf3a13135566f9bc185de03c1886",
            Speck128_192,
        ),
        (
            "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
            "65736f6874206e49202e72656e6f6f70",
            "4109010405c0f53e4eeeb48d9c188f43",
            Speck128_256,
        ),
    ];
    for &(key, plaintext, ciphertext, params) in vectors.iter() {
        let plaintext = hex::decode(plaintext).unwrap();
        let ciphertext = hex::decode(ciphertext).unwrap();
        let cipher = new(&hex::decode(key).unwrap(), params).unwrap();
        assert_eq!(cipher.algorithm(), params.name());
        assert_eq!(cipher.block_size(), params.block_size());

        let mut block = plaintext.clone();
        cipher.encrypt_in_place(&mut block);
        assert_eq!(block, ciphertext, "{}", params);
        cipher.decrypt_in_place(&mut block);
        assert_eq!(block, plaintext, "{}", params);

        let mut dst = vec![0u8; ciphertext.len()];
        cipher.encrypt(&mut dst, &plaintext);
        assert_eq!(dst, ciphertext, "{}", params);
        cipher.decrypt(&mut dst, &ciphertext);
        assert_eq!(dst, plaintext, "{}", params);
    }
}

#[test]
fn test_new_checks_key_size_of_selected_variant() {
    // a valid Speck128/192 key must not silently select that variant
    let key = [0u8; 24];
    assert_eq!(new(&key, Speck128_128).err(), Some(Error::InvalidKeyLength));
    assert_eq!(new(&key, Speck128_256).err(), Some(Error::InvalidKeyLength));
    assert!(new(&key, Speck128_192).is_ok());
    assert_eq!(new(&[0u8; 4], Speck128_128).err(), Some(Error::InvalidKeyLength));
}

#[test]
fn test_new_not_implemented() {
    for &params in SpeckParameters::ALL.iter() {
        let key = vec![0u8; params.key_size()];
        match new(&key, params) {
            Ok(cipher) => {
                assert!(params.is_implemented());
                assert_eq!(cipher.algorithm(), params.name());
            }
            Err(err) => {
                assert!(!params.is_implemented());
                assert_eq!(err, Error::NotImplemented(params));
            }
        }
        // the key length is checked before the implementation
        let key = vec![0u8; params.key_size() + 1];
        assert_eq!(new(&key, params).err(), Some(Error::InvalidKeyLength));
    }
}

#[test]
fn test_parameter_tables() {
    use crate::speck128;

    assert_eq!(Speck128_128.key_size(), speck128::KEY_SIZE_128);
    assert_eq!(Speck128_192.key_size(), speck128::KEY_SIZE_192);
    assert_eq!(Speck128_256.key_size(), speck128::KEY_SIZE_256);
    assert_eq!(Speck128_128.rounds(), speck128::ROUNDS_128);
    assert_eq!(Speck128_192.rounds(), speck128::ROUNDS_192);
    assert_eq!(Speck128_256.rounds(), speck128::ROUNDS_256);
    for &params in SpeckParameters::ALL.iter() {
        assert_eq!(params.to_string(), params.name());
        assert_eq!(
            params.is_implemented(),
            params.block_size() == speck128::BLOCK_SIZE
        );
    }
}
