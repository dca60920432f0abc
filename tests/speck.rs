use std::sync::Arc;
use std::thread;

use speck::{new, BlockCipher, Error, Speck128, SpeckParameters};

fn dehex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("invalid hex string")
}

#[test]
fn speck128_256_through_factory() {
    let key = dehex("1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100");
    let cipher = new(&key, SpeckParameters::Speck128_256).unwrap();
    assert_eq!(cipher.algorithm(), "Speck128/256");
    assert_eq!(cipher.block_size(), 16);

    let mut block = dehex("65736f6874206e49202e72656e6f6f70");
    cipher.encrypt_in_place(&mut block);
    assert_eq!(block, dehex("4109010405c0f53e4eeeb48d9c188f43"));
}

#[test]
fn factory_and_direct_construction_agree() {
    let key = dehex("17161514131211100f0e0d0c0b0a09080706050403020100");
    let boxed = new(&key, SpeckParameters::Speck128_192).unwrap();
    let direct = Speck128::new(&key).unwrap();
    assert_eq!(boxed.algorithm(), direct.algorithm());

    for i in 0..32u8 {
        let src = [i; 16];
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        boxed.encrypt(&mut a, &src);
        direct.encrypt(&mut b, &src);
        assert_eq!(a, b);
    }
}

#[test]
fn unimplemented_variants_are_reported() {
    let err = new(&[0u8; 12], SpeckParameters::Speck96_96).err().unwrap();
    assert_eq!(err, Error::NotImplemented(SpeckParameters::Speck96_96));
    assert_eq!(err.to_string(), "Speck96/96 is not implemented");

    let err = new(&[0u8; 16], SpeckParameters::Speck96_96).err().unwrap();
    assert_eq!(err, Error::InvalidKeyLength);

    let err: Box<dyn std::error::Error> = Box::new(Error::InvalidKeyLength);
    assert_eq!(err.to_string(), "invalid key length");
}

#[test]
fn shared_between_threads() {
    let key = dehex("0f0e0d0c0b0a09080706050403020100");
    let cipher: Arc<dyn BlockCipher + Send + Sync> =
        Arc::from(new(&key, SpeckParameters::Speck128_128).unwrap());

    let handles: Vec<_> = (0..4u8)
        .map(|t| {
            let cipher = Arc::clone(&cipher);
            thread::spawn(move || {
                for i in 0..100u8 {
                    let pt = [t ^ i; 16];
                    let mut ct = [0u8; 16];
                    let mut out = [0u8; 16];
                    cipher.encrypt(&mut ct, &pt);
                    cipher.decrypt(&mut out, &ct);
                    assert_eq!(out, pt);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut block = dehex("6c617669757165207469206564616d20");
    cipher.encrypt_in_place(&mut block);
    assert_eq!(block, dehex("a65d9851797832657860fedf5c570d18"));
}
