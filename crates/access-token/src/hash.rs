use hmac::{Hmac, Mac};
use sha2::Sha512;

/// A keyed hash: the same key and data always give the same digest.
pub trait KeyedHash: Send + Sync {
    fn hash(&self, key: &[u8], data: &[u8]) -> Vec<u8>;
}

/// HMAC over SHA-512, producing a 64-byte digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha512;

impl KeyedHash for HmacSha512 {
    fn hash(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut mac =
            Hmac::<Sha512>::new_from_slice(key).expect("HMAC can take a key of any size");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}
