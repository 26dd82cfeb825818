use crate::error::KeyError;

/// An RSA public key as a (modulus, exponent) pair of arbitrary
/// precision non-negative integers, each stored as its minimal
/// big-endian byte representation (no leading zero bytes, unless the
/// value is zero itself).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    modulus: Vec<u8>,
    exponent: Vec<u8>,
}

impl RsaPublicKey {
    /// Builds a key from minimal big-endian byte representations of
    /// the modulus and exponent (e.g. as returned by
    /// `openssl::bn::BigNumRef::to_vec`).
    ///
    /// Fails if either value is empty or if `modulus <= exponent`.
    pub fn new(modulus: Vec<u8>, exponent: Vec<u8>) -> Result<Self, KeyError> {
        if modulus.is_empty() || exponent.is_empty() {
            return Err(KeyError::InvalidRsaKey);
        }
        if compare_big_endian(&modulus, &exponent) != std::cmp::Ordering::Greater {
            return Err(KeyError::InvalidRsaKey);
        }
        Ok(Self { modulus, exponent })
    }

    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }
}

/// Compares two minimal big-endian byte strings as non-negative
/// integers: shorter is smaller, and among equal lengths the usual
/// lexicographic byte order applies.
fn compare_big_endian(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
