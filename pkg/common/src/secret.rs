//! Password hygiene helpers.
//!
//! The bind password must be wiped the instant the bind call returns,
//! success or failure, and that wipe must survive dead-store
//! elimination — an ordinary `for b in buf { *b = 0 }` loop can be
//! optimized away by the compiler once it proves the write is never
//! observed again. `zeroize` guarantees the write isn't elided.

use zeroize::Zeroize;

/// A password (or other short-lived secret) that is guaranteed to be
/// zeroized either explicitly via [`Secret::wipe`] or implicitly when
/// dropped.
pub struct Secret(String);

impl Secret {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Overwrites the secret's bytes with zero immediately. Safe to
    /// call more than once.
    pub fn wipe(&mut self) {
        self.0.zeroize();
    }

    #[cfg(test)]
    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.wipe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wipe_zeroes_all_bytes() {
        let mut secret = Secret::new("hunter2".to_string());
        secret.wipe();
        assert!(secret.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn wipe_is_idempotent() {
        let mut secret = Secret::new("hunter2".to_string());
        secret.wipe();
        secret.wipe();
        assert!(secret.as_bytes().iter().all(|&b| b == 0));
    }
}
