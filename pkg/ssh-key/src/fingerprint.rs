use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use md5::{Digest, Md5};
use sha2::Sha256;

use crate::blob::SshKeyBlob;
use crate::error::KeyError;

/// The digest algorithms fingerprints can be computed with. Closed by
/// construction — there's no runtime "unknown algorithm" case here;
/// that only arises at [`DigestAlgorithm::parse`], where a string
/// (e.g. from a config file) names an algorithm that isn't one of
/// these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Parses an algorithm name as it might appear in a config file or
    /// on a command line (`ssh-keygen -E <algo>` spelling). This is
    /// the boundary where `KeyError::UnknownDigest` is actually
    /// reachable.
    pub fn parse(name: &str) -> Result<Self, KeyError> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" => Ok(Self::Sha256),
            other => Err(KeyError::UnknownDigest(other.to_string())),
        }
    }
}

/// Computes the `ssh-keygen -l`-compatible fingerprint of a key blob.
pub fn fingerprint(blob: &SshKeyBlob, algo: DigestAlgorithm) -> String {
    match algo {
        DigestAlgorithm::Md5 => {
            let digest = Md5::digest(blob.as_bytes());
            common::colon_hex(&digest)
        }
        DigestAlgorithm::Sha256 => {
            let digest = Sha256::digest(blob.as_bytes());
            BASE64_STANDARD.encode(digest).trim_end_matches('=').to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_fingerprint_of_abc() {
        let blob = SshKeyBlob::from_raw(b"abc".to_vec());
        let fp = fingerprint(&blob, DigestAlgorithm::Md5);
        assert_eq!(fp, "90:01:50:98:3c:d2:4f:b0:d6:96:3f:7d:28:e1:7f:72");
        assert_eq!(fp.len(), 47);
    }

    #[test]
    fn sha256_fingerprint_of_abc_has_padding_stripped() {
        let blob = SshKeyBlob::from_raw(b"abc".to_vec());
        let fp = fingerprint(&blob, DigestAlgorithm::Sha256);
        assert_eq!(fp, "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0");
        assert_eq!(fp.len(), 43);
        assert!(!fp.contains('='));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let blob = SshKeyBlob::from_raw(b"some ssh key blob bytes".to_vec());
        assert_eq!(
            fingerprint(&blob, DigestAlgorithm::Md5),
            fingerprint(&blob, DigestAlgorithm::Md5)
        );
        assert_eq!(
            fingerprint(&blob, DigestAlgorithm::Sha256),
            fingerprint(&blob, DigestAlgorithm::Sha256)
        );
    }

    #[test]
    fn parse_accepts_known_names_case_insensitively() {
        assert_eq!(DigestAlgorithm::parse("MD5"), Ok(DigestAlgorithm::Md5));
        assert_eq!(DigestAlgorithm::parse("sha256"), Ok(DigestAlgorithm::Sha256));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(
            DigestAlgorithm::parse("sha1"),
            Err(KeyError::UnknownDigest("sha1".to_string()))
        );
    }
}
