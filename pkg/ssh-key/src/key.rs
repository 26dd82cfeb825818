use crate::blob::{encode_ssh_key, serialize_rsa, KEYTYPE_SSH_RSA};
use crate::error::KeyError;
use crate::fingerprint::{fingerprint, DigestAlgorithm};
use crate::rsa_key::RsaPublicKey;

/// `(keytype, base64(blob))`, ready to be written as the first two
/// fields of an `authorized_keys` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SshKey {
    pub keytype: String,
    pub data: String,
}

/// Both fingerprints, derived from the same blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyFingerprints {
    pub md5_hex_colon: String,
    pub sha256_b64_unpadded: String,
}

/// Runs the full key-serializer pipeline for an RSA key: wire-format
/// encode, base64 the result, and fingerprint it both ways.
pub fn build_ssh_rsa_key(rsa: &RsaPublicKey) -> Result<(SshKey, KeyFingerprints), KeyError> {
    let blob = serialize_rsa(KEYTYPE_SSH_RSA, rsa)?;

    let ssh_key = SshKey {
        keytype: KEYTYPE_SSH_RSA.to_string(),
        data: encode_ssh_key(&blob),
    };
    let fingerprints = KeyFingerprints {
        md5_hex_colon: fingerprint(&blob, DigestAlgorithm::Md5),
        sha256_b64_unpadded: fingerprint(&blob, DigestAlgorithm::Sha256),
    };

    Ok((ssh_key, fingerprints))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_key_and_fingerprints_together() {
        let rsa = RsaPublicKey::new(vec![0x7F, 0x11, 0x22, 0x33], vec![0x01, 0x00, 0x01]).unwrap();
        let (ssh_key, fingerprints) = build_ssh_rsa_key(&rsa).unwrap();

        assert_eq!(ssh_key.keytype, "ssh-rsa");
        assert!(!ssh_key.data.is_empty());
        assert!(fingerprints.md5_hex_colon.contains(':'));
        assert!(!fingerprints.sha256_b64_unpadded.contains('='));
    }
}
