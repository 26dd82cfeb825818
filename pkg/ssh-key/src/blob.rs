use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::error::KeyError;
use crate::rsa_key::RsaPublicKey;

/// The only keytype this revision ever emits.
pub const KEYTYPE_SSH_RSA: &str = "ssh-rsa";

/// A byte sequence in the SSH public-key wire format: each field is a
/// 32-bit big-endian length prefix followed by its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SshKeyBlob(Vec<u8>);

impl SshKeyBlob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Wraps raw bytes as a blob without applying the wire-format
    /// encoding. Used by callers (and tests) that already hold an
    /// encoded blob, or that want to fingerprint arbitrary bytes.
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

fn write_field(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Writes an arbitrary-precision non-negative integer field: a single
/// `0x00` pad byte is prepended when the value's top byte has its MSB
/// set, so a two's-complement reader can't mistake it for negative.
/// The length prefix written by [`write_field`] already accounts for
/// the pad byte since it's prepended to `bytes` first.
fn write_integer_field(out: &mut Vec<u8>, value: &[u8]) {
    if msb_set(value) {
        let mut padded = Vec::with_capacity(value.len() + 1);
        padded.push(0x00);
        padded.extend_from_slice(value);
        write_field(out, &padded);
    } else {
        write_field(out, value);
    }
}

fn msb_set(bytes: &[u8]) -> bool {
    matches!(bytes.first(), Some(b) if b & 0x80 != 0)
}

/// Serializes an RSA public key into the SSH wire-format blob:
/// keytype, exponent, modulus, each as a length-prefixed field.
pub fn serialize_rsa(keytype: &str, key: &RsaPublicKey) -> Result<SshKeyBlob, KeyError> {
    if keytype.is_empty() {
        return Err(KeyError::EmptyKeytype);
    }

    let mut blob = Vec::new();
    write_field(&mut blob, keytype.as_bytes());
    write_integer_field(&mut blob, key.exponent());
    write_integer_field(&mut blob, key.modulus());
    Ok(SshKeyBlob(blob))
}

/// Base64-encodes the blob, padding retained, for use as the second
/// field of an SSH `authorized_keys` line.
pub fn encode_ssh_key(blob: &SshKeyBlob) -> String {
    BASE64_STANDARD.encode(blob.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be_bytes(value: u32) -> [u8; 4] {
        value.to_be_bytes()
    }

    #[test]
    fn blob_has_no_pad_bytes_when_msb_unset() {
        // exponent 0x010001 (3 bytes, MSB unset), modulus starts 0x7F (MSB
        // unset), 128 bytes total.
        let mut modulus = vec![0x7Fu8, 0x11];
        modulus.extend(std::iter::repeat(0xAAu8).take(126));
        let key = RsaPublicKey::new(modulus.clone(), vec![0x01, 0x00, 0x01]).unwrap();

        let blob = serialize_rsa(KEYTYPE_SSH_RSA, &key).unwrap();
        let bytes = blob.as_bytes();

        assert_eq!(&bytes[0..4], &be_bytes(7));
        assert_eq!(&bytes[4..11], b"ssh-rsa");
        assert_eq!(&bytes[11..15], &be_bytes(3));
        assert_eq!(&bytes[15..18], &[0x01, 0x00, 0x01]);
        assert_eq!(&bytes[18..22], &be_bytes(128));
        assert_eq!(&bytes[22..22 + 128], &modulus[..]);
        assert_eq!(
            bytes.len(),
            4 + 7 + 4 + 3 + 4 + 128,
            "no pad bytes should have been inserted"
        );
    }

    #[test]
    fn blob_pads_modulus_with_msb_set() {
        let mut modulus = vec![0xC3u8];
        modulus.extend(std::iter::repeat(0xAAu8).take(255));
        let key = RsaPublicKey::new(modulus.clone(), vec![0x01, 0x00, 0x01]).unwrap();

        let blob = serialize_rsa(KEYTYPE_SSH_RSA, &key).unwrap();
        let bytes = blob.as_bytes();

        // keytype field: 4 + 7. exponent field (no pad, MSB unset): 4 + 3.
        let modulus_field_start = 4 + 7 + 4 + 3;
        assert_eq!(
            &bytes[modulus_field_start..modulus_field_start + 4],
            &be_bytes(257)
        );
        assert_eq!(bytes[modulus_field_start + 4], 0x00);
        assert_eq!(bytes[modulus_field_start + 5], 0xC3);
    }

    #[test]
    fn rejects_empty_keytype() {
        let key = RsaPublicKey::new(vec![0x7F, 0x01], vec![0x01]).unwrap();
        assert_eq!(serialize_rsa("", &key), Err(KeyError::EmptyKeytype));
    }

    #[test]
    fn encode_retains_padding() {
        let blob = SshKeyBlob::from_raw(b"abc".to_vec());
        assert_eq!(encode_ssh_key(&blob), "YWJj");
    }
}
