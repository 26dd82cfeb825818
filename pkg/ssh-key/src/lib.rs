//! SSH wire-format key serialization and fingerprinting (spec §4.1).
//!
//! Pure and deterministic: nothing in this crate touches the network,
//! a file, or LDAP. It only knows how to turn an RSA public key into
//! the bytes OpenSSH expects and how to fingerprint those bytes.

mod blob;
mod error;
mod fingerprint;
mod key;
mod rsa_key;

pub use blob::{encode_ssh_key, serialize_rsa, SshKeyBlob, KEYTYPE_SSH_RSA};
pub use error::KeyError;
pub use fingerprint::{fingerprint, DigestAlgorithm};
pub use key::{build_ssh_rsa_key, KeyFingerprints, SshKey};
pub use rsa_key::RsaPublicKey;
