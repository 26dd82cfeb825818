use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("rsa public key is empty or has modulus <= exponent")]
    InvalidRsaKey,
    #[error("keytype must not be empty")]
    EmptyKeytype,
    #[error("unknown digest algorithm '{0}'")]
    UnknownDigest(String),
}
