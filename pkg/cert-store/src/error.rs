use thiserror::Error;

#[derive(Debug, Error)]
pub enum CertStoreError {
    #[error("failed to construct trust anchor set")]
    InitFailed,

    #[error("failed to load PEM certificates/CRLs from the store directory")]
    LoadFailed,

    #[error("failed to set certificate store verification flags")]
    FlagsFailed,

    #[error("certificate has an unsupported key type (only RSA is accepted)")]
    UnsupportedKeyType,

    #[error("openssl error: {0}")]
    Crypto(#[from] openssl::error::ErrorStack),
}
