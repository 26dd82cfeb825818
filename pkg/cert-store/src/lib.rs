//! Certificate store, chain validator, and certificate inspector
//! (spec §4.2–§4.4).
//!
//! Wraps the `openssl` crate's `X509_STORE` machinery the way
//! `keeto-x509.c` drives libssl directly: a hashed CA directory, an
//! optional CRL-checking policy, and SSL-client-purpose chain
//! verification.

mod error;
mod inspector;
mod store;
mod validator;

pub use error::CertStoreError;
pub use inspector::{inspect, rsa_public_key, CertificateInfo};
pub use openssl::x509::store::X509StoreBuilder;
pub use store::{free, init, CertificateStore};
pub use validator::{validate, ValidationResult};
