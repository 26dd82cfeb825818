use std::path::Path;
use std::sync::{Arc, Mutex};

use openssl::ssl::SslFiletype;
use openssl::x509::store::{X509Lookup, X509Store, X509StoreBuilder};
use openssl::x509::verify::X509VerifyFlags;

use crate::error::CertStoreError;

/// The process-wide trust anchor set (spec §4.2). Cheap to clone — it
/// just bumps the refcount on the underlying `X509_STORE`.
///
/// Modeled as an explicit, init-once value rather than mutable
/// module-level state (spec §9, "Process-wide certificate store"): the
/// only global here is the [`Mutex`] cell that makes repeated calls to
/// [`init`] idempotent.
#[derive(Clone)]
pub struct CertificateStore {
    inner: Arc<X509Store>,
}

impl CertificateStore {
    pub(crate) fn as_ref(&self) -> &X509Store {
        &self.inner
    }

    /// Builds a store directly from a caller-assembled `X509Store`
    /// builder, bypassing the hashed-directory loader in [`init`].
    /// Intended for tests — this crate's own and downstream crates'
    /// alike — that need a store trusting a specific in-memory
    /// certificate without writing it to a hashed CA directory first.
    pub fn for_testing(builder: X509StoreBuilder) -> Self {
        CertificateStore {
            inner: Arc::new(builder.build()),
        }
    }
}

static CELL: Mutex<Option<CertificateStore>> = Mutex::new(None);

/// Initializes the process-wide certificate store from a hashed PEM
/// directory of CA certificates (and, if present, CRLs).
///
/// Idempotent: once a store exists, later calls return a clone of it
/// without re-reading the directory, regardless of the arguments
/// passed this time — matching `init_cert_store()`'s
/// `if (cert_store != NULL) return KEETO_OK;` short-circuit.
pub fn init(cert_store_dir: &Path, check_crl: bool) -> Result<CertificateStore, CertStoreError> {
    let mut cell = CELL.lock().unwrap();
    if let Some(existing) = cell.as_ref() {
        return Ok(existing.clone());
    }

    let store = build_store(cert_store_dir, check_crl)?;
    let handle = CertificateStore {
        inner: Arc::new(store),
    };
    *cell = Some(handle.clone());
    Ok(handle)
}

/// Releases the process-wide store. Safe to call if never initialized.
pub fn free() {
    let mut cell = CELL.lock().unwrap();
    *cell = None;
}

fn build_store(cert_store_dir: &Path, check_crl: bool) -> Result<X509Store, CertStoreError> {
    let mut builder = X509StoreBuilder::new().map_err(|_| CertStoreError::InitFailed)?;

    let dir = cert_store_dir
        .to_str()
        .ok_or(CertStoreError::LoadFailed)?;
    let lookup = builder
        .add_lookup(X509Lookup::hash_dir())
        .map_err(|_| CertStoreError::LoadFailed)?;
    lookup
        .add_dir(dir, SslFiletype::PEM)
        .map_err(|_| CertStoreError::LoadFailed)?;

    if check_crl {
        builder
            .set_flags(X509VerifyFlags::CRL_CHECK | X509VerifyFlags::CRL_CHECK_ALL)
            .map_err(|_| CertStoreError::FlagsFailed)?;
    }

    Ok(builder.build())
}
