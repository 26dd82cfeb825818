use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeetoError {
    #[error(transparent)]
    Resolver(#[from] directory::ResolverError),

    #[error(transparent)]
    CertStore(#[from] cert_store::CertStoreError),

    #[error(transparent)]
    Key(#[from] ssh_key::KeyError),
}
