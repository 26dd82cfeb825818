//! LDAP-driven access-profile resolution (spec §4.5).
//!
//! Wraps `ldap3`'s synchronous client in the same single-threaded,
//! blocking-I/O model the original resolver used against OpenLDAP's C
//! API: one connection per login, bind, a handful of base-scope
//! searches, unbind.

pub mod config;
pub mod error;
pub mod model;
pub mod relevance;
mod resolver;
mod schema;

pub use config::{ResolverConfig, SearchScope};
pub use error::ResolverError;
pub use model::{
    AccessOnBehalfProfile, ClassifiedProfile, DirectAccessProfile, KeetoInfo, KeyProvider,
    KeystoreOptions,
};
pub use resolver::resolve;
