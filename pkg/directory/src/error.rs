use thiserror::Error;

/// Errors the resolver surfaces upward. Matches the fatal/advisory
/// split in spec §7: a bind failure is advisory and never constructs
/// one of these (the caller sees `ldap_online = false` and an empty
/// key set instead); every variant here is a failure at a required
/// step, and is fatal to the login attempt.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("failed to connect to LDAP server: {0}")]
    ConnectFailed(#[source] ldap3::LdapError),

    #[error("server object {0} not found under the configured base DN")]
    ServerNotFound(String),

    #[error("LDAP search failed: {0}")]
    SearchFailed(#[source] ldap3::LdapError),

    #[error("search filter could not be built: {0}")]
    Filter(#[from] common::ldap_filter::FilterError),

    #[error("malformed distinguished name: {0}")]
    Dn(#[from] common::dn::DnError),
}
