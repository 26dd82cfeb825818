use std::path::PathBuf;
use std::time::Duration;

use common::secret::Secret;

/// LDAP search scope, mirroring `ldap3::Scope` at the config boundary
/// so callers constructing a [`ResolverConfig`] don't need the
/// transport crate as a direct dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Base,
    OneLevel,
    Subtree,
}

impl From<SearchScope> for ldap3::Scope {
    fn from(scope: SearchScope) -> Self {
        match scope {
            SearchScope::Base => ldap3::Scope::Base,
            SearchScope::OneLevel => ldap3::Scope::OneLevel,
            SearchScope::Subtree => ldap3::Scope::Subtree,
        }
    }
}

/// Everything the resolver needs to run one login's worth of LDAP
/// lookups (spec §4.5, "Configuration inputs (enumerated)"). The
/// config-file parser that fills this struct in from disk is out of
/// scope; tests and callers construct it directly.
pub struct ResolverConfig {
    pub ldap_uri: String,
    pub ldap_starttls: bool,
    pub ldap_bind_dn: String,
    pub ldap_bind_pwd: Secret,
    pub cacerts_dir: PathBuf,

    pub ldap_server_base_dn: String,
    pub ldap_server_search_scope: SearchScope,
    pub ldap_server_uid_attr: String,
    pub server_uid: String,
    pub ldap_server_access_profile_attr: String,

    pub ldap_provider_uid_attr: String,
    pub ldap_provider_cert_attr: String,

    pub ldap_target_group_attr: String,
    pub ldap_target_uid_attr: String,

    pub ldap_search_timeout: Duration,
}
