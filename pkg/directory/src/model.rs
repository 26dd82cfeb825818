use openssl::x509::X509;

/// An LDAP entry that owns a certificate and can present it for its
/// own `uid` (spec §3, "KeyProvider").
#[derive(Debug, Clone)]
pub struct KeyProvider {
    pub dn: String,
    pub uid: String,
    pub certificate: Option<X509>,
}

/// Optional `authorized_keys` line decorations read off the keystore
/// options entry (spec §3, "KeystoreOptions").
#[derive(Debug, Clone, Default)]
pub struct KeystoreOptions {
    pub dn: String,
    pub from_option: Option<String>,
    pub command_option: Option<String>,
}

/// A profile that authorizes its own key-provider's uid.
///
/// Carries both the DN fields spec.md's data model names and the
/// materialized provider/options the resolver produces along the way
/// — nothing downstream needs to re-fetch them by DN.
#[derive(Debug, Clone)]
pub struct DirectAccessProfile {
    pub dn: String,
    pub name: String,
    pub key_provider_dn: String,
    pub keystore_options_dn: String,
    pub provider: KeyProvider,
    pub keystore_options: KeystoreOptions,
}

/// A profile that authorizes any member of a target group, granting
/// access to a pool of providers' keys.
#[derive(Debug, Clone)]
pub struct AccessOnBehalfProfile {
    pub dn: String,
    pub name: String,
    pub target_keystore_group_dn: String,
    pub key_provider_group_dn: String,
    pub keystore_options_dn: String,
    pub providers: Vec<KeyProvider>,
    pub keystore_options: KeystoreOptions,
}

/// The resolution context for one login attempt (spec §3,
/// "KeetoInfo"). Profile order mirrors LDAP return order; no
/// reordering is performed anywhere in the pipeline.
#[derive(Debug, Clone)]
pub struct KeetoInfo {
    pub login_uid: String,
    pub server_dn: String,
    pub ldap_online: bool,
    pub direct_profiles: Vec<DirectAccessProfile>,
    pub onbehalf_profiles: Vec<AccessOnBehalfProfile>,
}

impl KeetoInfo {
    pub fn offline(login_uid: impl Into<String>) -> Self {
        KeetoInfo {
            login_uid: login_uid.into(),
            server_dn: String::new(),
            ldap_online: false,
            direct_profiles: Vec::new(),
            onbehalf_profiles: Vec::new(),
        }
    }
}

/// A profile classified by object class, before it is known which
/// kind it materializes into. An object tagged with neither the DAP
/// nor AOBP object class is `Unknown` and is dropped with a log
/// record (spec §4.5, "Classification precedence").
pub enum ClassifiedProfile {
    Direct { dn: String },
    OnBehalf { dn: String },
    Unknown { dn: String },
}
