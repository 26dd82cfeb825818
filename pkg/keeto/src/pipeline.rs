use cert_store::CertificateStore;
use directory::{DirectAccessProfile, AccessOnBehalfProfile, KeyProvider, KeystoreOptions, ResolverConfig};

use crate::error::KeetoError;
use crate::key::KeetoKey;
use crate::options::render_authorized_keys_line;

/// Runs the full pipeline for one login attempt: Resolver → Validator
/// → Inspector → Key Serializer, in that order, and renders the
/// surviving certificates as `authorized_keys` lines.
///
/// Fail-closed (spec §7, "User-visible behavior"): an offline
/// directory or a resolver-level fatal error both collapse to "no
/// keys" rather than ever handing the SSH daemon a partial or stale
/// list — the difference is only that a fatal error is also surfaced
/// to the caller as `Err` for logging, while "ldap offline" is
/// advisory and returns `Ok(vec![])`.
///
/// Output order mirrors resolution order, Direct profiles first, then
/// OnBehalf (spec §5, "Ordering").
pub fn authorize(
    store: &CertificateStore,
    config: ResolverConfig,
    login_uid: &str,
) -> Result<Vec<String>, KeetoError> {
    let info = directory::resolve(config, login_uid)?;

    if !info.ldap_online {
        log::warn!("directory offline for login uid {login_uid}; returning no authorized keys");
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();

    for profile in &info.direct_profiles {
        lines.extend(authorize_direct(store, profile));
    }
    for profile in &info.onbehalf_profiles {
        lines.extend(authorize_onbehalf(store, profile));
    }

    Ok(lines)
}

fn authorize_direct(store: &CertificateStore, profile: &DirectAccessProfile) -> Vec<String> {
    authorize_provider(store, &profile.provider, &profile.keystore_options)
        .into_iter()
        .collect()
}

fn authorize_onbehalf(store: &CertificateStore, profile: &AccessOnBehalfProfile) -> Vec<String> {
    profile
        .providers
        .iter()
        .filter_map(|provider| authorize_provider(store, provider, &profile.keystore_options))
        .collect()
}

fn authorize_provider(
    store: &CertificateStore,
    provider: &KeyProvider,
    keystore_options: &KeystoreOptions,
) -> Option<String> {
    let cert = provider.certificate.as_ref()?;

    let result = match cert_store::validate(store, cert) {
        Ok(result) => result,
        Err(err) => {
            log::error!("certificate validation failed for provider {}: {err}", provider.dn);
            return None;
        }
    };
    if !result.trusted {
        log::warn!(
            "rejecting certificate for provider {}: {}",
            provider.dn,
            result.error
        );
        return None;
    }

    match KeetoKey::from_certificate(cert) {
        Ok(key) => Some(render_authorized_keys_line(&key.ssh_key, keystore_options)),
        Err(err) => {
            log::error!("failed to derive SSH key for provider {}: {err}", provider.dn);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::asn1::{Asn1Integer, Asn1Time};
    use openssl::bn::BigNum;
    use openssl::hash::MessageDigest;
    use openssl::pkey::PKey;
    use openssl::rsa::Rsa;
    use openssl::x509::store::X509StoreBuilder;
    use openssl::x509::{X509Builder, X509NameBuilder, X509};

    /// Installs `env_logger` so a test can eyeball the `log::warn!`/
    /// `log::error!` records this pipeline emits on rejection paths
    /// (`RUST_LOG=debug cargo test -- --nocapture`). Safe to call from
    /// more than one test; only the first call wins.
    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn self_signed(cn: &str) -> X509 {
        let rsa = Rsa::generate(2048).unwrap();
        let pkey = PKey::from_rsa(rsa).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", cn).unwrap();
        let name = name.build();

        let mut builder = X509Builder::new().unwrap();
        builder.set_version(2).unwrap();
        builder
            .set_serial_number(&Asn1Integer::from_bn(&BigNum::from_u32(1).unwrap()).unwrap())
            .unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(365).unwrap())
            .unwrap();
        builder.set_pubkey(&pkey).unwrap();
        builder.sign(&pkey, MessageDigest::sha256()).unwrap();
        builder.build()
    }

    fn store_trusting(cert: &X509) -> CertificateStore {
        let mut builder = X509StoreBuilder::new().unwrap();
        builder.add_cert(cert.clone()).unwrap();
        CertificateStore::for_testing(builder)
    }

    #[test]
    fn authorizes_a_trusted_provider() {
        let cert = self_signed("alice.example");
        let store = store_trusting(&cert);
        let provider = KeyProvider {
            dn: "uid=alice,ou=people,dc=example,dc=com".to_string(),
            uid: "alice".to_string(),
            certificate: Some(cert),
        };
        let options = KeystoreOptions::default();

        let line = authorize_provider(&store, &provider, &options).unwrap();
        assert!(line.starts_with("ssh-rsa "));
    }

    #[test]
    fn rejects_an_untrusted_provider() {
        init_logging();
        let cert = self_signed("mallory.example");
        let other = self_signed("unrelated-anchor.example");
        let store = store_trusting(&other);
        let provider = KeyProvider {
            dn: "uid=mallory,ou=people,dc=example,dc=com".to_string(),
            uid: "mallory".to_string(),
            certificate: Some(cert),
        };
        let options = KeystoreOptions::default();

        assert!(authorize_provider(&store, &provider, &options).is_none());
    }

    #[test]
    fn drops_a_provider_with_no_certificate() {
        init_logging();
        let cert = self_signed("anchor.example");
        let store = store_trusting(&cert);
        let provider = KeyProvider {
            dn: "uid=nocert,ou=people,dc=example,dc=com".to_string(),
            uid: "nocert".to_string(),
            certificate: None,
        };
        let options = KeystoreOptions::default();

        assert!(authorize_provider(&store, &provider, &options).is_none());
    }
}
