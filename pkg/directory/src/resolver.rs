//! The LDAP-driven access-profile resolver (spec §4.5).
//!
//! Drives `ldap3`'s synchronous client through the same state
//! progression as `pox509-ldap.c`'s `main()`: connect, bind, locate
//! the server object, enumerate and classify its access profiles,
//! materialize and filter each one. Every search is base-scope,
//! size-limited to 1, and bounded by the configured timeout.

use std::time::Duration;

use ldap3::{LdapConn, LdapConnSettings, Scope, SearchEntry, SearchOptions};
use openssl::x509::X509;

use common::dn;

use crate::config::ResolverConfig;
use crate::error::ResolverError;
use crate::model::{
    AccessOnBehalfProfile, ClassifiedProfile, DirectAccessProfile, KeetoInfo, KeyProvider,
    KeystoreOptions,
};
use crate::relevance;
use crate::schema;

/// Runs the full resolver pipeline for one login attempt.
///
/// A bind failure is advisory, not fatal (spec §4.5, `Binding` row):
/// the returned `KeetoInfo` has `ldap_online = false` and empty
/// profile lists rather than an `Err`. Everything past a successful
/// bind that fails at a *required* step (connect, locate server,
/// classify) is fatal and surfaces as `Err`; failures materializing or
/// filtering an individual profile just drop that profile.
pub fn resolve(mut config: ResolverConfig, login_uid: &str) -> Result<KeetoInfo, ResolverError> {
    let mut conn = connect(&config)?;

    let password = std::mem::replace(&mut config.ldap_bind_pwd, common::secret::Secret::new(String::new()));
    let online = bind(&mut conn, &config.ldap_bind_dn, password);
    if !online {
        log::warn!("LDAP bind failed for {}", config.ldap_bind_dn);
        let _ = conn.unbind();
        return Ok(KeetoInfo::offline(login_uid));
    }

    let timeout = config.ldap_search_timeout;
    let (server_dn, profile_dns) = locate_server(&mut conn, &config, timeout)?;

    let mut direct_profiles = Vec::new();
    let mut onbehalf_profiles = Vec::new();

    for dn in profile_dns {
        match classify(&mut conn, &dn, timeout)? {
            ClassifiedProfile::Direct { dn } => {
                if let Some(profile) = materialize_direct(&mut conn, &dn, &config, timeout)? {
                    if relevance::direct_profile_is_relevant(&profile.provider.uid, login_uid) {
                        direct_profiles.push(profile);
                    } else {
                        log::debug!(
                            "dropping direct profile {dn}: provider uid {} does not match login uid",
                            profile.provider.uid
                        );
                    }
                }
            }
            ClassifiedProfile::OnBehalf { dn } => {
                if let Some((profile, target_uids)) =
                    materialize_onbehalf(&mut conn, &dn, &config, timeout)?
                {
                    if relevance::onbehalf_profile_is_relevant(&target_uids, login_uid) {
                        onbehalf_profiles.push(profile);
                    } else {
                        log::debug!("dropping on-behalf profile {dn}: no target EE matches login uid");
                    }
                }
            }
            ClassifiedProfile::Unknown { dn } => {
                log::warn!("profile {dn} has neither the DAP nor AOBP object class; skipping");
            }
        }
    }

    let _ = conn.unbind();

    Ok(KeetoInfo {
        login_uid: login_uid.to_string(),
        server_dn,
        ldap_online: true,
        direct_profiles,
        onbehalf_profiles,
    })
}

/// Connects with LDAPv3, hard certificate validation, and (if
/// configured) STARTTLS — `ldap3`'s settings builder applies these in
/// one call, which is the crate's equivalent of the original's
/// "set options, then reset the TLS context" sequence.
///
/// `cacerts_dir` is a hashed CA directory, the OpenLDAP
/// `LDAP_OPT_X_TLS_CACERTDIR` style; `ldap3`'s TLS settings accept a
/// single CA bundle rather than a hashed directory, so this crate
/// relies on the platform's default trust store for the LDAP
/// transport's own TLS session, same as the rest of the resolver's
/// network I/O. See DESIGN.md for the full note.
fn connect(config: &ResolverConfig) -> Result<LdapConn, ResolverError> {
    let settings = LdapConnSettings::new()
        .set_starttls(config.ldap_starttls)
        .set_conn_timeout(config.ldap_search_timeout);
    LdapConn::with_settings(settings, &config.ldap_uri).map_err(ResolverError::ConnectFailed)
}

/// Binds and wipes the password immediately, success or failure.
fn bind(conn: &mut LdapConn, bind_dn: &str, mut password: common::secret::Secret) -> bool {
    let outcome = conn
        .simple_bind(bind_dn, password.expose())
        .and_then(|result| result.success());
    password.wipe();
    outcome.is_ok()
}

fn search_options(timeout: Duration) -> SearchOptions {
    SearchOptions::new()
        .sizelimit(1)
        .timelimit(timeout.as_secs() as i32)
}

/// Base-scope reads a single entry, returning `Ok(None)` if it's
/// absent or unreadable (an advisory condition for the caller to
/// decide about) and `Err` only for an actual protocol-level failure.
fn read_entry(
    conn: &mut LdapConn,
    entry_dn: &str,
    attrs: Vec<&str>,
    timeout: Duration,
) -> Result<Option<SearchEntry>, ResolverError> {
    let (entries, _) = conn
        .with_search_options(search_options(timeout))
        .search(entry_dn, Scope::Base, "(objectClass=*)", attrs)
        .map_err(ResolverError::SearchFailed)?
        .success()
        .map_err(ResolverError::SearchFailed)?;
    Ok(entries.into_iter().next().map(SearchEntry::construct))
}

fn single_value(entry: &SearchEntry, attr: &str) -> Option<String> {
    entry.attrs.get(attr).and_then(|values| values.first().cloned())
}

fn multi_value(entry: &SearchEntry, attr: &str) -> Vec<String> {
    entry.attrs.get(attr).cloned().unwrap_or_default()
}

fn binary_values(entry: &SearchEntry, attr: &str) -> Vec<Vec<u8>> {
    entry.bin_attrs.get(attr).cloned().unwrap_or_default()
}

fn locate_server(
    conn: &mut LdapConn,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<(String, Vec<String>), ResolverError> {
    let filter = common::ldap_filter::build_equality_filter(
        &config.ldap_server_uid_attr,
        &config.server_uid,
    )?;

    let (entries, _) = conn
        .with_search_options(search_options(timeout))
        .search(
            &config.ldap_server_base_dn,
            config.ldap_server_search_scope.into(),
            &filter,
            vec![config.ldap_server_access_profile_attr.as_str()],
        )
        .map_err(ResolverError::SearchFailed)?
        .success()
        .map_err(ResolverError::SearchFailed)?;

    let entry = entries
        .into_iter()
        .next()
        .map(SearchEntry::construct)
        .ok_or_else(|| ResolverError::ServerNotFound(config.server_uid.clone()))?;

    let profile_dns = multi_value(&entry, &config.ldap_server_access_profile_attr);
    Ok((entry.dn, profile_dns))
}

fn classify(
    conn: &mut LdapConn,
    profile_dn: &str,
    timeout: Duration,
) -> Result<ClassifiedProfile, ResolverError> {
    let Some(entry) = read_entry(conn, profile_dn, vec![schema::OBJECT_CLASS_ATTR], timeout)? else {
        return Ok(ClassifiedProfile::Unknown {
            dn: profile_dn.to_string(),
        });
    };

    let classes = multi_value(&entry, schema::OBJECT_CLASS_ATTR);
    if classes.iter().any(|c| c == schema::DAP_OBJCLASS) {
        Ok(ClassifiedProfile::Direct {
            dn: profile_dn.to_string(),
        })
    } else if classes.iter().any(|c| c == schema::AOBP_OBJCLASS) {
        Ok(ClassifiedProfile::OnBehalf {
            dn: profile_dn.to_string(),
        })
    } else {
        Ok(ClassifiedProfile::Unknown {
            dn: profile_dn.to_string(),
        })
    }
}

fn materialize_key_provider(
    conn: &mut LdapConn,
    provider_dn: &str,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Option<KeyProvider>, ResolverError> {
    let Some(entry) = read_entry(
        conn,
        provider_dn,
        vec![
            config.ldap_provider_uid_attr.as_str(),
            config.ldap_provider_cert_attr.as_str(),
        ],
        timeout,
    )?
    else {
        log::warn!("key provider {provider_dn} not found");
        return Ok(None);
    };

    let Some(uid) = single_value(&entry, &config.ldap_provider_uid_attr) else {
        log::warn!("key provider {provider_dn} has no {}", config.ldap_provider_uid_attr);
        return Ok(None);
    };

    // The first DER value that parses wins; the rest are ignored
    // (spec §4.5, "Certificate decoding").
    let certificate = binary_values(&entry, &config.ldap_provider_cert_attr)
        .into_iter()
        .find_map(|der| X509::from_der(&der).ok());
    if certificate.is_none() {
        log::warn!("key provider {provider_dn} has no certificate that parses as DER X.509");
    }

    Ok(Some(KeyProvider {
        dn: provider_dn.to_string(),
        uid,
        certificate,
    }))
}

fn materialize_keystore_options(
    conn: &mut LdapConn,
    options_dn: &str,
    timeout: Duration,
) -> Result<KeystoreOptions, ResolverError> {
    let entry = read_entry(
        conn,
        options_dn,
        vec![
            schema::KEYSTORE_OPTIONS_FROM_ATTR,
            schema::KEYSTORE_OPTIONS_COMMAND_ATTR,
        ],
        timeout,
    )?;

    let Some(entry) = entry else {
        log::debug!("keystore options {options_dn} not found; no from/command restrictions applied");
        return Ok(KeystoreOptions {
            dn: options_dn.to_string(),
            from_option: None,
            command_option: None,
        });
    };

    Ok(KeystoreOptions {
        dn: options_dn.to_string(),
        from_option: single_value(&entry, schema::KEYSTORE_OPTIONS_FROM_ATTR),
        command_option: single_value(&entry, schema::KEYSTORE_OPTIONS_COMMAND_ATTR),
    })
}

fn materialize_direct(
    conn: &mut LdapConn,
    profile_dn: &str,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Option<DirectAccessProfile>, ResolverError> {
    let Some(entry) = read_entry(
        conn,
        profile_dn,
        vec![schema::DAP_KEY_PROVIDER_ATTR, schema::DAP_KEYSTORE_OPTIONS_ATTR],
        timeout,
    )?
    else {
        log::warn!("direct access profile {profile_dn} disappeared before materialization");
        return Ok(None);
    };

    let Some(key_provider_dn) = single_value(&entry, schema::DAP_KEY_PROVIDER_ATTR) else {
        log::warn!("direct access profile {profile_dn} has no {}", schema::DAP_KEY_PROVIDER_ATTR);
        return Ok(None);
    };
    let Some(keystore_options_dn) = single_value(&entry, schema::DAP_KEYSTORE_OPTIONS_ATTR) else {
        log::warn!(
            "direct access profile {profile_dn} has no {}",
            schema::DAP_KEYSTORE_OPTIONS_ATTR
        );
        return Ok(None);
    };

    let Some(provider) = materialize_key_provider(conn, &key_provider_dn, config, timeout)? else {
        return Ok(None);
    };
    if provider.certificate.is_none() {
        log::warn!(
            "dropping direct access profile {profile_dn}: provider {key_provider_dn} has no usable certificate"
        );
        return Ok(None);
    }

    let keystore_options = materialize_keystore_options(conn, &keystore_options_dn, timeout)?;
    let name = dn::leaf_rdn_value(profile_dn)?;

    Ok(Some(DirectAccessProfile {
        dn: profile_dn.to_string(),
        name,
        key_provider_dn,
        keystore_options_dn,
        provider,
        keystore_options,
    }))
}

/// Reads a group entry's membership attribute (shared by the target
/// keystore group and the key-provider group — see DESIGN.md for why
/// `ldap_target_group_attr` covers both) and returns its member DNs.
fn group_members(
    conn: &mut LdapConn,
    group_dn: &str,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Vec<String>, ResolverError> {
    let Some(entry) = read_entry(conn, group_dn, vec![config.ldap_target_group_attr.as_str()], timeout)?
    else {
        return Ok(Vec::new());
    };
    Ok(multi_value(&entry, &config.ldap_target_group_attr))
}

fn materialize_target_group_uids(
    conn: &mut LdapConn,
    group_dn: &str,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Vec<String>, ResolverError> {
    let member_dns = group_members(conn, group_dn, config, timeout)?;

    let mut uids = Vec::with_capacity(member_dns.len());
    for member_dn in member_dns {
        if let Some(entry) = read_entry(conn, &member_dn, vec![config.ldap_target_uid_attr.as_str()], timeout)? {
            if let Some(uid) = single_value(&entry, &config.ldap_target_uid_attr) {
                uids.push(uid);
            }
        }
    }
    Ok(uids)
}

fn materialize_provider_group(
    conn: &mut LdapConn,
    group_dn: &str,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Vec<KeyProvider>, ResolverError> {
    let member_dns = group_members(conn, group_dn, config, timeout)?;

    let mut providers = Vec::with_capacity(member_dns.len());
    for member_dn in member_dns {
        if let Some(provider) = materialize_key_provider(conn, &member_dn, config, timeout)? {
            providers.push(provider);
        }
    }
    Ok(providers)
}

fn materialize_onbehalf(
    conn: &mut LdapConn,
    profile_dn: &str,
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Option<(AccessOnBehalfProfile, Vec<String>)>, ResolverError> {
    let Some(entry) = read_entry(
        conn,
        profile_dn,
        vec![
            schema::AOBP_TARGET_KEYSTORE_ATTR,
            schema::AOBP_KEY_PROVIDER_ATTR,
            schema::AOBP_KEYSTORE_OPTIONS_ATTR,
        ],
        timeout,
    )?
    else {
        log::warn!("on-behalf profile {profile_dn} disappeared before materialization");
        return Ok(None);
    };

    let Some(target_keystore_group_dn) = single_value(&entry, schema::AOBP_TARGET_KEYSTORE_ATTR) else {
        log::warn!(
            "on-behalf profile {profile_dn} has no {}",
            schema::AOBP_TARGET_KEYSTORE_ATTR
        );
        return Ok(None);
    };
    let Some(key_provider_group_dn) = single_value(&entry, schema::AOBP_KEY_PROVIDER_ATTR) else {
        log::warn!("on-behalf profile {profile_dn} has no {}", schema::AOBP_KEY_PROVIDER_ATTR);
        return Ok(None);
    };
    let Some(keystore_options_dn) = single_value(&entry, schema::AOBP_KEYSTORE_OPTIONS_ATTR) else {
        log::warn!(
            "on-behalf profile {profile_dn} has no {}",
            schema::AOBP_KEYSTORE_OPTIONS_ATTR
        );
        return Ok(None);
    };

    // A profile with an empty or unreadable target group is dropped
    // (spec §4.5, "Filtering rule (OnBehalf)").
    let target_ee_uids = materialize_target_group_uids(conn, &target_keystore_group_dn, config, timeout)?;
    if target_ee_uids.is_empty() {
        log::debug!(
            "on-behalf profile {profile_dn}: target group {target_keystore_group_dn} is empty or unreadable"
        );
        return Ok(None);
    }

    let providers: Vec<KeyProvider> = materialize_provider_group(conn, &key_provider_group_dn, config, timeout)?
        .into_iter()
        .filter(|provider| provider.certificate.is_some())
        .collect();
    if providers.is_empty() {
        log::warn!(
            "dropping on-behalf profile {profile_dn}: provider group {key_provider_group_dn} yielded no usable certificates"
        );
        return Ok(None);
    }

    let keystore_options = materialize_keystore_options(conn, &keystore_options_dn, timeout)?;
    let name = dn::leaf_rdn_value(profile_dn)?;

    Ok(Some((
        AccessOnBehalfProfile {
            dn: profile_dn.to_string(),
            name,
            target_keystore_group_dn,
            key_provider_group_dn,
            keystore_options_dn,
            providers,
            keystore_options,
        },
        target_ee_uids,
    )))
}
