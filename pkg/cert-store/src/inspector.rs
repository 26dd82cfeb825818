use openssl::nid::Nid;
use openssl::x509::X509;

use crate::error::CertStoreError;

/// Everything the directory resolver needs to pull out of a leaf
/// certificate once it is known to be trust-chain valid (spec §4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    pub serial: String,
    pub issuer: String,
    pub subject: String,
}

/// Renders the certificate's serial number the way `BN_bn2hex` does:
/// uppercase hex, no leading zero stripped beyond the minimal
/// representation OpenSSL itself produces.
pub fn serial(cert: &X509) -> Result<String, CertStoreError> {
    let bn = cert.serial_number().to_bn()?;
    Ok(bn.to_hex_str()?.to_string())
}

/// Renders a certificate name the way `X509_NAME_print_ex(...,
/// XN_FLAG_RFC2253)` does: comma-separated `attr=value` RDNs, leaf
/// first, each value escaped per RFC 2253 §2.4.
///
/// `X509NameRef::entries()` walks the name in encoding order, which is
/// root-first; RFC 2253 prints leaf-first, so the collected pairs are
/// reversed before joining.
fn rfc2253_name(name: &openssl::x509::X509NameRef) -> String {
    let mut rdns: Vec<String> = name
        .entries()
        .map(|entry| {
            let attr = short_name(&entry);
            let value = entry.data().as_utf8().map(|s| s.to_string()).unwrap_or_default();
            format!("{attr}={}", escape_rfc2253_value(&value))
        })
        .collect();
    rdns.reverse();
    rdns.join(",")
}

fn short_name(entry: &openssl::x509::X509NameEntryRef) -> String {
    match entry.object().nid() {
        Nid::COMMONNAME => "CN".to_string(),
        Nid::ORGANIZATIONNAME => "O".to_string(),
        Nid::ORGANIZATIONALUNITNAME => "OU".to_string(),
        Nid::COUNTRYNAME => "C".to_string(),
        Nid::LOCALITYNAME => "L".to_string(),
        Nid::STATEORPROVINCENAME => "ST".to_string(),
        Nid::DOMAINCOMPONENT => "DC".to_string(),
        Nid::USERID => "UID".to_string(),
        Nid::EMAILADDRESS => "emailAddress".to_string(),
        other => other
            .short_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// Escapes a single RDN value per RFC 2253 §2.4: a leading `#` or
/// space, a trailing space, and the characters `,+"\<>;` each get a
/// backslash. Embedded NUL is escaped as `\00` since a bare NUL cannot
/// round-trip through the rest of the pipeline (LDAP filters, log
/// lines) unescaped.
fn escape_rfc2253_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let chars: Vec<char> = value.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        let is_first = i == 0;
        let is_last = i == chars.len() - 1;
        match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '#' if is_first => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_first || is_last => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\00"),
            _ => out.push(c),
        }
    }
    out
}

/// Extracts serial, issuer, and subject in one pass.
pub fn inspect(cert: &X509) -> Result<CertificateInfo, CertStoreError> {
    Ok(CertificateInfo {
        serial: serial(cert)?,
        issuer: rfc2253_name(cert.issuer_name()),
        subject: rfc2253_name(cert.subject_name()),
    })
}

/// Extracts the certificate's RSA public key, ready for the SSH
/// key-serializer pipeline. Non-RSA keys are rejected up front — the
/// wire format this store produces only covers `ssh-rsa` (spec §4.1).
pub fn rsa_public_key(cert: &X509) -> Result<ssh_key::RsaPublicKey, CertStoreError> {
    let pkey = cert.public_key()?;
    let rsa = pkey.rsa().map_err(|_| {
        log::warn!("certificate public key is not RSA; only ssh-rsa is supported in this revision");
        CertStoreError::UnsupportedKeyType
    })?;

    let modulus = rsa.n().to_vec();
    let exponent = rsa.e().to_vec();
    ssh_key::RsaPublicKey::new(modulus, exponent).map_err(|_| {
        log::warn!("certificate RSA key failed the modulus/exponent invariant check");
        CertStoreError::UnsupportedKeyType
    })
}
