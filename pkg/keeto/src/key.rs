use openssl::x509::X509;
use ssh_key::{KeyFingerprints, SshKey};

/// Everything needed to emit one `authorized_keys` entry for a single
/// certificate (spec §3, "KeetoKey"): the certificate it came from,
/// its wire-format key and fingerprints, and the inspector's rendered
/// names.
#[derive(Clone)]
pub struct KeetoKey {
    pub certificate: X509,
    pub ssh_key: SshKey,
    pub fingerprints: KeyFingerprints,
    pub issuer: String,
    pub subject: String,
    pub serial: String,
}

impl KeetoKey {
    /// Runs the Inspector and Key Serializer over a certificate that
    /// has already passed the Validator.
    pub fn from_certificate(cert: &X509) -> Result<Self, crate::error::KeetoError> {
        let info = cert_store::inspect(cert)?;
        let rsa = cert_store::rsa_public_key(cert)?;
        let (ssh_key, fingerprints) = ssh_key::build_ssh_rsa_key(&rsa)?;

        Ok(KeetoKey {
            certificate: cert.clone(),
            ssh_key,
            fingerprints,
            issuer: info.issuer,
            subject: info.subject,
            serial: info.serial,
        })
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
    use openssl::x509::{X509Builder, X509NameBuilder};

    fn self_signed(cn: &str) -> X509 {
        let rsa = Rsa::generate(2048).unwrap();
        let pkey = PKey::from_rsa(rsa).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", cn).unwrap();
        let name = name.build();

        let mut builder = X509Builder::new().unwrap();
        builder.set_version(2).unwrap();
        builder
            .set_serial_number(&Asn1Integer::from_bn(&BigNum::from_u32(7).unwrap()).unwrap())
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

    #[test]
    fn builds_a_keeto_key_from_a_certificate() {
        let cert = self_signed("provider.example");
        let key = KeetoKey::from_certificate(&cert).unwrap();

        assert_eq!(key.ssh_key.keytype, "ssh-rsa");
        assert!(key.subject.contains("CN=provider.example"));
        assert!(!key.serial.is_empty());
        assert!(key.fingerprints.md5_hex_colon.contains(':'));
    }
}
