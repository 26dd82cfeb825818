use openssl::stack::Stack;
use openssl::x509::{X509PurposeId, X509StoreContext, X509};

use crate::error::CertStoreError;
use crate::store::CertificateStore;

/// Outcome of a chain validation: whether the certificate is trusted,
/// and — if not — the OpenSSL verify-error string for the failure
/// (spec §4.3, "Validation result").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub trusted: bool,
    pub error: String,
}

/// Validates `cert` against the process-wide trust anchor set.
///
/// Mirrors `keeto_validate_certificate()`: an `X509_STORE_CTX` is
/// initialized against an empty untrusted-chain stack (the client
/// presents a single leaf certificate, not a chain), the verification
/// purpose is pinned to SSL client, and `X509_verify_cert()` decides
/// the outcome. CRL checking, if enabled, was already wired into the
/// store's flags at `init` time and applies here automatically.
pub fn validate(store: &CertificateStore, cert: &X509) -> Result<ValidationResult, CertStoreError> {
    let mut ctx = X509StoreContext::new()?;
    let untrusted = Stack::<X509>::new()?;

    let trusted = ctx.init(store.as_ref(), cert, &untrusted, |ctx| {
        ctx.param_mut().set_purpose(X509PurposeId::SSL_CLIENT)?;
        ctx.verify_cert()
    })?;

    let error = if trusted {
        String::new()
    } else {
        let msg = ctx.error().error_string().to_string();
        log::warn!("certificate rejected: {msg}");
        msg
    };

    Ok(ValidationResult { trusted, error })
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
    use openssl::x509::X509NameBuilder;

    fn self_signed(cn: &str) -> (X509, PKey<openssl::pkey::Private>) {
        let rsa = Rsa::generate(2048).unwrap();
        let pkey = PKey::from_rsa(rsa).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", cn).unwrap();
        let name = name.build();

        let mut builder = openssl::x509::X509Builder::new().unwrap();
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
        let cert = builder.build();

        (cert, pkey)
    }

    fn store_trusting(cert: &X509) -> CertificateStore {
        let mut builder = X509StoreBuilder::new().unwrap();
        builder.add_cert(cert.clone()).unwrap();
        CertificateStore::for_testing(builder)
    }

    #[test]
    fn trusts_a_cert_present_in_the_store() {
        let (cert, _key) = self_signed("trusted.example");
        let store = store_trusting(&cert);

        let result = validate(&store, &cert).unwrap();
        assert!(result.trusted);
        assert!(result.error.is_empty());
    }

    #[test]
    fn rejects_a_cert_absent_from_the_store() {
        let (cert, _key) = self_signed("untrusted.example");
        let (other, _) = self_signed("unrelated-anchor.example");
        let store = store_trusting(&other);

        let result = validate(&store, &cert).unwrap();
        assert!(!result.trusted);
        assert!(!result.error.is_empty());
    }
}
