pub mod dn;
pub mod ldap_filter;
pub mod secret;

/// Renders a byte slice as lowercase hex octets joined by `:`, matching
/// `ssh-keygen -l`'s MD5 fingerprint format.
pub fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
