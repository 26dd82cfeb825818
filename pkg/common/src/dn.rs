//! Minimal, hand-rolled distinguished-name splitting.
//!
//! We don't need a full RFC 4514 parser — just enough to split a DN
//! string into its comma-separated RDNs (respecting backslash escapes
//! and quoted values) and pull out the attribute/value pair of one of
//! them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DnError {
    #[error("empty distinguished name")]
    Empty,
    #[error("distinguished name has no '=' in its leaf RDN: {0}")]
    MissingEquals(String),
}

/// Splits a DN string into its RDN components, in the order they
/// appear in the string (leaf first, per RFC 4514/2253 notation).
///
/// A comma only ends an RDN if it isn't escaped (`\,`) and isn't inside
/// a double-quoted value.
pub fn split_rdns(dn: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in dn.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() || !parts.is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Splits a single RDN (`attr=value`, ignoring any `+`-joined
/// multi-valued components) into its attribute and value.
fn split_rdn_pair(rdn: &str) -> Result<(String, String), DnError> {
    let eq = rdn
        .find('=')
        .ok_or_else(|| DnError::MissingEquals(rdn.to_string()))?;
    let attr = rdn[..eq].trim().to_string();
    let value = rdn[eq + 1..].trim().to_string();
    Ok((attr, value))
}

/// Returns the (attribute, value) pair of the leaf RDN — the
/// left-most component of the DN string, i.e. the entry's own naming
/// attribute, which is the right-most node when a directory tree is
/// drawn root-to-leaf left-to-right. This is what `AccessProfile::name`
/// is derived from.
pub fn leaf_rdn(dn: &str) -> Result<(String, String), DnError> {
    let rdns = split_rdns(dn);
    let leaf = rdns.first().ok_or(DnError::Empty)?;
    split_rdn_pair(leaf)
}

/// Convenience wrapper returning just the leaf RDN's value, which is
/// the profile `name` per spec.
pub fn leaf_rdn_value(dn: &str) -> Result<String, DnError> {
    leaf_rdn(dn).map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_rdn_value_simple() {
        assert_eq!(
            leaf_rdn_value("cn=web-servers,ou=accessProfiles,dc=example,dc=com").unwrap(),
            "web-servers"
        );
    }

    #[test]
    fn leaf_rdn_value_single_component() {
        assert_eq!(leaf_rdn_value("cn=alice").unwrap(), "alice");
    }

    #[test]
    fn leaf_rdn_respects_escaped_comma() {
        let dn = r"cn=Smith\, John,ou=people,dc=example,dc=com";
        assert_eq!(leaf_rdn_value(dn).unwrap(), r"Smith\, John");
    }

    #[test]
    fn leaf_rdn_respects_quoted_comma() {
        let dn = r#"cn="Smith, John",ou=people,dc=example,dc=com"#;
        assert_eq!(leaf_rdn_value(dn).unwrap(), r#""Smith, John""#);
    }

    #[test]
    fn empty_dn_is_error() {
        assert_eq!(leaf_rdn_value(""), Err(DnError::Empty));
    }

    #[test]
    fn missing_equals_is_error() {
        assert!(leaf_rdn_value("not-a-valid-rdn").is_err());
    }
}
