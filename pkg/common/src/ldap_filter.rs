//! LDAP search filter construction, mirroring
//! `create_ldap_search_filter()` in the original C resolver: a single
//! `(attr=value)` equality filter with RFC 4515 escaping of the value,
//! built into a fixed-size buffer.

use thiserror::Error;

/// The original C resolver builds filters into a 1024-byte stack
/// buffer (`LDAP_SEARCH_FILTER_BUFFER_SIZE`) and treats overflow as a
/// fatal misconfiguration. We keep the same bound.
pub const FILTER_BUFFER_SIZE: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter for attribute '{attr}' exceeds the {FILTER_BUFFER_SIZE}-byte buffer ({len} bytes)")]
    TooLong { attr: String, len: usize },
}

/// Escapes `\0`, `(`, `)`, `*` and `\` per RFC 4515, replacing each with
/// `\<hex>`. Iterates by `char` rather than by byte so multi-byte UTF-8
/// sequences pass through untouched instead of being reinterpreted
/// byte-by-byte as Latin-1.
pub fn escape_filter_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\0' | '(' | ')' | '*' | '\\' => {
                out.push('\\');
                out.push_str(&format!("{:02x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}

/// Builds a single equality filter `(attr=value)`, escaping `value` and
/// rejecting filters that would not fit the fixed-size buffer the
/// original implementation used.
pub fn build_equality_filter(attr: &str, value: &str) -> Result<String, FilterError> {
    let filter = format!("({}={})", attr, escape_filter_value(value));
    if filter.len() + 1 > FILTER_BUFFER_SIZE {
        return Err(FilterError::TooLong {
            attr: attr.to_string(),
            len: filter.len(),
        });
    }
    Ok(filter)
}
