//! Pure filtering predicates (spec §4.5, "Filtering rule (Direct)" /
//! "Filtering rule (OnBehalf)"; spec §8 scenarios 5 and 6). Kept free
//! of LDAP I/O so they're testable without a directory connection.

/// A Direct Access Profile is relevant iff its key-provider's uid
/// matches the login uid.
pub fn direct_profile_is_relevant(provider_uid: &str, login_uid: &str) -> bool {
    provider_uid == login_uid
}

/// An Access-On-Behalf Profile is relevant iff any of its target
/// end-entities' uids matches the login uid. An empty target list is
/// never relevant.
///
/// The source's `is_relevant_aobp` unconditionally returns true
/// (spec §9, "Open questions"); this is the filter the distillation
/// says must actually be wired.
pub fn onbehalf_profile_is_relevant(target_ee_uids: &[String], login_uid: &str) -> bool {
    target_ee_uids.iter().any(|uid| uid == login_uid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_profile_retained_when_uid_matches() {
        assert!(direct_profile_is_relevant("alice", "alice"));
    }

    #[test]
    fn direct_profile_dropped_when_uid_differs() {
        assert!(!direct_profile_is_relevant("bob", "alice"));
    }

    #[test]
    fn onbehalf_profile_retained_when_any_target_matches() {
        let targets = vec!["carol".to_string(), "alice".to_string()];
        assert!(onbehalf_profile_is_relevant(&targets, "alice"));
    }

    #[test]
    fn onbehalf_profile_dropped_when_target_removed() {
        let targets = vec!["carol".to_string()];
        assert!(!onbehalf_profile_is_relevant(&targets, "alice"));
    }

    #[test]
    fn onbehalf_profile_dropped_when_target_list_empty() {
        assert!(!onbehalf_profile_is_relevant(&[], "alice"));
    }
}
