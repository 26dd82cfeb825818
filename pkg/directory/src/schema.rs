//! Fixed LDAP schema identifiers (spec §6, "LDAP schema (consumed)").
//!
//! Unlike the `ResolverConfig` fields, these are not deployment-site
//! configurable — they're the object classes and attribute names the
//! access-profile schema itself defines.

pub const DAP_OBJCLASS: &str = "pox509AccessProfile";
pub const AOBP_OBJCLASS: &str = "pox509AccessOnBehalfProfile";

pub const DAP_KEY_PROVIDER_ATTR: &str = "pox509KeyProvider";
pub const DAP_KEYSTORE_OPTIONS_ATTR: &str = "pox509KeystoreOptions";

pub const AOBP_TARGET_KEYSTORE_ATTR: &str = "pox509TargetKeystore";
pub const AOBP_KEY_PROVIDER_ATTR: &str = "pox509KeyProviderGroup";
pub const AOBP_KEYSTORE_OPTIONS_ATTR: &str = "pox509KeystoreOptions";

pub const OBJECT_CLASS_ATTR: &str = "objectClass";

pub const KEYSTORE_OPTIONS_FROM_ATTR: &str = "pox509FromOption";
pub const KEYSTORE_OPTIONS_COMMAND_ATTR: &str = "pox509CommandOption";
