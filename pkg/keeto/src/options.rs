use directory::KeystoreOptions;
use ssh_key::SshKey;

/// Renders one `authorized_keys` line (spec §6, "SSH authorized-keys
/// line (output)"): `<keytype> <base64(blob)>`, optionally preceded by
/// a comma-separated option string built from `from_option` /
/// `command_option`, per OpenSSH's `from="..."[,command="..."] `
/// prefix syntax.
pub fn render_authorized_keys_line(ssh_key: &SshKey, options: &KeystoreOptions) -> String {
    let option_string = render_option_string(options);
    if option_string.is_empty() {
        format!("{} {}", ssh_key.keytype, ssh_key.data)
    } else {
        format!("{} {} {}", option_string, ssh_key.keytype, ssh_key.data)
    }
}

fn render_option_string(options: &KeystoreOptions) -> String {
    let mut parts = Vec::new();
    if let Some(from) = &options.from_option {
        parts.push(format!(r#"from="{}""#, escape_option_value(from)));
    }
    if let Some(command) = &options.command_option {
        parts.push(format!(r#"command="{}""#, escape_option_value(command)));
    }
    parts.join(",")
}

/// Escapes a double quote within an option value so it doesn't close
/// the surrounding quoted string early.
fn escape_option_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
