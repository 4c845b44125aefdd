//! Identity-naming validators.
//!
//! Each validator returns zero or more human-readable messages; callers map
//! every message into an `Invalid` error at the path of the checked value.

use regex::Regex;
use std::sync::LazyLock;

/// Signature shared by the object-name validators: `(name, prefix)`
///
/// With `prefix` set the value is a `generateName` prefix and may end in `-`.
pub type NameFn = fn(&str, bool) -> Vec<String>;

pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
pub const LABEL_VALUE_MAX_LENGTH: usize = 63;

static DNS1123_SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("subdomain pattern is a valid regex")
});

static DNS1123_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("label pattern is a valid regex")
});

static QUALIFIED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$")
        .expect("qualified name pattern is a valid regex")
});

static LABEL_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])?$")
        .expect("label value pattern is a valid regex")
});

fn max_len_message(max: usize) -> String {
    format!("must be no more than {} characters", max)
}

/// Lowercase RFC 1123 subdomain, e.g. `example.com`
pub fn dns1123_subdomain(value: &str) -> Vec<String> {
    let mut msgs = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        msgs.push(max_len_message(DNS1123_SUBDOMAIN_MAX_LENGTH));
    }
    if !DNS1123_SUBDOMAIN_RE.is_match(value) {
        msgs.push(
            "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, \
             '-' or '.', and must start and end with an alphanumeric character \
             (e.g. 'example.com')"
                .to_string(),
        );
    }
    msgs
}

/// Lowercase RFC 1123 label, e.g. `my-name`
pub fn dns1123_label(value: &str) -> Vec<String> {
    let mut msgs = Vec::new();
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        msgs.push(max_len_message(DNS1123_LABEL_MAX_LENGTH));
    }
    if !DNS1123_LABEL_RE.is_match(value) {
        msgs.push(
            "a lowercase RFC 1123 label must consist of lower case alphanumeric characters \
             or '-', and must start and end with an alphanumeric character (e.g. 'my-name' \
             or '123-abc')"
                .to_string(),
        );
    }
    msgs
}

// A generateName prefix is completed with random characters, so a trailing
// dash is legal there.
fn mask_trailing_dash(name: &str) -> String {
    match name.strip_suffix('-') {
        Some(head) if !head.is_empty() => format!("{}a", head),
        _ => name.to_string(),
    }
}

/// Object name that must be a DNS-1123 subdomain
pub fn name_is_dns_subdomain(name: &str, prefix: bool) -> Vec<String> {
    if prefix {
        dns1123_subdomain(&mask_trailing_dash(name))
    } else {
        dns1123_subdomain(name)
    }
}

/// Object name that must be a DNS-1123 label
pub fn name_is_dns_label(name: &str, prefix: bool) -> Vec<String> {
    if prefix {
        dns1123_label(&mask_trailing_dash(name))
    } else {
        dns1123_label(name)
    }
}

/// Node names are DNS-1123 subdomains
pub fn node_name(name: &str, prefix: bool) -> Vec<String> {
    name_is_dns_subdomain(name, prefix)
}

/// `[prefix/]name` where the prefix is a DNS-1123 subdomain
pub fn qualified_name(value: &str) -> Vec<String> {
    let mut msgs = Vec::new();
    let parts: Vec<&str> = value.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                msgs.push("prefix part must be non-empty".to_string());
            } else {
                msgs.extend(
                    dns1123_subdomain(prefix)
                        .into_iter()
                        .map(|msg| format!("prefix part {}", msg)),
                );
            }
            *name
        }
        _ => {
            msgs.push(
                "a qualified name must consist of alphanumeric characters, '-', '_' or '.', \
                 and must start and end with an alphanumeric character, with an optional DNS \
                 subdomain prefix and '/' (e.g. 'example.com/MyName')"
                    .to_string(),
            );
            return msgs;
        }
    };

    if name.is_empty() {
        msgs.push("name part must be non-empty".to_string());
    } else if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        msgs.push(format!(
            "name part {}",
            max_len_message(QUALIFIED_NAME_MAX_LENGTH)
        ));
    }
    if !QUALIFIED_NAME_RE.is_match(name) {
        msgs.push(
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must \
             start and end with an alphanumeric character (e.g. 'MyName' or 'my.name' or \
             '123-abc')"
                .to_string(),
        );
    }
    msgs
}

/// Label values may be empty; otherwise they follow the qualified-name
/// character rules without a prefix
pub fn label_value(value: &str) -> Vec<String> {
    let mut msgs = Vec::new();
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        msgs.push(max_len_message(LABEL_VALUE_MAX_LENGTH));
    }
    if !LABEL_VALUE_RE.is_match(value) {
        msgs.push(
            "a valid label must be an empty string or consist of alphanumeric characters, \
             '-', '_' or '.', and must start and end with an alphanumeric character \
             (e.g. 'MyValue' or 'my_value' or '12345')"
                .to_string(),
        );
    }
    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_accepts_dotted_lowercase() {
        assert!(dns1123_subdomain("ebs.csi.aws.com").is_empty());
        assert!(dns1123_subdomain("a").is_empty());
    }

    #[test]
    fn test_subdomain_rejects_uppercase_and_edges() {
        assert_eq!(dns1123_subdomain("Fast").len(), 1);
        assert_eq!(dns1123_subdomain("-fast").len(), 1);
        assert_eq!(dns1123_subdomain("fast.").len(), 1);
        assert_eq!(dns1123_subdomain("").len(), 1);
    }

    #[test]
    fn test_subdomain_length_ceiling() {
        let long = "a".repeat(254);
        let msgs = dns1123_subdomain(&long);
        assert_eq!(msgs, vec!["must be no more than 253 characters".to_string()]);
        assert!(dns1123_subdomain(&"a".repeat(253)).is_empty());
    }

    #[test]
    fn test_label_rejects_dots() {
        assert!(dns1123_label("default").is_empty());
        assert_eq!(dns1123_label("kube.system").len(), 1);
    }

    #[test]
    fn test_prefix_allows_trailing_dash() {
        assert!(name_is_dns_subdomain("gold-", true).is_empty());
        assert_eq!(name_is_dns_subdomain("gold-", false).len(), 1);
        assert_eq!(name_is_dns_subdomain("-", true).len(), 1);
    }

    #[test]
    fn test_qualified_name_forms() {
        assert!(qualified_name("topology.kubernetes.io/zone").is_empty());
        assert!(qualified_name("MyName").is_empty());
        assert_eq!(
            qualified_name("/zone"),
            vec!["prefix part must be non-empty".to_string()]
        );
        assert!(qualified_name("example.com/")
            .iter()
            .any(|m| m == "name part must be non-empty"));
        assert_eq!(qualified_name("a/b/c").len(), 1);
        assert!(!qualified_name("Bad_Prefix/zone").is_empty());
    }

    #[test]
    fn test_qualified_name_part_length() {
        let msgs = qualified_name(&"x".repeat(64));
        assert_eq!(msgs, vec!["name part must be no more than 63 characters".to_string()]);
    }

    #[test]
    fn test_label_value_may_be_empty() {
        assert!(label_value("").is_empty());
        assert!(label_value("my_value").is_empty());
        assert_eq!(label_value("bad value").len(), 1);
        assert_eq!(label_value(&"v".repeat(64)).len(), 1);
    }
}
