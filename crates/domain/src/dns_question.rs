use super::RecordType;
use std::fmt;
use std::sync::Arc;

/// DNS question (name + record type).
/// Uses `Arc<str>` so the name clones cheaply across engine → cache → strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuestion {
    /// Build a question, normalizing the name to FQDN form.
    pub fn new(name: &str, record_type: RecordType) -> Self {
        Self {
            name: Arc::from(fqdn(name)),
            record_type,
        }
    }
}

impl fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}

/// Append the trailing root dot when missing. The empty name is the root.
pub fn fqdn(name: &str) -> String {
    let name = name.trim();
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn_appends_dot() {
        assert_eq!(fqdn("example.com"), "example.com.");
        assert_eq!(fqdn("example.com."), "example.com.");
        assert_eq!(fqdn(""), ".");
    }

    #[test]
    fn test_question_is_normalized() {
        let q = DnsQuestion::new("example.com", RecordType::A);
        assert_eq!(&*q.name, "example.com.");
        assert_eq!(q, DnsQuestion::new("example.com.", RecordType::A));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let lower = DnsQuestion::new("example.com", RecordType::A);
        let upper = DnsQuestion::new("EXAMPLE.com", RecordType::A);
        assert_ne!(lower, upper);
    }
}
