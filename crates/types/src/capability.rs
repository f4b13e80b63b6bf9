use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the domain of work a provider claims, for example `"procresource"`.
///
/// Two providers that declare the same key conflict; only one of them can
/// end up active. Keys compare byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityKey(String);

impl CapabilityKey {
    /// Create a key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CapabilityKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CapabilityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CapabilityKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CapabilityKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let key = CapabilityKey::new("procresource");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"procresource\"");

        let parsed: CapabilityKey = serde_json::from_str("\"heartbeat\"").unwrap();
        assert_eq!(parsed, "heartbeat");
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(CapabilityKey::from("CPU"), CapabilityKey::from("cpu"));
    }
}
