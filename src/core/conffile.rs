//! Configuration files tracked by a package.

use serde::Serialize;

/// One `path hash` entry from a `Conffiles` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConffileEntry {
    /// Absolute path of the tracked file
    #[serde(rename = "file")]
    path: String,

    /// Checksum recorded at install time
    hash: String,
}

impl ConffileEntry {
    /// Create an entry.
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        ConffileEntry {
            path: path.into(),
            hash: hash.into(),
        }
    }

    /// Get the tracked file path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the recorded checksum.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let entry = ConffileEntry::new("/etc/debian_version", "abc123");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"file": "/etc/debian_version", "hash": "abc123"})
        );
    }
}
