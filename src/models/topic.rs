//! Topic model: a named discussion subject tracked with a usage counter.

use serde::{Deserialize, Serialize};

/// A tracked topic. The name is the unique key, always stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub count: i64,
}

/// Normalize a submitted topic name for lookup, insert, or delete.
///
/// Topic names are compared case-insensitively, so every path into the
/// database goes through this first.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_name("Linear Algebra"), "linear algebra");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_name("  graphs \n"), "graphs");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_name("Compiler Design");
        assert_eq!(normalize_name(&once), once);
    }
}
