//! Catalog metadata for emulated utilities.
//!
//! The catalog is read-only reference data built once at startup. It
//! drives `help` and name search (`which`); dispatch itself matches on
//! handler names, not on this table.

use serde::{Deserialize, Serialize};

/// Grouping used in `help` output and catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    File,
    Network,
    System,
    Process,
    Text,
    Archive,
    Permission,
    Search,
}

impl Category {
    /// Lower-case label as shown in `help` section headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::File => "file",
            Category::Network => "network",
            Category::System => "system",
            Category::Process => "process",
            Category::Text => "text",
            Category::Archive => "archive",
            Category::Permission => "permission",
            Category::Search => "search",
        }
    }

    /// All categories in `help` display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::File,
            Category::Search,
            Category::Text,
            Category::Network,
            Category::System,
            Category::Process,
            Category::Archive,
            Category::Permission,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry describing an emulated utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMeta {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub usage: String,
    /// Example invocations shown by `help <command>`.
    pub examples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        assert_eq!(Category::File.as_str(), "file");
        assert_eq!(Category::Permission.to_string(), "permission");
    }

    #[test]
    fn all_categories_unique() {
        let all = Category::all();
        assert_eq!(all.len(), 8);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn meta_serializes_with_lowercase_category() {
        let meta = CommandMeta {
            name: "ping".into(),
            description: "Send ICMP echo requests".into(),
            category: Category::Network,
            usage: "ping [-c count] <host>".into(),
            examples: vec!["ping -c 4 google.com".into()],
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"network\""));
    }
}
