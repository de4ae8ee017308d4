//! Table name and alias parsing.

use serde::{Deserialize, Serialize};

/// A table or view name with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct TableName {
    name: String,
    alias: Option<String>,
}

impl TableName {
    /// Parses `"Name"` or `"Name Alias"`.
    ///
    /// The name is everything before the first space and the alias everything
    /// after the last one, so extra words in between are ignored rather than
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqldata_core::TableName;
    ///
    /// let parsed = TableName::parse("  Customers c ");
    /// assert_eq!(parsed.name(), "Customers");
    /// assert_eq!(parsed.alias().as_deref(), Some("c"));
    /// ```
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match (trimmed.find(' '), trimmed.rfind(' ')) {
            (Some(first), Some(last)) => Self {
                name: trimmed[..first].trim().to_string(),
                alias: Some(trimmed[last + 1..].trim().to_string()),
            },
            _ => Self {
                name: trimmed.to_string(),
                alias: None,
            },
        }
    }

    /// Consumes the parsed value into its parts.
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.name, self.alias)
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} {}", self.name, alias),
            None => write!(f, "{}", self.name),
        }
    }
}
