use serde::{Deserialize, Serialize};

/// Stable identifier of a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        CategoryId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A category items can be tagged with (`@work`).
///
/// Categories are values: an update replaces the whole category rather than
/// mutating it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Color tag as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#7D78BF".to_string()
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Category {
            id: CategoryId::new(id),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Case-insensitive prefix test on the category name
    pub fn name_starts_with(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().starts_with(query_lower)
    }
}
