use serde::{Deserialize, Serialize};

use super::category::CategoryId;

/// Identity of an item, derived from its name and category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// `<name>|<category id>`. Items with the same name in the same
    /// category share an identity.
    pub fn derive(name: &str, category: &CategoryId) -> Self {
        ItemId(format!("{}|{}", name, category))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A todo item. Position in the owning sequence is recency order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: CategoryId,
}

impl Item {
    pub fn new(name: impl Into<String>, category: CategoryId) -> Self {
        let name = name.into();
        Item {
            id: ItemId::derive(&name, &category),
            name,
            category,
        }
    }

    /// Case-insensitive prefix test on the item name
    pub fn name_starts_with(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().starts_with(query_lower)
    }
}

/// On-disk shape. The id is never trusted from storage; it is re-derived so
/// that a hand-edited file cannot break upsert identity.
#[derive(Deserialize)]
struct RawItem {
    name: String,
    category: CategoryId,
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawItem::deserialize(deserializer)?;
        Ok(Item::new(raw.name, raw.category))
    }
}
