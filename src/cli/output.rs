use serde::Serialize;

use crate::model::{Category, Item};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
}

#[derive(Serialize)]
pub struct AddJson {
    /// `created` or `moved`
    pub action: &'static str,
    pub item: ItemJson,
}

/// What the input offers for a piece of text
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestJson {
    Categories {
        query: String,
        categories: Vec<CategoryJson>,
    },
    Items {
        query: String,
        items: Vec<ItemJson>,
    },
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &Item, categories: &[Category]) -> ItemJson {
    ItemJson {
        id: item.id.to_string(),
        name: item.name.clone(),
        category: item.category.to_string(),
        category_name: categories
            .iter()
            .find(|c| c.id == item.category)
            .map(|c| c.name.clone()),
    }
}

pub fn category_to_json(category: &Category, active: bool) -> CategoryJson {
    CategoryJson {
        id: category.id.to_string(),
        name: category.name.clone(),
        color: category.color.clone(),
        active,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One todo per line: name padded to `name_w`, then its category name.
pub fn format_item_line(item: &Item, categories: &[Category], name_w: usize) -> String {
    let category = categories
        .iter()
        .find(|c| c.id == item.category)
        .map(|c| c.name.as_str())
        .unwrap_or("?");
    let pad = name_w.saturating_sub(crate::util::unicode::display_width(&item.name));
    format!("{}{}  {}", item.name, " ".repeat(pad), category)
}

/// Width of the widest item name, for column alignment
pub fn name_width(items: &[Item]) -> usize {
    items
        .iter()
        .map(|i| crate::util::unicode::display_width(&i.name))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;
    use pretty_assertions::assert_eq;

    fn cats() -> Vec<Category> {
        vec![Category::new("work", "Work", "#4488FF")]
    }

    #[test]
    fn item_json_includes_category_name() {
        let item = Item::new("Review PRs", CategoryId::new("work"));
        let json = serde_json::to_value(item_to_json(&item, &cats())).unwrap();
        assert_eq!(json["id"], "Review PRs|work");
        assert_eq!(json["category_name"], "Work");
    }

    #[test]
    fn unknown_category_omits_name() {
        let item = Item::new("Orphan", CategoryId::new("gone"));
        let json = serde_json::to_value(item_to_json(&item, &cats())).unwrap();
        assert!(json.get("category_name").is_none());
    }

    #[test]
    fn inactive_flag_is_omitted() {
        let json = serde_json::to_value(category_to_json(&cats()[0], false)).unwrap();
        assert!(json.get("active").is_none());
        let json = serde_json::to_value(category_to_json(&cats()[0], true)).unwrap();
        assert_eq!(json["active"], true);
    }

    #[test]
    fn suggest_json_is_tagged() {
        let out = SuggestJson::Items {
            query: "gy".into(),
            items: Vec::new(),
        };
        let json = serde_json::to_value(out).unwrap();
        assert_eq!(json["kind"], "items");
    }

    #[test]
    fn item_lines_align() {
        let items = vec![
            Item::new("Gym", CategoryId::new("work")),
            Item::new("Review PRs", CategoryId::new("work")),
        ];
        let w = name_width(&items);
        assert_eq!(format_item_line(&items[0], &cats(), w), "Gym         Work");
        assert_eq!(format_item_line(&items[1], &cats(), w), "Review PRs  Work");
    }
}
