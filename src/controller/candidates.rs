use crate::model::{Category, Item};

/// A value the commit engine can act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Category(Category),
    Item(Item),
    /// Typed text with nothing highlighted
    RawText(String),
}

/// Which list the cursor indexes right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// The full item sequence (main list)
    Items,
    /// Every category (category picker)
    AllCategories,
    /// Categories matching the open tag
    TaggedCategories,
    /// Ranked item suggestions for the plain input
    Suggestions,
}

/// Read-only view of the active candidate list
#[derive(Debug, Clone, Copy)]
pub enum Candidates<'a> {
    Items(&'a [Item]),
    Categories(&'a [Category]),
}

impl<'a> Candidates<'a> {
    pub fn len(&self) -> usize {
        match self {
            Candidates::Items(items) => items.len(),
            Candidates::Categories(cats) => cats.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selection_at(&self, index: usize) -> Option<Selection> {
        match self {
            Candidates::Items(items) => items.get(index).cloned().map(Selection::Item),
            Candidates::Categories(cats) => cats.get(index).cloned().map(Selection::Category),
        }
    }

    /// Display names, in list order
    pub fn labels(&self) -> Vec<&'a str> {
        match self {
            Candidates::Items(items) => items.iter().map(|i| i.name.as_str()).collect(),
            Candidates::Categories(cats) => cats.iter().map(|c| c.name.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;

    #[test]
    fn selection_at_out_of_range_is_none() {
        let items = vec![Item::new("A", CategoryId::new("work"))];
        let c = Candidates::Items(&items);
        assert_eq!(c.len(), 1);
        assert!(c.selection_at(1).is_none());
        assert_eq!(c.selection_at(0), Some(Selection::Item(items[0].clone())));
    }

    #[test]
    fn category_labels() {
        let cats = vec![
            Category::new("work", "Work", "#FFFFFF"),
            Category::new("home", "Home", "#FFFFFF"),
        ];
        assert_eq!(Candidates::Categories(&cats).labels(), vec!["Work", "Home"]);
        assert!(Candidates::Categories(&[]).is_empty());
    }
}
