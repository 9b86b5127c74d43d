use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::model::{Category, Item};

const CATEGORIES_FILE: &str = "categories.json";
const ITEMS_FILE: &str = "items.json";

const BUNDLED_CATEGORIES: &str = include_str!("../templates/categories.json");
const BUNDLED_ITEMS: &str = include_str!("../templates/items.json");

/// Error type for store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not encode data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable home of the category and item sequences.
///
/// Loads never fail: missing or malformed data falls back to the bundled
/// defaults, which are persisted right away. Saves overwrite the whole
/// collection.
pub trait Store {
    fn load_categories(&mut self) -> Vec<Category>;
    fn load_items(&mut self) -> Vec<Item>;
    fn save_categories(&mut self, categories: &[Category]) -> Result<(), StoreError>;
    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Bundled defaults
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct ItemData {
    items: Vec<Item>,
}

/// Categories shipped with the binary
pub fn bundled_categories() -> Vec<Category> {
    match serde_json::from_str::<CategoryData>(BUNDLED_CATEGORIES) {
        Ok(data) => data.categories,
        Err(e) => {
            tracing::warn!(error = %e, "bundled categories do not decode");
            Vec::new()
        }
    }
}

/// Items shipped with the binary
pub fn bundled_items() -> Vec<Item> {
    match serde_json::from_str::<ItemData>(BUNDLED_ITEMS) {
        Ok(data) => data.items,
        Err(e) => {
            tracing::warn!(error = %e, "bundled items do not decode");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON files
// ---------------------------------------------------------------------------

/// Store backed by `categories.json` and `items.json` in a data directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode `file`, or `None` when it is missing or malformed
    fn read<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no saved data, seeding defaults");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read saved data");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "saved data is malformed, falling back to defaults"
                );
                None
            }
        }
    }

    fn write<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let content = serde_json::to_vec_pretty(value)?;
        fs::create_dir_all(&self.dir)
            .and_then(|_| atomic_write(&path, &content))
            .map_err(|source| StoreError::Io { path, source })
    }
}

impl Store for JsonStore {
    fn load_categories(&mut self) -> Vec<Category> {
        if let Some(categories) = self.read(CATEGORIES_FILE) {
            return categories;
        }
        let categories = bundled_categories();
        if let Err(e) = self.save_categories(&categories) {
            tracing::warn!(error = %e, "could not persist default categories");
        }
        categories
    }

    fn load_items(&mut self) -> Vec<Item> {
        if let Some(items) = self.read(ITEMS_FILE) {
            return items;
        }
        let items = bundled_items();
        if let Err(e) = self.save_items(&items) {
            tracing::warn!(error = %e, "could not persist default items");
        }
        items
    }

    fn save_categories(&mut self, categories: &[Category]) -> Result<(), StoreError> {
        self.write(CATEGORIES_FILE, categories)
    }

    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.write(ITEMS_FILE, items)
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Store that keeps everything in memory and counts writes.
/// `None` collections behave like an empty disk and seed from defaults.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub categories: Option<Vec<Category>>,
    pub items: Option<Vec<Item>>,
    pub category_saves: usize,
    pub item_saves: usize,
}

impl MemoryStore {
    pub fn new(categories: Vec<Category>, items: Vec<Item>) -> Self {
        MemoryStore {
            categories: Some(categories),
            items: Some(items),
            ..Default::default()
        }
    }
}

impl Store for MemoryStore {
    fn load_categories(&mut self) -> Vec<Category> {
        if let Some(categories) = &self.categories {
            return categories.clone();
        }
        let categories = bundled_categories();
        let _ = self.save_categories(&categories);
        categories
    }

    fn load_items(&mut self) -> Vec<Item> {
        if let Some(items) = &self.items {
            return items.clone();
        }
        let items = bundled_items();
        let _ = self.save_items(&items);
        items
    }

    fn save_categories(&mut self, categories: &[Category]) -> Result<(), StoreError> {
        self.categories = Some(categories.to_vec());
        self.category_saves += 1;
        Ok(())
    }

    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.items = Some(items.to_vec());
        self.item_saves += 1;
        Ok(())
    }
}
