use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ops::filter::SUGGESTION_LIMIT;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Character that starts a category tag in the input
    #[serde(default = "default_trigger")]
    pub trigger: char,
    /// Maximum number of item suggestions shown while typing
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            trigger: default_trigger(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_trigger() -> char {
    '@'
}

fn default_suggestion_limit() -> usize {
    SUGGESTION_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex overrides for theme colors, keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
