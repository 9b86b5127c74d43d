use regex::Regex;

/// Classification of the raw input text.
///
/// Only ever produced by [`TriggerParser::parse`]; nothing else sets these
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    pub raw_text: String,
    /// The text ends in an open tag (`...@wo`)
    pub is_tag_active: bool,
    /// Fragment after the trigger when tag-active, empty otherwise
    pub tag_query: String,
}

impl InputState {
    /// The query used for item suggestions: the whole text when plain.
    pub fn suggestion_query(&self) -> &str {
        if self.is_tag_active {
            ""
        } else {
            &self.raw_text
        }
    }
}

/// Detects an active category tag at the end of the input.
#[derive(Debug, Clone)]
pub struct TriggerParser {
    trigger: char,
    trailing: Regex,
}

impl Default for TriggerParser {
    fn default() -> Self {
        TriggerParser::new('@')
    }
}

impl TriggerParser {
    pub fn new(trigger: char) -> Self {
        let t = regex::escape(&trigger.to_string());
        // Trigger, then a run of non-space non-trigger chars up to the end.
        // Anchoring at the end means only the last trigger can open a tag.
        let pattern = format!(r"{t}([^\s{t}]*)$");
        let trailing = Regex::new(&pattern).expect("escaped trigger forms a valid pattern");
        TriggerParser { trigger, trailing }
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    pub fn parse(&self, text: &str) -> InputState {
        if text.ends_with(self.trigger) {
            return InputState {
                raw_text: text.to_string(),
                is_tag_active: true,
                tag_query: String::new(),
            };
        }

        if let Some(caps) = self.trailing.captures(text) {
            let query = caps.get(1).map_or("", |m| m.as_str());
            return InputState {
                raw_text: text.to_string(),
                is_tag_active: true,
                tag_query: query.to_string(),
            };
        }

        // Either no trigger at all, or the last one is followed by a space:
        // the whole text is a plain suggestion query.
        InputState {
            raw_text: text.to_string(),
            is_tag_active: false,
            tag_query: String::new(),
        }
    }

    /// Drop everything from the last trigger character on, trimmed.
    pub fn strip_tag(&self, text: &str) -> String {
        match text.rfind(self.trigger) {
            Some(pos) => text[..pos].trim().to_string(),
            None => text.trim().to_string(),
        }
    }
}
