use std::collections::HashMap;

/// Resolves localization keys (such as `"hints/back"`) to display strings.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Table-backed translator. Unknown keys translate to themselves.
#[derive(Clone, Debug, Default)]
pub struct StaticTranslator {
    entries: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// English strings for the keys the built-in views use.
    pub fn english() -> Self {
        Self::new()
            .with("hints/ok", "OK")
            .with("hints/back", "Back")
            .with("hints/exit", "Exit")
            .with("hints/on", "On")
            .with("hints/off", "Off")
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
