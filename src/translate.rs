use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolves a title (used as a translation key) into display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Key → text map. Unknown keys are returned unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTranslator {
    #[serde(flatten)]
    messages: BTreeMap<String, String>,
}

impl MapTranslator {
    pub fn new() -> Self {
        MapTranslator::default()
    }

    pub fn with(mut self, key: &str, text: &str) -> Self {
        self.messages.insert(key.to_string(), text.to_string());
        self
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
