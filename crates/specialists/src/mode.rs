//! Backend mode selection shared by every specialist client.

use std::sync::RwLock;

/// Mode used when none is configured or a blank one is supplied.
pub const DEFAULT_MODE: &str = "llm";

/// Lowercases and trims a mode; blank input yields [`DEFAULT_MODE`].
pub fn normalize(mode: &str) -> String {
    let trimmed = mode.trim();
    if trimmed.is_empty() {
        DEFAULT_MODE.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Interior-mutable mode string, so clients shared behind `Arc` can switch
/// backend variant between runs.
#[derive(Debug)]
pub struct ModeSelector {
    current: RwLock<String>,
}

impl ModeSelector {
    pub fn new(mode: &str) -> Self {
        Self {
            current: RwLock::new(normalize(mode)),
        }
    }

    pub fn set(&self, mode: &str) {
        let normalized = normalize(mode);
        // A poisoned lock still holds a valid String.
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = normalized;
    }

    pub fn get(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MODE)
    }
}
