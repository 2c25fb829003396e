use serde::{Deserialize, Serialize};

/// A configured remote feed. Just an address and a display label; no
/// per-source credentials or options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub label: String,
}

impl Source {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}
