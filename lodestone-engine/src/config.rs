//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Status written for definitions that declare none.
    #[serde(default = "default_status")]
    pub default_status: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_status: default_status(),
        }
    }
}

fn default_status() -> String {
    "published".to_string()
}
