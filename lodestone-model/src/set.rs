use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::Definition;

/// How existing records are brought back in line with their definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Create missing records; never touch existing ones.
    None,
    /// Update drifted records unless a human has edited them.
    #[default]
    Smart,
    /// Update drifted records unconditionally and clear the edited flag.
    Force,
}

impl ReconcileMode {
    /// Parses a mode name, falling back to `Smart` for anything unknown.
    ///
    /// An unknown name is a declaration bug, not something worth failing a
    /// startup pass over, and the fallback is the one mode that still
    /// respects manual edits.
    #[must_use]
    pub fn parse_lossy(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "smart" => Self::Smart,
            "force" => Self::Force,
            other => {
                warn!(mode = other, "unknown reconcile mode, treating as smart");
                Self::Smart
            }
        }
    }

    /// The lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Smart => "smart",
            Self::Force => "force",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Deserialization shares the lossy fallback so declarations loaded from
// JSON behave exactly like ones parsed from strings.
impl<'de> Deserialize<'de> for ReconcileMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&name))
    }
}

/// A record type's complete declaration: its definitions plus the policy
/// for updating and deleting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSet {
    /// The store-side record type the definitions live under.
    pub record_type: String,
    #[serde(default)]
    pub mode: ReconcileMode,
    /// Whether records whose definitions were withdrawn get deleted.
    #[serde(default)]
    pub allow_deletion: bool,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl DefinitionSet {
    /// Creates an empty set with the default policy (smart, no deletion).
    #[must_use]
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            mode: ReconcileMode::Smart,
            allow_deletion: false,
            definitions: Vec::new(),
        }
    }

    /// Sets the reconcile mode.
    #[must_use]
    pub fn mode(mut self, mode: ReconcileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables deletion of withdrawn records.
    #[must_use]
    pub fn allow_deletion(mut self, allow: bool) -> Self {
        self.allow_deletion = allow;
        self
    }

    /// Adds a definition.
    #[must_use]
    pub fn definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Iterates the declared slugs in declaration order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.slug.as_str())
    }
}
