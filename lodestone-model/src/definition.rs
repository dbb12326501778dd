use lodestone_types::{AttrMap, AttrValue};
use serde::{Deserialize, Serialize};

use crate::RecordFields;

/// One declared record: the state a single piece of content should be in.
///
/// Definitions are declared in host code and registered as part of a
/// [`DefinitionSet`](crate::DefinitionSet). The `slug` is the stable handle
/// tying a definition to its stored record across runs; it lives in a record
/// attribute, never in the store's own permalink field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Attributes applied alongside the core fields.
    #[serde(default, skip_serializing_if = "AttrMap::is_empty")]
    pub attrs: AttrMap,
}

impl Definition {
    /// Creates a definition with the two required fields.
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            body: None,
            excerpt: None,
            status: None,
            attrs: AttrMap::new(),
        }
    }

    /// Sets the body content.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the excerpt.
    #[must_use]
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Sets the lifecycle status (e.g. "draft").
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Declares an attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Materializes the core fields this definition wants the record to have.
    ///
    /// Optional fields collapse to their write-time values: body and excerpt
    /// become empty strings, status becomes `default_status`. Comparing a
    /// stored record against the result is therefore exact, with no
    /// present-vs-absent cases left to handle.
    #[must_use]
    pub fn desired_fields(&self, default_status: &str) -> RecordFields {
        RecordFields {
            title: self.title.clone(),
            body: self.body.clone().unwrap_or_default(),
            excerpt: self.excerpt.clone().unwrap_or_default(),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| default_status.to_string()),
        }
    }
}
