//! Declared-state registry.

use std::collections::BTreeSet;

use lodestone_model::DefinitionSet;
use lodestone_types::is_reserved_key;
use tracing::{debug, warn};

use crate::error::RegistrationError;

/// Every definition set the host has declared, in registration order.
///
/// Validation is fail-closed: a set with any invalid definition is rejected
/// whole, leaving the registry exactly as it was. A missing page is easier
/// to notice and cheaper to live with than a half-applied declaration.
#[derive(Debug, Default)]
pub struct Registry {
    sets: Vec<DefinitionSet>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition set.
    ///
    /// Re-registering a record type is an idempotent no-op; the first
    /// registration wins.
    pub fn register(&mut self, set: DefinitionSet) -> Result<(), RegistrationError> {
        if let Err(err) = Self::validate(&set) {
            warn!(record_type = %set.record_type, error = %err, "rejecting definition set");
            return Err(err);
        }
        if self
            .sets
            .iter()
            .any(|held| held.record_type == set.record_type)
        {
            debug!(record_type = %set.record_type, "record type already registered, keeping first");
            return Ok(());
        }
        debug!(
            record_type = %set.record_type,
            definitions = set.definitions.len(),
            "registered definition set"
        );
        self.sets.push(set);
        Ok(())
    }

    fn validate(set: &DefinitionSet) -> Result<(), RegistrationError> {
        if set.record_type.trim().is_empty() {
            return Err(RegistrationError::EmptyRecordType);
        }
        let mut seen = BTreeSet::new();
        for (index, definition) in set.definitions.iter().enumerate() {
            if definition.slug.trim().is_empty() {
                return Err(RegistrationError::EmptySlug { index });
            }
            if definition.title.trim().is_empty() {
                return Err(RegistrationError::EmptyTitle {
                    slug: definition.slug.clone(),
                });
            }
            if !seen.insert(definition.slug.as_str()) {
                return Err(RegistrationError::DuplicateSlug {
                    slug: definition.slug.clone(),
                });
            }
            if let Some(key) = definition.attrs.keys().find(|key| is_reserved_key(key)) {
                return Err(RegistrationError::ReservedAttrKey {
                    slug: definition.slug.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Registered sets, in registration order.
    pub fn sets(&self) -> impl Iterator<Item = &DefinitionSet> {
        self.sets.iter()
    }

    /// Number of registered sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
