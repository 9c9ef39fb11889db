//! Event registry
//!
//! Built once at startup and read-only afterwards.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

use super::names::EventName;
use super::template::EventTemplate;

/// Registry construction errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Event registered twice: {0}")]
    DuplicateEvent(EventName),

    #[error("Invalid field pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Immutable map from event name to template
#[derive(Debug, Default)]
pub struct EventRegistry {
    templates: HashMap<EventName, EventTemplate>,
}

impl EventRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, name: EventName) -> Option<&EventTemplate> {
        self.templates.get(&name)
    }

    /// Look up a template by its wire name
    pub fn lookup(&self, name: &str) -> Option<&EventTemplate> {
        EventName::from_str(name).and_then(|name| self.get(name))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Collects templates, refusing duplicates
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    templates: HashMap<EventName, EventTemplate>,
}

impl RegistryBuilder {
    pub fn register(mut self, template: EventTemplate) -> Result<Self, RegistryError> {
        match self.templates.entry(template.name()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateEvent(*entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(template);
                Ok(self)
            }
        }
    }

    pub fn build(self) -> EventRegistry {
        for name in EventName::ALL {
            if !self.templates.contains_key(&name) {
                tracing::debug!(event = %name, "Event has no template and will be refused");
            }
        }

        EventRegistry {
            templates: self.templates,
        }
    }
}
