//! Analytics events and host-map translation.
//!
//! An [`AnalyticsEvent`] is a name plus a typed attribute map. Events usually
//! start life as a host dictionary; [`Attributes::from_host`] turns that into
//! the typed map, dropping entries the providers cannot carry.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{EventError, EventResult};
use crate::value::{AttributeValue, HostDictionary, HostValue};

// =============================================================================
// Attributes
// =============================================================================

/// Typed attribute map attached to an event.
///
/// Keys are kept sorted so log output and payloads are deterministic; key
/// order carries no meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates a host dictionary into typed attributes.
    ///
    /// Entries with a non-string key or a value outside the supported set are
    /// dropped. Dropping is not an error; each dropped entry is reported at
    /// debug level and counted in the returned [`Translation`].
    pub fn from_host(dict: &HostDictionary) -> Translation {
        let mut attributes = Self::new();
        let mut dropped = Vec::new();

        for (key, value) in dict.iter() {
            let HostValue::String(name) = key else {
                debug!(key_type = key.type_name(), "Dropping attribute with non-string key");
                dropped.push(DroppedAttribute {
                    key: None,
                    value_type: value.type_name(),
                });
                continue;
            };

            match AttributeValue::from_host(value) {
                Some(attr) => {
                    attributes.0.insert(name.clone(), attr);
                }
                None => {
                    debug!(
                        key = %name,
                        value_type = value.type_name(),
                        "Dropping attribute with unsupported value"
                    );
                    dropped.push(DroppedAttribute {
                        key: Some(name.clone()),
                        value_type: value.type_name(),
                    });
                }
            }
        }

        Translation {
            attributes,
            dropped,
        }
    }

    /// Inserts an attribute, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up an attribute.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Iterates over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// Translation Result
// =============================================================================

/// An entry removed during host translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedAttribute {
    /// The key, or `None` when the key itself was not a string.
    pub key: Option<String>,
    /// Host type name of the dropped value.
    pub value_type: &'static str,
}

/// Outcome of [`Attributes::from_host`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Translation {
    /// The supported entries.
    pub attributes: Attributes,
    /// Entries that were left out.
    pub dropped: Vec<DroppedAttribute>,
}

impl Translation {
    /// Whether every host entry made it through.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

// =============================================================================
// Analytics Event
// =============================================================================

/// A named analytics event with typed attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    name: String,
    attributes: Attributes,
}

impl AnalyticsEvent {
    /// Creates an event, rejecting an empty or blank name.
    pub fn new(name: impl Into<String>, attributes: Attributes) -> EventResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EventError::EmptyName);
        }
        Ok(Self { name, attributes })
    }

    /// Creates an event from a host dictionary, dropping unsupported entries.
    pub fn from_host(name: impl Into<String>, dict: &HostDictionary) -> EventResult<Self> {
        Self::new(name, Attributes::from_host(dict).attributes)
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The event attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.attributes)
    }
}
