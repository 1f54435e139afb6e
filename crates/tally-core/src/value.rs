//! Attribute and host value types.
//!
//! Two value models live here:
//!
//! - [`HostValue`] is whatever the host scripting layer hands over. It mirrors
//!   an engine variant and can hold anything, including nested containers.
//! - [`AttributeValue`] is the closed set of scalar types every provider knows
//!   how to carry: text, 32-bit integers, single and double precision floats,
//!   and booleans.
//!
//! Converting from the former to the latter is partial; see
//! [`AttributeValue::from_host`].

use std::fmt;

use serde::Serialize;

// =============================================================================
// Attribute Value
// =============================================================================

/// A single event attribute value.
///
/// Providers translate these into their native payload types with an
/// exhaustive `match`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// UTF-8 text.
    Text(String),
    /// 32-bit signed integer.
    Int(i32),
    /// Single precision float.
    Float(f32),
    /// Double precision float.
    Double(f64),
    /// Boolean flag.
    Bool(bool),
}

impl AttributeValue {
    /// Converts a host value into an attribute value.
    ///
    /// Returns `None` for values outside the supported set: nil, arrays,
    /// dictionaries, and integers that do not fit in 32 bits.
    pub fn from_host(value: &HostValue) -> Option<Self> {
        match value {
            HostValue::String(s) => Some(Self::Text(s.clone())),
            HostValue::Int(i) => i32::try_from(*i).ok().map(Self::Int),
            HostValue::Float(f) => Some(Self::Double(*f)),
            HostValue::Bool(b) => Some(Self::Bool(*b)),
            HostValue::Nil | HostValue::Array(_) | HostValue::Dictionary(_) => None,
        }
    }

    /// Returns a short name for the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Double(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// =============================================================================
// Host Value
// =============================================================================

/// An untyped value coming from the host engine's scripting layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    /// Absence of a value.
    #[default]
    Nil,
    /// Boolean.
    Bool(bool),
    /// 64-bit integer, the host's native integer width.
    Int(i64),
    /// 64-bit float, the host's native float width.
    Float(f64),
    /// String.
    String(String),
    /// Ordered list of values.
    Array(Vec<HostValue>),
    /// Nested dictionary.
    Dictionary(HostDictionary),
}

impl HostValue {
    /// Returns the host-side type name, used in diagnostics and call errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
        }
    }

    /// Returns the string content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean content, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the dictionary content, if any.
    pub fn as_dictionary(&self) -> Option<&HostDictionary> {
        match self {
            Self::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for HostValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        Self::Array(value)
    }
}

impl From<HostDictionary> for HostValue {
    fn from(value: HostDictionary) -> Self {
        Self::Dictionary(value)
    }
}

// =============================================================================
// Host Dictionary
// =============================================================================

/// A host-side dictionary.
///
/// Keys are themselves host values because engine dictionaries accept any
/// key type. Insertion order is kept; lookups are linear, which is fine for
/// the handful of entries an analytics event carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostDictionary {
    entries: Vec<(HostValue, HostValue)>,
}

impl HostDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any existing entry with an equal key.
    pub fn insert(&mut self, key: impl Into<HostValue>, value: impl Into<HostValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<HostValue>, value: impl Into<HostValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a value by string key.
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&HostValue, &HostValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HostDictionary
where
    K: Into<HostValue>,
    V: Into<HostValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_host_values_convert() {
        assert_eq!(
            AttributeValue::from_host(&"apple".into()),
            Some(AttributeValue::Text("apple".into()))
        );
        assert_eq!(
            AttributeValue::from_host(&HostValue::Int(3)),
            Some(AttributeValue::Int(3))
        );
        assert_eq!(
            AttributeValue::from_host(&HostValue::Float(1.5)),
            Some(AttributeValue::Double(1.5))
        );
        assert_eq!(
            AttributeValue::from_host(&HostValue::Bool(true)),
            Some(AttributeValue::Bool(true))
        );
    }

    #[test]
    fn test_unsupported_host_values_rejected() {
        assert_eq!(AttributeValue::from_host(&HostValue::Nil), None);
        assert_eq!(AttributeValue::from_host(&HostValue::Array(vec![])), None);
        assert_eq!(
            AttributeValue::from_host(&HostDictionary::new().into()),
            None
        );
    }

    #[test]
    fn test_int_range() {
        let max = HostValue::Int(i64::from(i32::MAX));
        assert_eq!(
            AttributeValue::from_host(&max),
            Some(AttributeValue::Int(i32::MAX))
        );

        let too_big = HostValue::Int(i64::from(i32::MAX) + 1);
        assert_eq!(AttributeValue::from_host(&too_big), None);
    }

    #[test]
    fn test_dictionary_insert_replaces() {
        let mut dict = HostDictionary::new();
        dict.insert("qty", 1);
        dict.insert("qty", 2);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("qty"), Some(&HostValue::Int(2)));
    }

    #[test]
    fn test_attribute_value_serializes_untagged() {
        let json = serde_json::to_string(&AttributeValue::Int(7)).unwrap();
        assert_eq!(json, "7");
        let json = serde_json::to_string(&AttributeValue::from("vip")).unwrap();
        assert_eq!(json, "\"vip\"");
    }
}
