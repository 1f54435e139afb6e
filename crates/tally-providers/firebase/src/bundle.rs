//! Typed parameter bundle handed to `logEvent`.
//!
//! Mirrors the platform bundle: one typed `put_*` per supported scalar, last
//! write wins per key.

use std::collections::BTreeMap;
use std::fmt;

use tally_core::{AttributeValue, Attributes};

/// A single bundle entry.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleValue {
    /// Text value.
    String(String),
    /// 32-bit integer, the widest integer a bundle carries.
    Int(i32),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// Boolean flag.
    Boolean(bool),
}

impl fmt::Display for BundleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Double(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Event parameters in Firebase's native shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bundle {
    values: BTreeMap<String, BundleValue>,
}

impl Bundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a string, replacing any entry under `key`.
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into(), BundleValue::String(value.into()));
    }

    /// Stores an `i32`, replacing any entry under `key`.
    pub fn put_int(&mut self, key: impl Into<String>, value: i32) {
        self.values.insert(key.into(), BundleValue::Int(value));
    }

    /// Stores an `f32`, replacing any entry under `key`.
    pub fn put_float(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), BundleValue::Float(value));
    }

    /// Stores an `f64`, replacing any entry under `key`.
    pub fn put_double(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), BundleValue::Double(value));
    }

    /// Stores a bool, replacing any entry under `key`.
    pub fn put_boolean(&mut self, key: impl Into<String>, value: bool) {
        self.values.insert(key.into(), BundleValue::Boolean(value));
    }

    /// Looks up an entry.
    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.values.get(key)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&Attributes> for Bundle {
    fn from(attributes: &Attributes) -> Self {
        let mut bundle = Bundle::new();
        for (key, value) in attributes.iter() {
            match value {
                AttributeValue::Text(s) => bundle.put_string(key, s.as_str()),
                AttributeValue::Int(i) => bundle.put_int(key, *i),
                AttributeValue::Float(x) => bundle.put_float(key, *x),
                AttributeValue::Double(x) => bundle.put_double(key, *x),
                AttributeValue::Bool(b) => bundle.put_boolean(key, *b),
            }
        }
        bundle
    }
}

/// Formats as `Bundle[{key=value, ...}]`, matching the platform's `toString`.
impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bundle[{")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes_keeps_types() {
        let attrs = Attributes::new()
            .with("item", "apple")
            .with("qty", 3)
            .with("ratio", 0.5f32)
            .with("price", 1.5)
            .with("vip", true);

        let bundle = Bundle::from(&attrs);
        assert_eq!(bundle.len(), 5);
        assert_eq!(bundle.get("item"), Some(&BundleValue::String("apple".into())));
        assert_eq!(bundle.get("qty"), Some(&BundleValue::Int(3)));
        assert_eq!(bundle.get("ratio"), Some(&BundleValue::Float(0.5)));
        assert_eq!(bundle.get("price"), Some(&BundleValue::Double(1.5)));
        assert_eq!(bundle.get("vip"), Some(&BundleValue::Boolean(true)));
    }

    #[test]
    fn test_display() {
        let mut bundle = Bundle::new();
        bundle.put_int("qty", 3);
        bundle.put_string("item", "apple");
        assert_eq!(bundle.to_string(), "Bundle[{item=apple, qty=3}]");
        assert_eq!(Bundle::new().to_string(), "Bundle[{}]");
    }

    #[test]
    fn test_last_put_wins() {
        let mut bundle = Bundle::new();
        bundle.put_int("level", 1);
        bundle.put_string("level", "boss");
        assert_eq!(bundle.get("level"), Some(&BundleValue::String("boss".into())));
    }
}
