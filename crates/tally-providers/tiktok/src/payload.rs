//! Translation of typed attributes into the TikTok JSON properties object.

use serde_json::{Map, Number, Value};
use tally_core::{AttributeValue, Attributes};
use thiserror::Error;

/// Errors raised while building the properties object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// JSON has no representation for NaN or infinity.
    #[error("attribute '{key}' is not a finite number ({value})")]
    NonFiniteNumber {
        /// The offending key.
        key: String,
        /// The value as a double.
        value: f64,
    },
}

/// Builds the `properties` object passed to `track_event`.
///
/// Every attribute maps one to one. Single precision floats are widened
/// through their shortest decimal form, so `0.1f32` is sent as `0.1` rather
/// than `0.10000000149011612`.
pub fn to_properties(attributes: &Attributes) -> Result<Map<String, Value>, PayloadError> {
    let mut properties = Map::with_capacity(attributes.len());
    for (key, value) in attributes.iter() {
        properties.insert(key.to_string(), to_json(key, value)?);
    }
    Ok(properties)
}

fn to_json(key: &str, value: &AttributeValue) -> Result<Value, PayloadError> {
    Ok(match value {
        AttributeValue::Text(s) => Value::String(s.clone()),
        AttributeValue::Int(i) => Value::Number(Number::from(*i)),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Float(x) => {
            let widened = x.to_string().parse::<f64>().unwrap_or(f64::from(*x));
            finite_number(key, widened)?
        }
        AttributeValue::Double(x) => finite_number(key, *x)?,
    })
}

fn finite_number(key: &str, value: f64) -> Result<Value, PayloadError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| PayloadError::NonFiniteNumber {
            key: key.to_string(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_purchase_properties() {
        let attrs = Attributes::new()
            .with("item", "apple")
            .with("qty", 3)
            .with("price", 1.5)
            .with("vip", true);

        let properties = to_properties(&attrs).unwrap();
        assert_eq!(
            Value::Object(properties),
            json!({ "item": "apple", "qty": 3, "price": 1.5, "vip": true })
        );
    }

    #[test]
    fn test_single_precision_widening() {
        let attrs = Attributes::new().with("ratio", 0.1f32);
        let properties = to_properties(&attrs).unwrap();
        assert_eq!(properties["ratio"], json!(0.1));
    }

    #[test]
    fn test_non_finite_rejected() {
        let attrs = Attributes::new().with("ok", 1).with("bad", f64::NAN);
        let err = to_properties(&attrs).unwrap_err();
        assert!(matches!(err, PayloadError::NonFiniteNumber { ref key, .. } if key == "bad"));

        let attrs = Attributes::new().with("inf", f32::INFINITY);
        assert!(to_properties(&attrs).is_err());
    }

    #[test]
    fn test_empty_attributes() {
        assert!(to_properties(&Attributes::new()).unwrap().is_empty());
    }
}
