//! JSON export of dataset and variable attributes.
//!
//! Every attribute value becomes plain JSON: floats are widened to `f64`,
//! integers of any width become JSON integers, arrays become JSON arrays.
//! NaN and infinities have no JSON form and are written as `null`.

use chuk_common::{AttrValue, AttributeMap};
use serde_json::{Map, Number, Value};

/// Key under which variable attributes are stored.
pub const VARIABLE_KEY: &str = "__variable__";

/// Key under which global attributes are stored.
pub const DATASET_KEY: &str = "__dataset__";

/// Build `{"__variable__": {<variable>: {...}}, "__dataset__": {...}}`.
pub fn to_json(dataset_attrs: &AttributeMap, variable: &str, variable_attrs: &AttributeMap) -> Value {
    let mut variables = Map::new();
    variables.insert(variable.to_string(), attributes_to_json(variable_attrs));

    let mut root = Map::new();
    root.insert(VARIABLE_KEY.to_string(), Value::Object(variables));
    root.insert(DATASET_KEY.to_string(), attributes_to_json(dataset_attrs));
    Value::Object(root)
}

/// Convert an attribute map to a JSON object, keeping insertion order
/// where the `serde_json` map preserves it.
pub fn attributes_to_json(attrs: &AttributeMap) -> Value {
    Value::Object(
        attrs
            .iter()
            .map(|(k, v)| (k.to_string(), value_to_json(v)))
            .collect(),
    )
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

fn array<T, F>(items: &[T], f: F) -> Value
where
    F: Fn(&T) -> Value,
{
    Value::Array(items.iter().map(f).collect())
}

/// Convert a single attribute value.
pub fn value_to_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::Text(s) => Value::String(s.clone()),
        AttrValue::TextList(v) => array(v, |s| Value::String(s.clone())),
        AttrValue::Byte(v) => Value::from(*v),
        AttrValue::Short(v) => Value::from(*v),
        AttrValue::Int(v) => Value::from(*v),
        AttrValue::Long(v) => Value::from(*v),
        AttrValue::UByte(v) => Value::from(*v),
        AttrValue::UShort(v) => Value::from(*v),
        AttrValue::UInt(v) => Value::from(*v),
        AttrValue::ULong(v) => Value::from(*v),
        AttrValue::Float(v) => float(f64::from(*v)),
        AttrValue::Double(v) => float(*v),
        AttrValue::Bytes(v) => array(v, |x| Value::from(*x)),
        AttrValue::Shorts(v) => array(v, |x| Value::from(*x)),
        AttrValue::Ints(v) => array(v, |x| Value::from(*x)),
        AttrValue::Longs(v) => array(v, |x| Value::from(*x)),
        AttrValue::UBytes(v) => array(v, |x| Value::from(*x)),
        AttrValue::UShorts(v) => array(v, |x| Value::from(*x)),
        AttrValue::UInts(v) => array(v, |x| Value::from(*x)),
        AttrValue::ULongs(v) => array(v, |x| Value::from(*x)),
        AttrValue::Floats(v) => array(v, |x| float(f64::from(*x))),
        AttrValue::Doubles(v) => array(v, |x| float(*x)),
        AttrValue::List(items) => array(items, value_to_json),
        AttrValue::Map(map) => attributes_to_json(map),
    }
}

/// Rebuild an attribute map from a JSON object written by
/// [`attributes_to_json`]. Anything other than an object gives an empty map.
///
/// Integer widths are not recorded in JSON, so integers come back as `Int`
/// when they fit and `Long` otherwise, and floats as `Double`.
pub fn attributes_from_json(value: &Value) -> AttributeMap {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), value_from_json(v)))
            .collect(),
        _ => AttributeMap::new(),
    }
}

fn integer(n: &Number) -> Option<AttrValue> {
    let v = n.as_i64()?;
    Some(match i32::try_from(v) {
        Ok(i) => AttrValue::Int(i),
        Err(_) => AttrValue::Long(v),
    })
}

/// Convert a single JSON value back to an attribute value.
pub fn value_from_json(value: &Value) -> AttrValue {
    match value {
        Value::Null => AttrValue::Double(f64::NAN),
        Value::Bool(b) => AttrValue::Text(b.to_string()),
        Value::String(s) => AttrValue::Text(s.clone()),
        Value::Number(n) => integer(n).unwrap_or_else(|| AttrValue::Double(n.as_f64().unwrap_or(f64::NAN))),
        Value::Array(items) => {
            if let Some(texts) = items.iter().map(|v| v.as_str().map(String::from)).collect::<Option<Vec<_>>>() {
                return AttrValue::TextList(texts);
            }
            let ints: Option<Vec<i64>> = items.iter().map(Value::as_i64).collect();
            if let Some(ints) = ints {
                return match ints.iter().map(|&v| i32::try_from(v).ok()).collect::<Option<Vec<_>>>() {
                    Some(small) => AttrValue::Ints(small),
                    None => AttrValue::Longs(ints),
                };
            }
            let floats: Option<Vec<f64>> = items
                .iter()
                .map(|v| if v.is_null() { Some(f64::NAN) } else { v.as_f64() })
                .collect();
            match floats {
                Some(floats) => AttrValue::Doubles(floats),
                None => AttrValue::List(items.iter().map(value_from_json).collect()),
            }
        }
        Value::Object(_) => AttrValue::Map(attributes_from_json(value)),
    }
}
