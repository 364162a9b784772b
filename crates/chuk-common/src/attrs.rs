//! NetCDF-style attribute values and insertion-ordered attribute maps.

use std::fmt;

/// The value of one global or variable attribute.
///
/// Fixed-width numeric types are kept as read so that writing a dataset
/// back out preserves them. Conversion to JSON happens in `chuk-metadata`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    TextList(Vec<String>),

    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    UByte(u8),
    UShort(u16),
    UInt(u32),
    ULong(u64),
    Float(f32),
    Double(f64),

    Bytes(Vec<i8>),
    Shorts(Vec<i16>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    UBytes(Vec<u8>),
    UShorts(Vec<u16>),
    UInts(Vec<u32>),
    ULongs(Vec<u64>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),

    /// Heterogeneous list of values.
    List(Vec<AttrValue>),
    /// Nested attribute map.
    Map(AttributeMap),
}

impl AttrValue {
    /// Get the text of a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for empty text, empty lists and empty maps.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Text(s) => s.trim().is_empty(),
            AttrValue::TextList(v) => v.is_empty(),
            AttrValue::Bytes(v) => v.is_empty(),
            AttrValue::Shorts(v) => v.is_empty(),
            AttrValue::Ints(v) => v.is_empty(),
            AttrValue::Longs(v) => v.is_empty(),
            AttrValue::UBytes(v) => v.is_empty(),
            AttrValue::UShorts(v) => v.is_empty(),
            AttrValue::UInts(v) => v.is_empty(),
            AttrValue::ULongs(v) => v.is_empty(),
            AttrValue::Floats(v) => v.is_empty(),
            AttrValue::Doubles(v) => v.is_empty(),
            AttrValue::List(v) => v.is_empty(),
            AttrValue::Map(m) => m.is_empty(),
            _ => false,
        }
    }

    /// Interpret the value as a sequence of integers.
    ///
    /// Used for `flag_values`, which files store with whatever integer width
    /// the producer chose. Floating point values are accepted when integral.
    pub fn to_i64_vec(&self) -> Option<Vec<i64>> {
        fn integral(v: f64) -> Option<i64> {
            (v.fract() == 0.0 && v.is_finite()).then_some(v as i64)
        }

        match self {
            AttrValue::Byte(v) => Some(vec![i64::from(*v)]),
            AttrValue::Short(v) => Some(vec![i64::from(*v)]),
            AttrValue::Int(v) => Some(vec![i64::from(*v)]),
            AttrValue::Long(v) => Some(vec![*v]),
            AttrValue::UByte(v) => Some(vec![i64::from(*v)]),
            AttrValue::UShort(v) => Some(vec![i64::from(*v)]),
            AttrValue::UInt(v) => Some(vec![i64::from(*v)]),
            AttrValue::ULong(v) => i64::try_from(*v).ok().map(|v| vec![v]),
            AttrValue::Float(v) => integral(f64::from(*v)).map(|v| vec![v]),
            AttrValue::Double(v) => integral(*v).map(|v| vec![v]),
            AttrValue::Bytes(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AttrValue::Shorts(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AttrValue::Ints(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AttrValue::Longs(v) => Some(v.clone()),
            AttrValue::UBytes(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AttrValue::UShorts(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AttrValue::UInts(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AttrValue::ULongs(v) => v.iter().map(|&x| i64::try_from(x).ok()).collect(),
            AttrValue::Floats(v) => v.iter().map(|&x| integral(f64::from(x))).collect(),
            AttrValue::Doubles(v) => v.iter().map(|&x| integral(x)).collect(),
            AttrValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.extend(item.to_i64_vec()?);
                }
                Some(out)
            }
            _ => None,
        }
    }

    /// Interpret a scalar numeric value as f64.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Byte(v) => Some(f64::from(*v)),
            AttrValue::Short(v) => Some(f64::from(*v)),
            AttrValue::Int(v) => Some(f64::from(*v)),
            AttrValue::Long(v) => Some(*v as f64),
            AttrValue::UByte(v) => Some(f64::from(*v)),
            AttrValue::UShort(v) => Some(f64::from(*v)),
            AttrValue::UInt(v) => Some(f64::from(*v)),
            AttrValue::ULong(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(f64::from(*v)),
            AttrValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::TextList(v) => write!(f, "{}", v.join(",")),
            AttrValue::Byte(v) => write!(f, "{}", v),
            AttrValue::Short(v) => write!(f, "{}", v),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Long(v) => write!(f, "{}", v),
            AttrValue::UByte(v) => write!(f, "{}", v),
            AttrValue::UShort(v) => write!(f, "{}", v),
            AttrValue::UInt(v) => write!(f, "{}", v),
            AttrValue::ULong(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Double(v) => write!(f, "{}", v),
            other => write!(f, "{:?}", other),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::Float(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Double(v)
    }
}

impl From<Vec<i32>> for AttrValue {
    fn from(v: Vec<i32>) -> Self {
        AttrValue::Ints(v)
    }
}

impl From<AttributeMap> for AttrValue {
    fn from(m: AttributeMap) -> Self {
        AttrValue::Map(m)
    }
}

/// Attribute names mapped to values, iterated in insertion order.
///
/// Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Insert only if the attribute is not already present.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        if !self.contains_key(&name) {
            self.entries.push((name, value.into()));
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Get a text attribute.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_text)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every attribute of `other` into this map, replacing existing keys.
    pub fn extend_from(&mut self, other: &AttributeMap) {
        for (k, v) in other.iter() {
            self.insert(k, v.clone());
        }
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a str, &'a AttrValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a AttrValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut map = AttributeMap::new();
        map.insert("title", "Land cover");
        map.insert("institution", "EOCIS");
        map.insert("summary", "classes");
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec!["title", "institution", "summary"]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = AttributeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let previous = map.insert("a", 3);
        assert_eq!(previous, Some(AttrValue::Int(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&AttrValue::Int(3)));
    }

    #[test]
    fn test_insert_if_absent() {
        let mut map = AttributeMap::new();
        map.insert("Conventions", "CF-1.8");
        map.insert_if_absent("Conventions", "CF-1.10");
        assert_eq!(map.get_text("Conventions"), Some("CF-1.8"));
    }

    #[test]
    fn test_is_empty_value() {
        assert!(AttrValue::from("  ").is_empty());
        assert!(!AttrValue::from("x").is_empty());
        assert!(!AttrValue::Int(0).is_empty());
        assert!(AttrValue::Ints(vec![]).is_empty());
    }

    #[test]
    fn test_to_i64_vec() {
        assert_eq!(AttrValue::Bytes(vec![1, 2, 3]).to_i64_vec(), Some(vec![1, 2, 3]));
        assert_eq!(AttrValue::Short(7).to_i64_vec(), Some(vec![7]));
        assert_eq!(AttrValue::Doubles(vec![1.0, 2.0]).to_i64_vec(), Some(vec![1, 2]));
        assert_eq!(AttrValue::Doubles(vec![1.5]).to_i64_vec(), None);
        assert_eq!(AttrValue::from("1 2").to_i64_vec(), None);
    }
}
