//! Conversion between netcdf attribute values and `AttrValue`.

use chuk_common::{AttrValue, AttributeMap};
use netcdf::AttributeValue;
use tracing::warn;

pub(crate) fn from_netcdf(value: AttributeValue) -> AttrValue {
    match value {
        AttributeValue::Str(s) => AttrValue::Text(s),
        AttributeValue::Strs(v) => AttrValue::TextList(v),
        AttributeValue::Schar(v) => AttrValue::Byte(v),
        AttributeValue::Schars(v) => AttrValue::Bytes(v),
        AttributeValue::Uchar(v) => AttrValue::UByte(v),
        AttributeValue::Uchars(v) => AttrValue::UBytes(v),
        AttributeValue::Short(v) => AttrValue::Short(v),
        AttributeValue::Shorts(v) => AttrValue::Shorts(v),
        AttributeValue::Ushort(v) => AttrValue::UShort(v),
        AttributeValue::Ushorts(v) => AttrValue::UShorts(v),
        AttributeValue::Int(v) => AttrValue::Int(v),
        AttributeValue::Ints(v) => AttrValue::Ints(v),
        AttributeValue::Uint(v) => AttrValue::UInt(v),
        AttributeValue::Uints(v) => AttrValue::UInts(v),
        AttributeValue::Longlong(v) => AttrValue::Long(v),
        AttributeValue::Longlongs(v) => AttrValue::Longs(v),
        AttributeValue::Ulonglong(v) => AttrValue::ULong(v),
        AttributeValue::Ulonglongs(v) => AttrValue::ULongs(v),
        AttributeValue::Float(v) => AttrValue::Float(v),
        AttributeValue::Floats(v) => AttrValue::Floats(v),
        AttributeValue::Double(v) => AttrValue::Double(v),
        AttributeValue::Doubles(v) => AttrValue::Doubles(v),
    }
}

/// Convert to a netcdf attribute value.
///
/// NetCDF has no nested attributes, so `List` and `Map` values are flattened
/// to their text rendering.
pub(crate) fn to_netcdf(name: &str, value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::Text(s) => AttributeValue::Str(s.clone()),
        AttrValue::TextList(v) => AttributeValue::Strs(v.clone()),
        AttrValue::Byte(v) => AttributeValue::Schar(*v),
        AttrValue::Short(v) => AttributeValue::Short(*v),
        AttrValue::Int(v) => AttributeValue::Int(*v),
        AttrValue::Long(v) => AttributeValue::Longlong(*v),
        AttrValue::UByte(v) => AttributeValue::Uchar(*v),
        AttrValue::UShort(v) => AttributeValue::Ushort(*v),
        AttrValue::UInt(v) => AttributeValue::Uint(*v),
        AttrValue::ULong(v) => AttributeValue::Ulonglong(*v),
        AttrValue::Float(v) => AttributeValue::Float(*v),
        AttrValue::Double(v) => AttributeValue::Double(*v),
        AttrValue::Bytes(v) => AttributeValue::Schars(v.clone()),
        AttrValue::Shorts(v) => AttributeValue::Shorts(v.clone()),
        AttrValue::Ints(v) => AttributeValue::Ints(v.clone()),
        AttrValue::Longs(v) => AttributeValue::Longlongs(v.clone()),
        AttrValue::UBytes(v) => AttributeValue::Uchars(v.clone()),
        AttrValue::UShorts(v) => AttributeValue::Ushorts(v.clone()),
        AttrValue::UInts(v) => AttributeValue::Uints(v.clone()),
        AttrValue::ULongs(v) => AttributeValue::Ulonglongs(v.clone()),
        AttrValue::Floats(v) => AttributeValue::Floats(v.clone()),
        AttrValue::Doubles(v) => AttributeValue::Doubles(v.clone()),
        AttrValue::List(_) | AttrValue::Map(_) => {
            warn!(attribute = %name, "Flattening nested attribute to text");
            AttributeValue::Str(value.to_string())
        }
    }
}

/// Collect attributes from a netcdf attribute iterator, skipping unreadable ones.
pub(crate) fn collect<'a, I>(attributes: I) -> AttributeMap
where
    I: Iterator<Item = netcdf::Attribute<'a>>,
{
    let mut map = AttributeMap::new();
    for attr in attributes {
        match attr.value() {
            Ok(value) => {
                map.insert(attr.name(), from_netcdf(value));
            }
            Err(e) => {
                warn!(attribute = %attr.name(), error = %e, "Skipping unreadable attribute");
            }
        }
    }
    map
}
