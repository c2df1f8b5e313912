/*!
Attribute values and instrumentation scopes shared by every level of the metrics tree.
*/

use std::{collections::HashMap, fmt, mem, time::Duration};

use sval_derive::Value;

use crate::encoding::{stream_field, JsonBytes, JsonDouble};

/**
A dynamically typed attribute value.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnyValue {
    #[default]
    Empty,
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Bytes(Vec<u8>),
    Array(Vec<AnyValue>),
    Map(Map),
}

/**
The kind of value held by an [`AnyValue`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Empty,
    Str,
    Int,
    Double,
    Bool,
    Map,
    Slice,
    Bytes,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Empty => "Empty",
            ValueType::Str => "Str",
            ValueType::Int => "Int",
            ValueType::Double => "Double",
            ValueType::Bool => "Bool",
            ValueType::Map => "Map",
            ValueType::Slice => "Slice",
            ValueType::Bytes => "Bytes",
        })
    }
}

impl AnyValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            AnyValue::Empty => ValueType::Empty,
            AnyValue::String(_) => ValueType::Str,
            AnyValue::Bool(_) => ValueType::Bool,
            AnyValue::Int(_) => ValueType::Int,
            AnyValue::Double(_) => ValueType::Double,
            AnyValue::Bytes(_) => ValueType::Bytes,
            AnyValue::Array(_) => ValueType::Slice,
            AnyValue::Map(_) => ValueType::Map,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AnyValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AnyValue::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AnyValue]> {
        match self {
            AnyValue::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            AnyValue::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for AnyValue {
    fn from(v: &'a str) -> Self {
        AnyValue::String(v.to_owned())
    }
}

impl From<String> for AnyValue {
    fn from(v: String) -> Self {
        AnyValue::String(v)
    }
}

impl From<bool> for AnyValue {
    fn from(v: bool) -> Self {
        AnyValue::Bool(v)
    }
}

impl From<i64> for AnyValue {
    fn from(v: i64) -> Self {
        AnyValue::Int(v)
    }
}

impl From<f64> for AnyValue {
    fn from(v: f64) -> Self {
        AnyValue::Double(v)
    }
}

impl From<Vec<u8>> for AnyValue {
    fn from(v: Vec<u8>) -> Self {
        AnyValue::Bytes(v)
    }
}

impl From<Vec<AnyValue>> for AnyValue {
    fn from(v: Vec<AnyValue>) -> Self {
        AnyValue::Array(v)
    }
}

impl From<Map> for AnyValue {
    fn from(v: Map) -> Self {
        AnyValue::Map(v)
    }
}

const ANY_VALUE_STRING_LABEL: sval::Label =
    sval::Label::new("stringValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_BOOL_LABEL: sval::Label =
    sval::Label::new("boolValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_INT_LABEL: sval::Label =
    sval::Label::new("intValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_DOUBLE_LABEL: sval::Label =
    sval::Label::new("doubleValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_ARRAY_LABEL: sval::Label =
    sval::Label::new("arrayValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_KVLIST_LABEL: sval::Label =
    sval::Label::new("kvlistValue").with_tag(&sval::tags::VALUE_IDENT);
const ANY_VALUE_BYTES_LABEL: sval::Label =
    sval::Label::new("bytesValue").with_tag(&sval::tags::VALUE_IDENT);
const VALUES_LABEL: sval::Label = sval::Label::new("values").with_tag(&sval::tags::VALUE_IDENT);

const ANY_VALUE_STRING_INDEX: sval::Index = sval::Index::new(1);
const ANY_VALUE_BOOL_INDEX: sval::Index = sval::Index::new(2);
const ANY_VALUE_INT_INDEX: sval::Index = sval::Index::new(3);
const ANY_VALUE_DOUBLE_INDEX: sval::Index = sval::Index::new(4);
const ANY_VALUE_ARRAY_INDEX: sval::Index = sval::Index::new(5);
const ANY_VALUE_KVLIST_INDEX: sval::Index = sval::Index::new(6);
const ANY_VALUE_BYTES_INDEX: sval::Index = sval::Index::new(7);
const VALUES_INDEX: sval::Index = sval::Index::new(1);

impl sval::Value for AnyValue {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        match self {
            AnyValue::Empty => (),
            AnyValue::String(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_STRING_LABEL,
                &ANY_VALUE_STRING_INDEX,
                |stream| stream.value(&**v),
            )?,
            AnyValue::Bool(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_BOOL_LABEL,
                &ANY_VALUE_BOOL_INDEX,
                |stream| stream.bool(*v),
            )?,
            AnyValue::Int(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_INT_LABEL,
                &ANY_VALUE_INT_INDEX,
                |stream| stream.i64(*v),
            )?,
            AnyValue::Double(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_DOUBLE_LABEL,
                &ANY_VALUE_DOUBLE_INDEX,
                |stream| stream.value_computed(&JsonDouble(*v)),
            )?,
            AnyValue::Bytes(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_BYTES_LABEL,
                &ANY_VALUE_BYTES_INDEX,
                |stream| stream.value_computed(&JsonBytes(v)),
            )?,
            AnyValue::Array(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_ARRAY_LABEL,
                &ANY_VALUE_ARRAY_INDEX,
                |stream| stream.value_computed(&Values(v)),
            )?,
            AnyValue::Map(v) => stream_field(
                &mut *stream,
                &ANY_VALUE_KVLIST_LABEL,
                &ANY_VALUE_KVLIST_INDEX,
                |stream| stream.value_computed(&Values(v)),
            )?,
        }

        stream.record_tuple_end(None, None, None)
    }
}

// The `ArrayValue` and `KeyValueList` wrappers
struct Values<'a, V: ?Sized>(&'a V);

impl<'a, V: sval::Value + ?Sized> sval::Value for Values<'a, V> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;
        stream_field(&mut *stream, &VALUES_LABEL, &VALUES_INDEX, |stream| {
            stream.value(self.0)
        })?;
        stream.record_tuple_end(None, None, None)
    }
}

/**
A single attribute.
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct KeyValue {
    #[sval(label = "key", index = 1)]
    pub(crate) key: String,
    #[sval(label = "value", index = 2)]
    pub(crate) value: AnyValue,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AnyValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut AnyValue {
        &mut self.value
    }
}

/**
An ordered set of attributes with unique keys.

Inserting a key that's already present replaces its value in place, so the last write wins and the original position is kept.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map(pub(crate) Vec<KeyValue>);

impl Map {
    pub const fn new() -> Self {
        Map(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Map(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.0.reserve(capacity.saturating_sub(self.0.len()));
    }

    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.0.iter().find(|kv| kv.key == key).map(|kv| &kv.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AnyValue> {
        self.0
            .iter_mut()
            .find(|kv| kv.key == key)
            .map(|kv| &mut kv.value)
    }

    /**
    Insert a value, returning the value it replaced, if any.
    */
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnyValue>) -> Option<AnyValue> {
        self.upsert(KeyValue::new(key, value))
    }

    pub(crate) fn upsert(&mut self, kv: KeyValue) -> Option<AnyValue> {
        match self.0.iter_mut().find(|existing| existing.key == kv.key) {
            Some(existing) => Some(mem::replace(&mut existing.value, kv.value)),
            None => {
                self.0.push(kv);
                None
            }
        }
    }

    /**
    Collapse repeated keys, keeping the last value for each key at the position of its first occurrence.
    */
    pub(crate) fn dedup(&mut self) {
        if self.0.len() < 2 {
            return;
        }

        let mut index = HashMap::<String, usize>::with_capacity(self.0.len());
        let mut deduped = Vec::<KeyValue>::with_capacity(self.0.len());

        for kv in mem::take(&mut self.0) {
            match index.get(&kv.key) {
                Some(&i) => deduped[i].value = kv.value,
                None => {
                    index.insert(kv.key.clone(), deduped.len());
                    deduped.push(kv);
                }
            }
        }

        self.0 = deduped;
    }

    /**
    Remove a value, preserving the order of the remaining attributes.
    */
    pub fn remove(&mut self, key: &str) -> Option<AnyValue> {
        let i = self.0.iter().position(|kv| kv.key == key)?;

        Some(self.0.remove(i).value)
    }

    pub fn remove_if(&mut self, mut f: impl FnMut(&str, &AnyValue) -> bool) {
        self.0.retain(|kv| !f(&kv.key, &kv.value));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyValue)> + '_ {
        self.0.iter().map(|kv| (&*kv.key, &kv.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AnyValue)> + '_ {
        self.0.iter_mut().map(|kv| (&*kv.key, &mut kv.value))
    }
}

impl<K: Into<String>, V: Into<AnyValue>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<AnyValue>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl sval::Value for Map {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.seq_begin(Some(self.0.len()))?;

        for kv in &self.0 {
            stream.seq_value_begin()?;
            stream.value(kv)?;
            stream.seq_value_end()?;
        }

        stream.seq_end()
    }
}

/**
A point in time, stored as nanoseconds since the Unix epoch.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Value)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_unix_nanos(nanos: u64) -> Self {
        Timestamp(nanos)
    }

    pub const fn as_unix_nanos(self) -> u64 {
        self.0
    }

    /**
    Get the timestamp as a duration since the Unix epoch.
    */
    pub const fn to_unix(self) -> Duration {
        Duration::from_nanos(self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(nanos: u64) -> Self {
        Timestamp(nanos)
    }
}

impl From<emit::Timestamp> for Timestamp {
    fn from(ts: emit::Timestamp) -> Self {
        // Saturates for times beyond the year 2554
        Timestamp(u64::try_from(ts.to_unix().as_nanos()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match emit::Timestamp::from_unix(self.to_unix()) {
            Some(ts) => fmt::Display::fmt(&ts, f),
            None => fmt::Display::fmt(&self.0, f),
        }
    }
}

/**
The library that produced a set of metrics.
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct InstrumentationScope {
    #[sval(label = "name", index = 1)]
    pub(crate) name: String,
    #[sval(label = "version", index = 2)]
    pub(crate) version: String,
    #[sval(label = "attributes", index = 3)]
    pub(crate) attributes: Map,
    #[sval(label = "droppedAttributesCount", index = 4)]
    pub(crate) dropped_attributes_count: u32,
}

impl InstrumentationScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn attributes(&self) -> &Map {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Map {
        &mut self.attributes
    }

    pub fn dropped_attributes_count(&self) -> u32 {
        self.dropped_attributes_count
    }

    pub fn set_dropped_attributes_count(&mut self, count: u32) {
        self.dropped_attributes_count = count;
    }
}
