/*!
OTLP protobuf encoding for the metrics data model.

Fields are written in ascending field number order, and fields holding their default value are omitted, except for the nested messages `ResourceMetrics.resource`, `ScopeMetrics.scope`, `KeyValue.value` and the exponential histogram buckets, which are always written.
*/

use std::mem;

use bytes::{Buf, BufMut};
use prost::{
    encoding::{self as wire, DecodeContext, WireType},
    DecodeError, Message,
};

use crate::{
    common::{AnyValue, InstrumentationScope, KeyValue, Map, Timestamp},
    metrics::{
        AggregationTemporality, Buckets, DataPointFlags, Exemplar, ExponentialHistogram,
        ExponentialHistogramDataPoint, Gauge, Histogram, HistogramDataPoint, Metric, MetricData,
        Metrics, NumberDataPoint, NumberValue, ResourceMetrics, ScopeMetrics, Sum, Summary,
        SummaryDataPoint, ValueAtQuantile,
    },
    resource::Resource,
};

fn context(
    message: &'static str,
    field: &'static str,
) -> impl FnOnce(DecodeError) -> DecodeError {
    move |mut err| {
        err.push(message, field);
        err
    }
}

fn put_len_delimited(tag: u32, len: usize, buf: &mut impl BufMut) {
    wire::encode_key(tag, WireType::LengthDelimited, buf);
    wire::encode_varint(len as u64, buf);
}

fn len_delimited_len(tag: u32, len: usize) -> usize {
    wire::key_len(tag) + wire::encoded_len_varint(len as u64) + len
}

fn put_bytes(tag: u32, v: &[u8], buf: &mut impl BufMut) {
    if !v.is_empty() {
        put_len_delimited(tag, v.len(), buf);
        buf.put_slice(v);
    }
}

fn bytes_len(tag: u32, v: &[u8]) -> usize {
    if v.is_empty() {
        0
    } else {
        len_delimited_len(tag, v.len())
    }
}

fn put_varint(tag: u32, v: u64, buf: &mut impl BufMut) {
    if v != 0 {
        wire::encode_key(tag, WireType::Varint, buf);
        wire::encode_varint(v, buf);
    }
}

fn varint_len(tag: u32, v: u64) -> usize {
    if v != 0 {
        wire::key_len(tag) + wire::encoded_len_varint(v)
    } else {
        0
    }
}

fn zigzag32(v: i32) -> u64 {
    ((v << 1) ^ (v >> 31)) as u32 as u64
}

fn put_fixed64(tag: u32, v: u64, buf: &mut impl BufMut) {
    if v != 0 {
        wire::encode_key(tag, WireType::SixtyFourBit, buf);
        buf.put_u64_le(v);
    }
}

fn fixed64_len(tag: u32, v: u64) -> usize {
    if v != 0 {
        wire::key_len(tag) + 8
    } else {
        0
    }
}

// Doubles inside a oneof or with explicit presence are always written
fn put_double_always(tag: u32, v: f64, buf: &mut impl BufMut) {
    wire::encode_key(tag, WireType::SixtyFourBit, buf);
    buf.put_f64_le(v);
}

fn put_double(tag: u32, v: f64, buf: &mut impl BufMut) {
    if v != 0.0 {
        put_double_always(tag, v, buf);
    }
}

fn double_len(tag: u32, v: f64) -> usize {
    if v != 0.0 {
        wire::key_len(tag) + 8
    } else {
        0
    }
}

fn put_optional_double(tag: u32, v: Option<f64>, buf: &mut impl BufMut) {
    if let Some(v) = v {
        put_double_always(tag, v, buf);
    }
}

fn optional_double_len(tag: u32, v: Option<f64>) -> usize {
    if v.is_some() {
        wire::key_len(tag) + 8
    } else {
        0
    }
}

fn put_packed_fixed64(tag: u32, v: &[u64], buf: &mut impl BufMut) {
    if !v.is_empty() {
        put_len_delimited(tag, v.len() * 8, buf);

        for v in v {
            buf.put_u64_le(*v);
        }
    }
}

fn put_packed_double(tag: u32, v: &[f64], buf: &mut impl BufMut) {
    if !v.is_empty() {
        put_len_delimited(tag, v.len() * 8, buf);

        for v in v {
            buf.put_f64_le(*v);
        }
    }
}

fn packed_64bit_len(tag: u32, count: usize) -> usize {
    if count != 0 {
        len_delimited_len(tag, count * 8)
    } else {
        0
    }
}

fn put_packed_uint64(tag: u32, v: &[u64], buf: &mut impl BufMut) {
    if !v.is_empty() {
        put_len_delimited(tag, v.iter().map(|v| wire::encoded_len_varint(*v)).sum(), buf);

        for v in v {
            wire::encode_varint(*v, buf);
        }
    }
}

fn packed_uint64_len(tag: u32, v: &[u64]) -> usize {
    if !v.is_empty() {
        len_delimited_len(tag, v.iter().map(|v| wire::encoded_len_varint(*v)).sum())
    } else {
        0
    }
}

fn put_message(tag: u32, msg: &impl Message, buf: &mut impl BufMut) {
    put_len_delimited(tag, msg.encoded_len(), buf);
    msg.encode_raw(buf);
}

fn message_len(tag: u32, msg: &impl Message) -> usize {
    len_delimited_len(tag, msg.encoded_len())
}

fn put_messages<M: Message>(tag: u32, msgs: &[M], buf: &mut impl BufMut) {
    for msg in msgs {
        put_message(tag, msg, buf);
    }
}

fn messages_len<M: Message>(tag: u32, msgs: &[M]) -> usize {
    msgs.iter().map(|msg| message_len(tag, msg)).sum()
}

fn put_attributes(tag: u32, attributes: &Map, buf: &mut impl BufMut) {
    put_messages(tag, &attributes.0, buf);
}

fn attributes_len(tag: u32, attributes: &Map) -> usize {
    messages_len(tag, &attributes.0)
}

// Attributes are merged one at a time so repeated keys follow the map's last-write-wins rule
// Attributes are appended as they're read, and deduplicated once their message is complete
fn merge_attribute(
    attributes: &mut Map,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut kv = KeyValue::default();
    wire::message::merge(wire_type, &mut kv, buf, ctx)?;

    attributes.0.push(kv);

    Ok(())
}

trait Attributed {
    fn attributes_mut(&mut self) -> &mut Map;
}

fn merge_attributed<M: Message + Attributed>(
    wire_type: WireType,
    msg: &mut M,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    wire::message::merge(wire_type, msg, buf, ctx)?;

    msg.attributes_mut().dedup();

    Ok(())
}

fn merge_repeated_attributed<M: Message + Attributed + Default>(
    wire_type: WireType,
    msgs: &mut Vec<M>,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut msg = M::default();
    merge_attributed(wire_type, &mut msg, buf, ctx)?;

    msgs.push(msg);

    Ok(())
}

macro_rules! attributed {
    ($($ty:ty => $field:ident,)*) => {
        $(
            impl Attributed for $ty {
                fn attributes_mut(&mut self) -> &mut Map {
                    &mut self.$field
                }
            }
        )*
    };
}

attributed! {
    Resource => attributes,
    InstrumentationScope => attributes,
    NumberDataPoint => attributes,
    HistogramDataPoint => attributes,
    ExponentialHistogramDataPoint => attributes,
    SummaryDataPoint => attributes,
    Exemplar => filtered_attributes,
}

impl Attributed for KeyValueList {
    fn attributes_mut(&mut self) -> &mut Map {
        &mut self.0
    }
}

fn merge_fixed64(
    value: &mut u64,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    wire::fixed64::merge(wire_type, value, buf, ctx)
}

fn merge_timestamp(
    ts: &mut Timestamp,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut nanos = ts.as_unix_nanos();
    merge_fixed64(&mut nanos, wire_type, buf, ctx)?;

    *ts = Timestamp::from_unix_nanos(nanos);

    Ok(())
}

fn merge_flags(
    flags: &mut DataPointFlags,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut bits = flags.bits();
    wire::uint32::merge(wire_type, &mut bits, buf, ctx)?;

    *flags = DataPointFlags::from_bits(bits);

    Ok(())
}

fn merge_temporality(
    temporality: &mut AggregationTemporality,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut v = temporality.as_i32();
    wire::int32::merge(wire_type, &mut v, buf, ctx)?;

    *temporality = AggregationTemporality::from_i32(v);

    Ok(())
}

fn merge_optional_double(
    value: &mut Option<f64>,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut v = value.unwrap_or_default();
    wire::double::merge(wire_type, &mut v, buf, ctx)?;

    *value = Some(v);

    Ok(())
}

fn merge_double_value(
    value: &mut Option<NumberValue>,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut v = 0.0;
    wire::double::merge(wire_type, &mut v, buf, ctx)?;

    *value = Some(NumberValue::Double(v));

    Ok(())
}

fn merge_int_value(
    value: &mut Option<NumberValue>,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let mut v = 0;
    wire::sfixed64::merge(wire_type, &mut v, buf, ctx)?;

    *value = Some(NumberValue::Int(v));

    Ok(())
}

fn put_number_value(
    value: Option<NumberValue>,
    (as_double, as_int): (u32, u32),
    buf: &mut impl BufMut,
) {
    match value {
        Some(NumberValue::Double(v)) => put_double_always(as_double, v, buf),
        Some(NumberValue::Int(v)) => {
            wire::encode_key(as_int, WireType::SixtyFourBit, buf);
            buf.put_i64_le(v);
        }
        None => (),
    }
}

fn number_value_len(value: Option<NumberValue>, (as_double, as_int): (u32, u32)) -> usize {
    match value {
        Some(NumberValue::Double(_)) => wire::key_len(as_double) + 8,
        Some(NumberValue::Int(_)) => wire::key_len(as_int) + 8,
        None => 0,
    }
}

impl Message for Metrics {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.resource_metrics.0, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "MetricsData";

        match tag {
            1 => wire::message::merge_repeated(wire_type, &mut self.resource_metrics.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "resource_metrics")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.resource_metrics.0)
    }

    fn clear(&mut self) {
        self.resource_metrics.0.clear();
    }
}

impl Message for ResourceMetrics {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_message(1, &self.resource, buf);
        put_messages(2, &self.scope_metrics.0, buf);
        put_bytes(3, self.schema_url.as_bytes(), buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "ResourceMetrics";

        match tag {
            1 => merge_attributed(wire_type, &mut self.resource, buf, ctx)
                .map_err(context(STRUCT_NAME, "resource")),
            2 => wire::message::merge_repeated(wire_type, &mut self.scope_metrics.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "scope_metrics")),
            3 => wire::string::merge(wire_type, &mut self.schema_url, buf, ctx)
                .map_err(context(STRUCT_NAME, "schema_url")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        message_len(1, &self.resource)
            + messages_len(2, &self.scope_metrics.0)
            + bytes_len(3, self.schema_url.as_bytes())
    }

    fn clear(&mut self) {
        *self = ResourceMetrics::default();
    }
}

impl Message for Resource {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_attributes(1, &self.attributes, buf);
        put_varint(2, self.dropped_attributes_count as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "Resource";

        match tag {
            1 => merge_attribute(&mut self.attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "attributes")),
            2 => wire::uint32::merge(wire_type, &mut self.dropped_attributes_count, buf, ctx)
                .map_err(context(STRUCT_NAME, "dropped_attributes_count")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        attributes_len(1, &self.attributes) + varint_len(2, self.dropped_attributes_count as u64)
    }

    fn clear(&mut self) {
        *self = Resource::default();
    }
}

impl Message for ScopeMetrics {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_message(1, &self.scope, buf);
        put_messages(2, &self.metrics.0, buf);
        put_bytes(3, self.schema_url.as_bytes(), buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "ScopeMetrics";

        match tag {
            1 => merge_attributed(wire_type, &mut self.scope, buf, ctx)
                .map_err(context(STRUCT_NAME, "scope")),
            2 => wire::message::merge_repeated(wire_type, &mut self.metrics.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "metrics")),
            3 => wire::string::merge(wire_type, &mut self.schema_url, buf, ctx)
                .map_err(context(STRUCT_NAME, "schema_url")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        message_len(1, &self.scope)
            + messages_len(2, &self.metrics.0)
            + bytes_len(3, self.schema_url.as_bytes())
    }

    fn clear(&mut self) {
        *self = ScopeMetrics::default();
    }
}

impl Message for InstrumentationScope {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_bytes(1, self.name.as_bytes(), buf);
        put_bytes(2, self.version.as_bytes(), buf);
        put_attributes(3, &self.attributes, buf);
        put_varint(4, self.dropped_attributes_count as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "InstrumentationScope";

        match tag {
            1 => wire::string::merge(wire_type, &mut self.name, buf, ctx)
                .map_err(context(STRUCT_NAME, "name")),
            2 => wire::string::merge(wire_type, &mut self.version, buf, ctx)
                .map_err(context(STRUCT_NAME, "version")),
            3 => merge_attribute(&mut self.attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "attributes")),
            4 => wire::uint32::merge(wire_type, &mut self.dropped_attributes_count, buf, ctx)
                .map_err(context(STRUCT_NAME, "dropped_attributes_count")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        bytes_len(1, self.name.as_bytes())
            + bytes_len(2, self.version.as_bytes())
            + attributes_len(3, &self.attributes)
            + varint_len(4, self.dropped_attributes_count as u64)
    }

    fn clear(&mut self) {
        *self = InstrumentationScope::default();
    }
}

impl Message for KeyValue {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_bytes(1, self.key.as_bytes(), buf);
        put_message(2, &self.value, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "KeyValue";

        match tag {
            1 => wire::string::merge(wire_type, &mut self.key, buf, ctx)
                .map_err(context(STRUCT_NAME, "key")),
            2 => wire::message::merge(wire_type, &mut self.value, buf, ctx)
                .map_err(context(STRUCT_NAME, "value")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        bytes_len(1, self.key.as_bytes()) + message_len(2, &self.value)
    }

    fn clear(&mut self) {
        *self = KeyValue::default();
    }
}

impl Message for AnyValue {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        match self {
            AnyValue::Empty => (),
            AnyValue::String(v) => {
                put_len_delimited(1, v.len(), buf);
                buf.put_slice(v.as_bytes());
            }
            AnyValue::Bool(v) => {
                wire::encode_key(2, WireType::Varint, buf);
                wire::encode_varint(*v as u64, buf);
            }
            AnyValue::Int(v) => {
                wire::encode_key(3, WireType::Varint, buf);
                wire::encode_varint(*v as u64, buf);
            }
            AnyValue::Double(v) => put_double_always(4, *v, buf),
            AnyValue::Array(v) => {
                put_len_delimited(5, messages_len(1, v), buf);
                put_messages(1, v, buf);
            }
            AnyValue::Map(v) => {
                put_len_delimited(6, attributes_len(1, v), buf);
                put_attributes(1, v, buf);
            }
            AnyValue::Bytes(v) => {
                put_len_delimited(7, v.len(), buf);
                buf.put_slice(v);
            }
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "AnyValue";

        match tag {
            1 => {
                let mut v = String::new();
                wire::string::merge(wire_type, &mut v, buf, ctx)
                    .map_err(context(STRUCT_NAME, "string_value"))?;

                *self = AnyValue::String(v);
                Ok(())
            }
            2 => {
                let mut v = false;
                wire::bool::merge(wire_type, &mut v, buf, ctx)
                    .map_err(context(STRUCT_NAME, "bool_value"))?;

                *self = AnyValue::Bool(v);
                Ok(())
            }
            3 => {
                let mut v = 0;
                wire::int64::merge(wire_type, &mut v, buf, ctx)
                    .map_err(context(STRUCT_NAME, "int_value"))?;

                *self = AnyValue::Int(v);
                Ok(())
            }
            4 => {
                let mut v = 0.0;
                wire::double::merge(wire_type, &mut v, buf, ctx)
                    .map_err(context(STRUCT_NAME, "double_value"))?;

                *self = AnyValue::Double(v);
                Ok(())
            }
            5 => {
                let mut array = match mem::take(self) {
                    AnyValue::Array(values) => ArrayValue(values),
                    _ => ArrayValue::default(),
                };

                wire::message::merge(wire_type, &mut array, buf, ctx)
                    .map_err(context(STRUCT_NAME, "array_value"))?;

                *self = AnyValue::Array(array.0);
                Ok(())
            }
            6 => {
                let mut kvlist = match mem::take(self) {
                    AnyValue::Map(values) => KeyValueList(values),
                    _ => KeyValueList::default(),
                };

                merge_attributed(wire_type, &mut kvlist, buf, ctx)
                    .map_err(context(STRUCT_NAME, "kvlist_value"))?;

                *self = AnyValue::Map(kvlist.0);
                Ok(())
            }
            7 => {
                let mut v = Vec::new();
                wire::bytes::merge(wire_type, &mut v, buf, ctx)
                    .map_err(context(STRUCT_NAME, "bytes_value"))?;

                *self = AnyValue::Bytes(v);
                Ok(())
            }
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            AnyValue::Empty => 0,
            AnyValue::String(v) => len_delimited_len(1, v.len()),
            AnyValue::Bool(v) => wire::key_len(2) + wire::encoded_len_varint(*v as u64),
            AnyValue::Int(v) => wire::key_len(3) + wire::encoded_len_varint(*v as u64),
            AnyValue::Double(_) => wire::key_len(4) + 8,
            AnyValue::Array(v) => len_delimited_len(5, messages_len(1, v)),
            AnyValue::Map(v) => len_delimited_len(6, attributes_len(1, v)),
            AnyValue::Bytes(v) => len_delimited_len(7, v.len()),
        }
    }

    fn clear(&mut self) {
        *self = AnyValue::Empty;
    }
}

#[derive(Debug, Default)]
struct ArrayValue(Vec<AnyValue>);

impl Message for ArrayValue {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.0, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            1 => wire::message::merge_repeated(wire_type, &mut self.0, buf, ctx)
                .map_err(context("ArrayValue", "values")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.0)
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Default)]
struct KeyValueList(Map);

impl Message for KeyValueList {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_attributes(1, &self.0, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            1 => merge_attribute(&mut self.0, wire_type, buf, ctx)
                .map_err(context("KeyValueList", "values")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        attributes_len(1, &self.0)
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

// Merge into the active payload if it's of the same kind, otherwise replace it
macro_rules! merge_payload {
    ($data:expr, $variant:ident, $wire_type:expr, $buf:expr, $ctx:expr) => {
        match $data {
            Some(MetricData::$variant(ref mut payload)) => {
                wire::message::merge($wire_type, payload, $buf, $ctx)
            }
            ref mut data => {
                let mut payload = $variant::default();
                wire::message::merge($wire_type, &mut payload, $buf, $ctx)?;

                *data = Some(MetricData::$variant(payload));
                Ok(())
            }
        }
    };
}

impl Message for Metric {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_bytes(1, self.name.as_bytes(), buf);
        put_bytes(2, self.description.as_bytes(), buf);
        put_bytes(3, self.unit.as_bytes(), buf);

        match self.data {
            Some(MetricData::Gauge(ref data)) => put_message(5, data, buf),
            Some(MetricData::Sum(ref data)) => put_message(7, data, buf),
            Some(MetricData::Histogram(ref data)) => put_message(9, data, buf),
            Some(MetricData::ExponentialHistogram(ref data)) => put_message(10, data, buf),
            Some(MetricData::Summary(ref data)) => put_message(11, data, buf),
            None => (),
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "Metric";

        match tag {
            1 => wire::string::merge(wire_type, &mut self.name, buf, ctx)
                .map_err(context(STRUCT_NAME, "name")),
            2 => wire::string::merge(wire_type, &mut self.description, buf, ctx)
                .map_err(context(STRUCT_NAME, "description")),
            3 => wire::string::merge(wire_type, &mut self.unit, buf, ctx)
                .map_err(context(STRUCT_NAME, "unit")),
            5 => merge_payload!(self.data, Gauge, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "gauge")),
            7 => merge_payload!(self.data, Sum, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "sum")),
            9 => merge_payload!(self.data, Histogram, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "histogram")),
            10 => merge_payload!(self.data, ExponentialHistogram, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "exponential_histogram")),
            11 => merge_payload!(self.data, Summary, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "summary")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        bytes_len(1, self.name.as_bytes())
            + bytes_len(2, self.description.as_bytes())
            + bytes_len(3, self.unit.as_bytes())
            + match self.data {
                Some(MetricData::Gauge(ref data)) => message_len(5, data),
                Some(MetricData::Sum(ref data)) => message_len(7, data),
                Some(MetricData::Histogram(ref data)) => message_len(9, data),
                Some(MetricData::ExponentialHistogram(ref data)) => message_len(10, data),
                Some(MetricData::Summary(ref data)) => message_len(11, data),
                None => 0,
            }
    }

    fn clear(&mut self) {
        *self = Metric::default();
    }
}

impl Message for Gauge {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.data_points.0, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            1 => merge_repeated_attributed(wire_type, &mut self.data_points.0, buf, ctx)
                .map_err(context("Gauge", "data_points")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.data_points.0)
    }

    fn clear(&mut self) {
        *self = Gauge::default();
    }
}

impl Message for Sum {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.data_points.0, buf);
        put_varint(2, self.aggregation_temporality.as_i32() as u64, buf);
        put_varint(3, self.is_monotonic as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "Sum";

        match tag {
            1 => merge_repeated_attributed(wire_type, &mut self.data_points.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "data_points")),
            2 => merge_temporality(&mut self.aggregation_temporality, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "aggregation_temporality")),
            3 => wire::bool::merge(wire_type, &mut self.is_monotonic, buf, ctx)
                .map_err(context(STRUCT_NAME, "is_monotonic")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.data_points.0)
            + varint_len(2, self.aggregation_temporality.as_i32() as u64)
            + varint_len(3, self.is_monotonic as u64)
    }

    fn clear(&mut self) {
        *self = Sum::default();
    }
}

impl Message for Histogram {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.data_points.0, buf);
        put_varint(2, self.aggregation_temporality.as_i32() as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "Histogram";

        match tag {
            1 => merge_repeated_attributed(wire_type, &mut self.data_points.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "data_points")),
            2 => merge_temporality(&mut self.aggregation_temporality, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "aggregation_temporality")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.data_points.0)
            + varint_len(2, self.aggregation_temporality.as_i32() as u64)
    }

    fn clear(&mut self) {
        *self = Histogram::default();
    }
}

impl Message for ExponentialHistogram {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.data_points.0, buf);
        put_varint(2, self.aggregation_temporality.as_i32() as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "ExponentialHistogram";

        match tag {
            1 => merge_repeated_attributed(wire_type, &mut self.data_points.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "data_points")),
            2 => merge_temporality(&mut self.aggregation_temporality, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "aggregation_temporality")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.data_points.0)
            + varint_len(2, self.aggregation_temporality.as_i32() as u64)
    }

    fn clear(&mut self) {
        *self = ExponentialHistogram::default();
    }
}

impl Message for Summary {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_messages(1, &self.data_points.0, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            1 => merge_repeated_attributed(wire_type, &mut self.data_points.0, buf, ctx)
                .map_err(context("Summary", "data_points")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        messages_len(1, &self.data_points.0)
    }

    fn clear(&mut self) {
        *self = Summary::default();
    }
}

impl Message for NumberDataPoint {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_fixed64(2, self.start_time.as_unix_nanos(), buf);
        put_fixed64(3, self.time.as_unix_nanos(), buf);
        put_number_value(self.value, (4, 6), buf);
        put_messages(5, &self.exemplars.0, buf);
        put_attributes(7, &self.attributes, buf);
        put_varint(8, self.flags.bits() as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "NumberDataPoint";

        match tag {
            2 => merge_timestamp(&mut self.start_time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "start_time_unix_nano")),
            3 => merge_timestamp(&mut self.time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "time_unix_nano")),
            4 => merge_double_value(&mut self.value, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "as_double")),
            5 => merge_repeated_attributed(wire_type, &mut self.exemplars.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "exemplars")),
            6 => merge_int_value(&mut self.value, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "as_int")),
            7 => merge_attribute(&mut self.attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "attributes")),
            8 => merge_flags(&mut self.flags, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "flags")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        fixed64_len(2, self.start_time.as_unix_nanos())
            + fixed64_len(3, self.time.as_unix_nanos())
            + number_value_len(self.value, (4, 6))
            + messages_len(5, &self.exemplars.0)
            + attributes_len(7, &self.attributes)
            + varint_len(8, self.flags.bits() as u64)
    }

    fn clear(&mut self) {
        *self = NumberDataPoint::default();
    }
}

impl Message for HistogramDataPoint {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_fixed64(2, self.start_time.as_unix_nanos(), buf);
        put_fixed64(3, self.time.as_unix_nanos(), buf);
        put_fixed64(4, self.count, buf);
        put_optional_double(5, self.sum, buf);
        put_packed_fixed64(6, &self.bucket_counts, buf);
        put_packed_double(7, &self.explicit_bounds, buf);
        put_messages(8, &self.exemplars.0, buf);
        put_attributes(9, &self.attributes, buf);
        put_varint(10, self.flags.bits() as u64, buf);
        put_optional_double(11, self.min, buf);
        put_optional_double(12, self.max, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "HistogramDataPoint";

        match tag {
            2 => merge_timestamp(&mut self.start_time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "start_time_unix_nano")),
            3 => merge_timestamp(&mut self.time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "time_unix_nano")),
            4 => merge_fixed64(&mut self.count, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "count")),
            5 => merge_optional_double(&mut self.sum, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "sum")),
            6 => wire::fixed64::merge_repeated(wire_type, &mut self.bucket_counts, buf, ctx)
                .map_err(context(STRUCT_NAME, "bucket_counts")),
            7 => wire::double::merge_repeated(wire_type, &mut self.explicit_bounds, buf, ctx)
                .map_err(context(STRUCT_NAME, "explicit_bounds")),
            8 => merge_repeated_attributed(wire_type, &mut self.exemplars.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "exemplars")),
            9 => merge_attribute(&mut self.attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "attributes")),
            10 => merge_flags(&mut self.flags, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "flags")),
            11 => merge_optional_double(&mut self.min, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "min")),
            12 => merge_optional_double(&mut self.max, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "max")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        fixed64_len(2, self.start_time.as_unix_nanos())
            + fixed64_len(3, self.time.as_unix_nanos())
            + fixed64_len(4, self.count)
            + optional_double_len(5, self.sum)
            + packed_64bit_len(6, self.bucket_counts.len())
            + packed_64bit_len(7, self.explicit_bounds.len())
            + messages_len(8, &self.exemplars.0)
            + attributes_len(9, &self.attributes)
            + varint_len(10, self.flags.bits() as u64)
            + optional_double_len(11, self.min)
            + optional_double_len(12, self.max)
    }

    fn clear(&mut self) {
        *self = HistogramDataPoint::default();
    }
}

impl Message for ExponentialHistogramDataPoint {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_attributes(1, &self.attributes, buf);
        put_fixed64(2, self.start_time.as_unix_nanos(), buf);
        put_fixed64(3, self.time.as_unix_nanos(), buf);
        put_fixed64(4, self.count, buf);
        put_optional_double(5, self.sum, buf);
        put_varint(6, zigzag32(self.scale), buf);
        put_fixed64(7, self.zero_count, buf);
        put_message(8, &self.positive, buf);
        put_message(9, &self.negative, buf);
        put_varint(10, self.flags.bits() as u64, buf);
        put_messages(11, &self.exemplars.0, buf);
        put_optional_double(12, self.min, buf);
        put_optional_double(13, self.max, buf);
        put_double(14, self.zero_threshold, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "ExponentialHistogramDataPoint";

        match tag {
            1 => merge_attribute(&mut self.attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "attributes")),
            2 => merge_timestamp(&mut self.start_time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "start_time_unix_nano")),
            3 => merge_timestamp(&mut self.time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "time_unix_nano")),
            4 => merge_fixed64(&mut self.count, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "count")),
            5 => merge_optional_double(&mut self.sum, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "sum")),
            6 => wire::sint32::merge(wire_type, &mut self.scale, buf, ctx)
                .map_err(context(STRUCT_NAME, "scale")),
            7 => merge_fixed64(&mut self.zero_count, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "zero_count")),
            8 => wire::message::merge(wire_type, &mut self.positive, buf, ctx)
                .map_err(context(STRUCT_NAME, "positive")),
            9 => wire::message::merge(wire_type, &mut self.negative, buf, ctx)
                .map_err(context(STRUCT_NAME, "negative")),
            10 => merge_flags(&mut self.flags, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "flags")),
            11 => merge_repeated_attributed(wire_type, &mut self.exemplars.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "exemplars")),
            12 => merge_optional_double(&mut self.min, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "min")),
            13 => merge_optional_double(&mut self.max, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "max")),
            14 => wire::double::merge(wire_type, &mut self.zero_threshold, buf, ctx)
                .map_err(context(STRUCT_NAME, "zero_threshold")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        attributes_len(1, &self.attributes)
            + fixed64_len(2, self.start_time.as_unix_nanos())
            + fixed64_len(3, self.time.as_unix_nanos())
            + fixed64_len(4, self.count)
            + optional_double_len(5, self.sum)
            + varint_len(6, zigzag32(self.scale))
            + fixed64_len(7, self.zero_count)
            + message_len(8, &self.positive)
            + message_len(9, &self.negative)
            + varint_len(10, self.flags.bits() as u64)
            + messages_len(11, &self.exemplars.0)
            + optional_double_len(12, self.min)
            + optional_double_len(13, self.max)
            + double_len(14, self.zero_threshold)
    }

    fn clear(&mut self) {
        *self = ExponentialHistogramDataPoint::default();
    }
}

impl Message for Buckets {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_varint(1, zigzag32(self.offset), buf);
        put_packed_uint64(2, &self.bucket_counts, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "Buckets";

        match tag {
            1 => wire::sint32::merge(wire_type, &mut self.offset, buf, ctx)
                .map_err(context(STRUCT_NAME, "offset")),
            2 => wire::uint64::merge_repeated(wire_type, &mut self.bucket_counts, buf, ctx)
                .map_err(context(STRUCT_NAME, "bucket_counts")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        varint_len(1, zigzag32(self.offset)) + packed_uint64_len(2, &self.bucket_counts)
    }

    fn clear(&mut self) {
        *self = Buckets::default();
    }
}

impl Message for SummaryDataPoint {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_fixed64(2, self.start_time.as_unix_nanos(), buf);
        put_fixed64(3, self.time.as_unix_nanos(), buf);
        put_fixed64(4, self.count, buf);
        put_double(5, self.sum, buf);
        put_messages(6, &self.quantile_values.0, buf);
        put_attributes(7, &self.attributes, buf);
        put_varint(8, self.flags.bits() as u64, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "SummaryDataPoint";

        match tag {
            2 => merge_timestamp(&mut self.start_time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "start_time_unix_nano")),
            3 => merge_timestamp(&mut self.time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "time_unix_nano")),
            4 => merge_fixed64(&mut self.count, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "count")),
            5 => wire::double::merge(wire_type, &mut self.sum, buf, ctx)
                .map_err(context(STRUCT_NAME, "sum")),
            6 => wire::message::merge_repeated(wire_type, &mut self.quantile_values.0, buf, ctx)
                .map_err(context(STRUCT_NAME, "quantile_values")),
            7 => merge_attribute(&mut self.attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "attributes")),
            8 => merge_flags(&mut self.flags, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "flags")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        fixed64_len(2, self.start_time.as_unix_nanos())
            + fixed64_len(3, self.time.as_unix_nanos())
            + fixed64_len(4, self.count)
            + double_len(5, self.sum)
            + messages_len(6, &self.quantile_values.0)
            + attributes_len(7, &self.attributes)
            + varint_len(8, self.flags.bits() as u64)
    }

    fn clear(&mut self) {
        *self = SummaryDataPoint::default();
    }
}

impl Message for ValueAtQuantile {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_double(1, self.quantile, buf);
        put_double(2, self.value, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "ValueAtQuantile";

        match tag {
            1 => wire::double::merge(wire_type, &mut self.quantile, buf, ctx)
                .map_err(context(STRUCT_NAME, "quantile")),
            2 => wire::double::merge(wire_type, &mut self.value, buf, ctx)
                .map_err(context(STRUCT_NAME, "value")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        double_len(1, self.quantile) + double_len(2, self.value)
    }

    fn clear(&mut self) {
        *self = ValueAtQuantile::default();
    }
}

impl Message for Exemplar {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        put_fixed64(2, self.time.as_unix_nanos(), buf);
        put_number_value(self.value, (3, 6), buf);
        put_bytes(4, &self.span_id, buf);
        put_bytes(5, &self.trace_id, buf);
        put_attributes(7, &self.filtered_attributes, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const STRUCT_NAME: &str = "Exemplar";

        match tag {
            2 => merge_timestamp(&mut self.time, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "time_unix_nano")),
            3 => merge_double_value(&mut self.value, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "as_double")),
            4 => wire::bytes::merge(wire_type, &mut self.span_id, buf, ctx)
                .map_err(context(STRUCT_NAME, "span_id")),
            5 => wire::bytes::merge(wire_type, &mut self.trace_id, buf, ctx)
                .map_err(context(STRUCT_NAME, "trace_id")),
            6 => merge_int_value(&mut self.value, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "as_int")),
            7 => merge_attribute(&mut self.filtered_attributes, wire_type, buf, ctx)
                .map_err(context(STRUCT_NAME, "filtered_attributes")),
            _ => wire::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        fixed64_len(2, self.time.as_unix_nanos())
            + number_value_len(self.value, (3, 6))
            + bytes_len(4, &self.span_id)
            + bytes_len(5, &self.trace_id)
            + attributes_len(7, &self.filtered_attributes)
    }

    fn clear(&mut self) {
        *self = Exemplar::default();
    }
}
