use std::fmt;

use sval_derive::Value;

use crate::{
    common::{Map, Timestamp},
    encoding::{stream_field, JsonDouble, JsonDoubles},
    metrics::{DataPointFlags, ExemplarSlice, ValueAtQuantileSlice},
};

macro_rules! data_point_common {
    ($ty:ident) => {
        impl $ty {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn attributes(&self) -> &Map {
                &self.attributes
            }

            pub fn attributes_mut(&mut self) -> &mut Map {
                &mut self.attributes
            }

            /**
            The start of the time window this point covers.
            */
            pub fn start_timestamp(&self) -> Timestamp {
                self.start_time
            }

            pub fn set_start_timestamp(&mut self, ts: impl Into<Timestamp>) {
                self.start_time = ts.into();
            }

            /**
            The time this point was observed.
            */
            pub fn timestamp(&self) -> Timestamp {
                self.time
            }

            pub fn set_timestamp(&mut self, ts: impl Into<Timestamp>) {
                self.time = ts.into();
            }

            pub fn flags(&self) -> DataPointFlags {
                self.flags
            }

            pub fn set_flags(&mut self, flags: impl Into<DataPointFlags>) {
                self.flags = flags.into();
            }
        }
    };
}

macro_rules! optional_f64 {
    ($field:ident, $set:ident, $remove:ident) => {
        pub fn $field(&self) -> Option<f64> {
            self.$field
        }

        pub fn $set(&mut self, v: f64) {
            self.$field = Some(v);
        }

        pub fn $remove(&mut self) {
            self.$field = None;
        }
    };
}

/**
The value of a [`NumberDataPoint`] or [`Exemplar`].
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Double(f64),
}

/**
The kind of value held by a [`NumberDataPoint`].
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberDataPointValueType {
    #[default]
    None,
    Int,
    Double,
}

impl fmt::Display for NumberDataPointValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberDataPointValueType::None => "None",
            NumberDataPointValueType::Int => "Int",
            NumberDataPointValueType::Double => "Double",
        })
    }
}

fn value_type(value: Option<NumberValue>) -> NumberDataPointValueType {
    match value {
        None => NumberDataPointValueType::None,
        Some(NumberValue::Int(_)) => NumberDataPointValueType::Int,
        Some(NumberValue::Double(_)) => NumberDataPointValueType::Double,
    }
}

/**
A single scalar observation in a gauge or sum.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberDataPoint {
    pub(crate) attributes: Map,
    pub(crate) start_time: Timestamp,
    pub(crate) time: Timestamp,
    pub(crate) value: Option<NumberValue>,
    pub(crate) exemplars: ExemplarSlice,
    pub(crate) flags: DataPointFlags,
}

data_point_common!(NumberDataPoint);

impl NumberDataPoint {
    pub fn value(&self) -> Option<NumberValue> {
        self.value
    }

    pub fn value_type(&self) -> NumberDataPointValueType {
        value_type(self.value)
    }

    pub fn int_value(&self) -> Option<i64> {
        match self.value {
            Some(NumberValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn double_value(&self) -> Option<f64> {
        match self.value {
            Some(NumberValue::Double(v)) => Some(v),
            _ => None,
        }
    }

    pub fn set_int_value(&mut self, v: i64) {
        self.value = Some(NumberValue::Int(v));
    }

    pub fn set_double_value(&mut self, v: f64) {
        self.value = Some(NumberValue::Double(v));
    }

    pub fn remove_value(&mut self) {
        self.value = None;
    }

    pub fn exemplars(&self) -> &ExemplarSlice {
        &self.exemplars
    }

    pub fn exemplars_mut(&mut self) -> &mut ExemplarSlice {
        &mut self.exemplars
    }
}

/**
A distribution of observations over explicit bucket boundaries.

A point with `N` boundaries in `explicit_bounds` should have `N + 1` entries in `bucket_counts`.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramDataPoint {
    pub(crate) attributes: Map,
    pub(crate) start_time: Timestamp,
    pub(crate) time: Timestamp,
    pub(crate) count: u64,
    pub(crate) sum: Option<f64>,
    pub(crate) bucket_counts: Vec<u64>,
    pub(crate) explicit_bounds: Vec<f64>,
    pub(crate) exemplars: ExemplarSlice,
    pub(crate) flags: DataPointFlags,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
}

data_point_common!(HistogramDataPoint);

impl HistogramDataPoint {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = count;
    }

    optional_f64!(sum, set_sum, remove_sum);
    optional_f64!(min, set_min, remove_min);
    optional_f64!(max, set_max, remove_max);

    pub fn bucket_counts(&self) -> &[u64] {
        &self.bucket_counts
    }

    pub fn bucket_counts_mut(&mut self) -> &mut Vec<u64> {
        &mut self.bucket_counts
    }

    pub fn set_bucket_counts(&mut self, counts: impl Into<Vec<u64>>) {
        self.bucket_counts = counts.into();
    }

    pub fn explicit_bounds(&self) -> &[f64] {
        &self.explicit_bounds
    }

    pub fn explicit_bounds_mut(&mut self) -> &mut Vec<f64> {
        &mut self.explicit_bounds
    }

    pub fn set_explicit_bounds(&mut self, bounds: impl Into<Vec<f64>>) {
        self.explicit_bounds = bounds.into();
    }

    pub fn exemplars(&self) -> &ExemplarSlice {
        &self.exemplars
    }

    pub fn exemplars_mut(&mut self) -> &mut ExemplarSlice {
        &mut self.exemplars
    }
}

/**
A distribution of observations over base-2 exponential buckets.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExponentialHistogramDataPoint {
    pub(crate) attributes: Map,
    pub(crate) start_time: Timestamp,
    pub(crate) time: Timestamp,
    pub(crate) count: u64,
    pub(crate) sum: Option<f64>,
    pub(crate) scale: i32,
    pub(crate) zero_count: u64,
    pub(crate) positive: Buckets,
    pub(crate) negative: Buckets,
    pub(crate) flags: DataPointFlags,
    pub(crate) exemplars: ExemplarSlice,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) zero_threshold: f64,
}

data_point_common!(ExponentialHistogramDataPoint);

impl ExponentialHistogramDataPoint {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = count;
    }

    optional_f64!(sum, set_sum, remove_sum);
    optional_f64!(min, set_min, remove_min);
    optional_f64!(max, set_max, remove_max);

    /**
    The resolution of the buckets; each bucket boundary is `2^(2^-scale)` times the one before it.
    */
    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: i32) {
        self.scale = scale;
    }

    pub fn zero_count(&self) -> u64 {
        self.zero_count
    }

    pub fn set_zero_count(&mut self, count: u64) {
        self.zero_count = count;
    }

    pub fn zero_threshold(&self) -> f64 {
        self.zero_threshold
    }

    pub fn set_zero_threshold(&mut self, threshold: f64) {
        self.zero_threshold = threshold;
    }

    pub fn positive(&self) -> &Buckets {
        &self.positive
    }

    pub fn positive_mut(&mut self) -> &mut Buckets {
        &mut self.positive
    }

    pub fn negative(&self) -> &Buckets {
        &self.negative
    }

    pub fn negative_mut(&mut self) -> &mut Buckets {
        &mut self.negative
    }

    pub fn exemplars(&self) -> &ExemplarSlice {
        &self.exemplars
    }

    pub fn exemplars_mut(&mut self) -> &mut ExemplarSlice {
        &mut self.exemplars
    }
}

/**
A contiguous run of exponential histogram buckets.
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Buckets {
    #[sval(label = "offset", index = 1)]
    pub(crate) offset: i32,
    #[sval(label = "bucketCounts", index = 2)]
    pub(crate) bucket_counts: Vec<u64>,
}

impl Buckets {
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    pub fn bucket_counts(&self) -> &[u64] {
        &self.bucket_counts
    }

    pub fn bucket_counts_mut(&mut self) -> &mut Vec<u64> {
        &mut self.bucket_counts
    }

    pub fn set_bucket_counts(&mut self, counts: impl Into<Vec<u64>>) {
        self.bucket_counts = counts.into();
    }
}

/**
Pre-computed quantiles over a set of observations.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryDataPoint {
    pub(crate) attributes: Map,
    pub(crate) start_time: Timestamp,
    pub(crate) time: Timestamp,
    pub(crate) count: u64,
    pub(crate) sum: f64,
    pub(crate) quantile_values: ValueAtQuantileSlice,
    pub(crate) flags: DataPointFlags,
}

data_point_common!(SummaryDataPoint);

impl SummaryDataPoint {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = count;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn set_sum(&mut self, sum: f64) {
        self.sum = sum;
    }

    pub fn quantile_values(&self) -> &ValueAtQuantileSlice {
        &self.quantile_values
    }

    pub fn quantile_values_mut(&mut self) -> &mut ValueAtQuantileSlice {
        &mut self.quantile_values
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueAtQuantile {
    pub(crate) quantile: f64,
    pub(crate) value: f64,
}

impl ValueAtQuantile {
    pub fn new(quantile: f64, value: f64) -> Self {
        ValueAtQuantile { quantile, value }
    }

    /**
    The quantile in the range `[0.0, 1.0]`.
    */
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    pub fn set_quantile(&mut self, quantile: f64) {
        self.quantile = quantile;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

/**
A sample observation linked to the trace it was recorded in.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Exemplar {
    pub(crate) filtered_attributes: Map,
    pub(crate) time: Timestamp,
    pub(crate) value: Option<NumberValue>,
    pub(crate) span_id: Vec<u8>,
    pub(crate) trace_id: Vec<u8>,
}

impl Exemplar {
    pub fn new() -> Self {
        Self::default()
    }

    /**
    Attributes of the original observation that were dropped from the data point.
    */
    pub fn filtered_attributes(&self) -> &Map {
        &self.filtered_attributes
    }

    pub fn filtered_attributes_mut(&mut self) -> &mut Map {
        &mut self.filtered_attributes
    }

    pub fn timestamp(&self) -> Timestamp {
        self.time
    }

    pub fn set_timestamp(&mut self, ts: impl Into<Timestamp>) {
        self.time = ts.into();
    }

    pub fn value(&self) -> Option<NumberValue> {
        self.value
    }

    pub fn value_type(&self) -> NumberDataPointValueType {
        value_type(self.value)
    }

    pub fn set_int_value(&mut self, v: i64) {
        self.value = Some(NumberValue::Int(v));
    }

    pub fn set_double_value(&mut self, v: f64) {
        self.value = Some(NumberValue::Double(v));
    }

    pub fn trace_id(&self) -> &[u8] {
        &self.trace_id
    }

    pub fn set_trace_id(&mut self, id: impl Into<Vec<u8>>) {
        self.trace_id = id.into();
    }

    pub fn span_id(&self) -> &[u8] {
        &self.span_id
    }

    pub fn set_span_id(&mut self, id: impl Into<Vec<u8>>) {
        self.span_id = id.into();
    }
}

const ATTRIBUTES_LABEL: sval::Label =
    sval::Label::new("attributes").with_tag(&sval::tags::VALUE_IDENT);
const FILTERED_ATTRIBUTES_LABEL: sval::Label =
    sval::Label::new("filteredAttributes").with_tag(&sval::tags::VALUE_IDENT);
const START_TIME_LABEL: sval::Label =
    sval::Label::new("startTimeUnixNano").with_tag(&sval::tags::VALUE_IDENT);
const TIME_LABEL: sval::Label = sval::Label::new("timeUnixNano").with_tag(&sval::tags::VALUE_IDENT);
const AS_DOUBLE_LABEL: sval::Label = sval::Label::new("asDouble").with_tag(&sval::tags::VALUE_IDENT);
const AS_INT_LABEL: sval::Label = sval::Label::new("asInt").with_tag(&sval::tags::VALUE_IDENT);
const EXEMPLARS_LABEL: sval::Label =
    sval::Label::new("exemplars").with_tag(&sval::tags::VALUE_IDENT);
const FLAGS_LABEL: sval::Label = sval::Label::new("flags").with_tag(&sval::tags::VALUE_IDENT);
const SPAN_ID_LABEL: sval::Label = sval::Label::new("spanId").with_tag(&sval::tags::VALUE_IDENT);
const TRACE_ID_LABEL: sval::Label = sval::Label::new("traceId").with_tag(&sval::tags::VALUE_IDENT);

const NUMBER_ATTRIBUTES_INDEX: sval::Index = sval::Index::new(7);
const NUMBER_START_TIME_INDEX: sval::Index = sval::Index::new(2);
const NUMBER_TIME_INDEX: sval::Index = sval::Index::new(3);
const NUMBER_AS_DOUBLE_INDEX: sval::Index = sval::Index::new(4);
const NUMBER_EXEMPLARS_INDEX: sval::Index = sval::Index::new(5);
const NUMBER_AS_INT_INDEX: sval::Index = sval::Index::new(6);
const NUMBER_FLAGS_INDEX: sval::Index = sval::Index::new(8);

const EXEMPLAR_FILTERED_ATTRIBUTES_INDEX: sval::Index = sval::Index::new(7);
const EXEMPLAR_TIME_INDEX: sval::Index = sval::Index::new(2);
const EXEMPLAR_AS_DOUBLE_INDEX: sval::Index = sval::Index::new(3);
const EXEMPLAR_SPAN_ID_INDEX: sval::Index = sval::Index::new(4);
const EXEMPLAR_TRACE_ID_INDEX: sval::Index = sval::Index::new(5);
const EXEMPLAR_AS_INT_INDEX: sval::Index = sval::Index::new(6);

fn stream_number_value<'sval, S: sval::Stream<'sval> + ?Sized>(
    stream: &mut S,
    value: Option<NumberValue>,
    (as_double, as_int): (&sval::Index, &sval::Index),
) -> sval::Result {
    match value {
        Some(NumberValue::Double(v)) => {
            stream_field(stream, &AS_DOUBLE_LABEL, as_double, |stream| {
                stream.value_computed(&JsonDouble(v))
            })
        }
        Some(NumberValue::Int(v)) => {
            stream_field(stream, &AS_INT_LABEL, as_int, |stream| stream.i64(v))
        }
        None => Ok(()),
    }
}

impl sval::Value for NumberDataPoint {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(
            &mut *stream,
            &ATTRIBUTES_LABEL,
            &NUMBER_ATTRIBUTES_INDEX,
            |stream| stream.value(&self.attributes),
        )?;
        stream_field(
            &mut *stream,
            &START_TIME_LABEL,
            &NUMBER_START_TIME_INDEX,
            |stream| stream.u64(self.start_time.as_unix_nanos()),
        )?;
        stream_field(&mut *stream, &TIME_LABEL, &NUMBER_TIME_INDEX, |stream| {
            stream.u64(self.time.as_unix_nanos())
        })?;
        stream_number_value(
            &mut *stream,
            self.value,
            (&NUMBER_AS_DOUBLE_INDEX, &NUMBER_AS_INT_INDEX),
        )?;

        if !self.exemplars.is_empty() {
            stream_field(
                &mut *stream,
                &EXEMPLARS_LABEL,
                &NUMBER_EXEMPLARS_INDEX,
                |stream| stream.value(&self.exemplars),
            )?;
        }

        stream_field(&mut *stream, &FLAGS_LABEL, &NUMBER_FLAGS_INDEX, |stream| {
            stream.u32(self.flags.bits())
        })?;

        stream.record_tuple_end(None, None, None)
    }
}

impl sval::Value for Exemplar {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(
            &mut *stream,
            &FILTERED_ATTRIBUTES_LABEL,
            &EXEMPLAR_FILTERED_ATTRIBUTES_INDEX,
            |stream| stream.value(&self.filtered_attributes),
        )?;
        stream_field(&mut *stream, &TIME_LABEL, &EXEMPLAR_TIME_INDEX, |stream| {
            stream.u64(self.time.as_unix_nanos())
        })?;
        stream_number_value(
            &mut *stream,
            self.value,
            (&EXEMPLAR_AS_DOUBLE_INDEX, &EXEMPLAR_AS_INT_INDEX),
        )?;

        // Ids are rendered as hex, the same as in OTLP/JSON traces
        if !self.span_id.is_empty() {
            stream_field(&mut *stream, &SPAN_ID_LABEL, &EXEMPLAR_SPAN_ID_INDEX, |stream| {
                stream.value_computed(&*hex(&self.span_id))
            })?;
        }

        if !self.trace_id.is_empty() {
            stream_field(
                &mut *stream,
                &TRACE_ID_LABEL,
                &EXEMPLAR_TRACE_ID_INDEX,
                |stream| stream.value_computed(&*hex(&self.trace_id)),
            )?;
        }

        stream.record_tuple_end(None, None, None)
    }
}

const COUNT_LABEL: sval::Label = sval::Label::new("count").with_tag(&sval::tags::VALUE_IDENT);
const SUM_LABEL: sval::Label = sval::Label::new("sum").with_tag(&sval::tags::VALUE_IDENT);
const MIN_LABEL: sval::Label = sval::Label::new("min").with_tag(&sval::tags::VALUE_IDENT);
const MAX_LABEL: sval::Label = sval::Label::new("max").with_tag(&sval::tags::VALUE_IDENT);
const BUCKET_COUNTS_LABEL: sval::Label =
    sval::Label::new("bucketCounts").with_tag(&sval::tags::VALUE_IDENT);
const EXPLICIT_BOUNDS_LABEL: sval::Label =
    sval::Label::new("explicitBounds").with_tag(&sval::tags::VALUE_IDENT);
const SCALE_LABEL: sval::Label = sval::Label::new("scale").with_tag(&sval::tags::VALUE_IDENT);
const ZERO_COUNT_LABEL: sval::Label =
    sval::Label::new("zeroCount").with_tag(&sval::tags::VALUE_IDENT);
const POSITIVE_LABEL: sval::Label = sval::Label::new("positive").with_tag(&sval::tags::VALUE_IDENT);
const NEGATIVE_LABEL: sval::Label = sval::Label::new("negative").with_tag(&sval::tags::VALUE_IDENT);
const ZERO_THRESHOLD_LABEL: sval::Label =
    sval::Label::new("zeroThreshold").with_tag(&sval::tags::VALUE_IDENT);
const QUANTILE_VALUES_LABEL: sval::Label =
    sval::Label::new("quantileValues").with_tag(&sval::tags::VALUE_IDENT);
const QUANTILE_LABEL: sval::Label = sval::Label::new("quantile").with_tag(&sval::tags::VALUE_IDENT);
const VALUE_LABEL: sval::Label = sval::Label::new("value").with_tag(&sval::tags::VALUE_IDENT);

const HISTOGRAM_START_TIME_INDEX: sval::Index = sval::Index::new(2);
const HISTOGRAM_TIME_INDEX: sval::Index = sval::Index::new(3);
const HISTOGRAM_COUNT_INDEX: sval::Index = sval::Index::new(4);
const HISTOGRAM_SUM_INDEX: sval::Index = sval::Index::new(5);
const HISTOGRAM_BUCKET_COUNTS_INDEX: sval::Index = sval::Index::new(6);
const HISTOGRAM_EXPLICIT_BOUNDS_INDEX: sval::Index = sval::Index::new(7);
const HISTOGRAM_EXEMPLARS_INDEX: sval::Index = sval::Index::new(8);
const HISTOGRAM_ATTRIBUTES_INDEX: sval::Index = sval::Index::new(9);
const HISTOGRAM_FLAGS_INDEX: sval::Index = sval::Index::new(10);
const HISTOGRAM_MIN_INDEX: sval::Index = sval::Index::new(11);
const HISTOGRAM_MAX_INDEX: sval::Index = sval::Index::new(12);

const EXP_ATTRIBUTES_INDEX: sval::Index = sval::Index::new(1);
const EXP_START_TIME_INDEX: sval::Index = sval::Index::new(2);
const EXP_TIME_INDEX: sval::Index = sval::Index::new(3);
const EXP_COUNT_INDEX: sval::Index = sval::Index::new(4);
const EXP_SUM_INDEX: sval::Index = sval::Index::new(5);
const EXP_SCALE_INDEX: sval::Index = sval::Index::new(6);
const EXP_ZERO_COUNT_INDEX: sval::Index = sval::Index::new(7);
const EXP_POSITIVE_INDEX: sval::Index = sval::Index::new(8);
const EXP_NEGATIVE_INDEX: sval::Index = sval::Index::new(9);
const EXP_FLAGS_INDEX: sval::Index = sval::Index::new(10);
const EXP_EXEMPLARS_INDEX: sval::Index = sval::Index::new(11);
const EXP_MIN_INDEX: sval::Index = sval::Index::new(12);
const EXP_MAX_INDEX: sval::Index = sval::Index::new(13);
const EXP_ZERO_THRESHOLD_INDEX: sval::Index = sval::Index::new(14);

const SUMMARY_START_TIME_INDEX: sval::Index = sval::Index::new(2);
const SUMMARY_TIME_INDEX: sval::Index = sval::Index::new(3);
const SUMMARY_COUNT_INDEX: sval::Index = sval::Index::new(4);
const SUMMARY_SUM_INDEX: sval::Index = sval::Index::new(5);
const SUMMARY_QUANTILE_VALUES_INDEX: sval::Index = sval::Index::new(6);
const SUMMARY_ATTRIBUTES_INDEX: sval::Index = sval::Index::new(7);
const SUMMARY_FLAGS_INDEX: sval::Index = sval::Index::new(8);

const QUANTILE_INDEX: sval::Index = sval::Index::new(1);
const VALUE_INDEX: sval::Index = sval::Index::new(2);

fn stream_optional_double<'sval, S: sval::Stream<'sval> + ?Sized>(
    stream: &mut S,
    label: &sval::Label,
    index: &sval::Index,
    value: Option<f64>,
) -> sval::Result {
    match value {
        Some(v) => stream_field(stream, label, index, |stream| {
            stream.value_computed(&JsonDouble(v))
        }),
        None => Ok(()),
    }
}

fn stream_exemplars<'sval, S: sval::Stream<'sval> + ?Sized>(
    stream: &mut S,
    index: &sval::Index,
    exemplars: &'sval ExemplarSlice,
) -> sval::Result {
    if exemplars.is_empty() {
        return Ok(());
    }

    stream_field(stream, &EXEMPLARS_LABEL, index, |stream| stream.value(exemplars))
}

impl sval::Value for HistogramDataPoint {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(
            &mut *stream,
            &ATTRIBUTES_LABEL,
            &HISTOGRAM_ATTRIBUTES_INDEX,
            |stream| stream.value(&self.attributes),
        )?;
        stream_field(
            &mut *stream,
            &START_TIME_LABEL,
            &HISTOGRAM_START_TIME_INDEX,
            |stream| stream.u64(self.start_time.as_unix_nanos()),
        )?;
        stream_field(&mut *stream, &TIME_LABEL, &HISTOGRAM_TIME_INDEX, |stream| {
            stream.u64(self.time.as_unix_nanos())
        })?;
        stream_field(&mut *stream, &COUNT_LABEL, &HISTOGRAM_COUNT_INDEX, |stream| {
            stream.u64(self.count)
        })?;
        stream_optional_double(&mut *stream, &SUM_LABEL, &HISTOGRAM_SUM_INDEX, self.sum)?;
        stream_field(
            &mut *stream,
            &BUCKET_COUNTS_LABEL,
            &HISTOGRAM_BUCKET_COUNTS_INDEX,
            |stream| stream.value(&self.bucket_counts),
        )?;
        stream_field(
            &mut *stream,
            &EXPLICIT_BOUNDS_LABEL,
            &HISTOGRAM_EXPLICIT_BOUNDS_INDEX,
            |stream| stream.value_computed(&JsonDoubles(&self.explicit_bounds)),
        )?;
        stream_exemplars(&mut *stream, &HISTOGRAM_EXEMPLARS_INDEX, &self.exemplars)?;
        stream_field(&mut *stream, &FLAGS_LABEL, &HISTOGRAM_FLAGS_INDEX, |stream| {
            stream.u32(self.flags.bits())
        })?;
        stream_optional_double(&mut *stream, &MIN_LABEL, &HISTOGRAM_MIN_INDEX, self.min)?;
        stream_optional_double(&mut *stream, &MAX_LABEL, &HISTOGRAM_MAX_INDEX, self.max)?;

        stream.record_tuple_end(None, None, None)
    }
}

impl sval::Value for ExponentialHistogramDataPoint {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(&mut *stream, &ATTRIBUTES_LABEL, &EXP_ATTRIBUTES_INDEX, |stream| {
            stream.value(&self.attributes)
        })?;
        stream_field(&mut *stream, &START_TIME_LABEL, &EXP_START_TIME_INDEX, |stream| {
            stream.u64(self.start_time.as_unix_nanos())
        })?;
        stream_field(&mut *stream, &TIME_LABEL, &EXP_TIME_INDEX, |stream| {
            stream.u64(self.time.as_unix_nanos())
        })?;
        stream_field(&mut *stream, &COUNT_LABEL, &EXP_COUNT_INDEX, |stream| {
            stream.u64(self.count)
        })?;
        stream_optional_double(&mut *stream, &SUM_LABEL, &EXP_SUM_INDEX, self.sum)?;
        stream_field(&mut *stream, &SCALE_LABEL, &EXP_SCALE_INDEX, |stream| {
            stream.i32(self.scale)
        })?;
        stream_field(&mut *stream, &ZERO_COUNT_LABEL, &EXP_ZERO_COUNT_INDEX, |stream| {
            stream.u64(self.zero_count)
        })?;
        stream_field(&mut *stream, &POSITIVE_LABEL, &EXP_POSITIVE_INDEX, |stream| {
            stream.value(&self.positive)
        })?;
        stream_field(&mut *stream, &NEGATIVE_LABEL, &EXP_NEGATIVE_INDEX, |stream| {
            stream.value(&self.negative)
        })?;
        stream_field(&mut *stream, &FLAGS_LABEL, &EXP_FLAGS_INDEX, |stream| {
            stream.u32(self.flags.bits())
        })?;
        stream_exemplars(&mut *stream, &EXP_EXEMPLARS_INDEX, &self.exemplars)?;
        stream_optional_double(&mut *stream, &MIN_LABEL, &EXP_MIN_INDEX, self.min)?;
        stream_optional_double(&mut *stream, &MAX_LABEL, &EXP_MAX_INDEX, self.max)?;
        stream_field(
            &mut *stream,
            &ZERO_THRESHOLD_LABEL,
            &EXP_ZERO_THRESHOLD_INDEX,
            |stream| stream.value_computed(&JsonDouble(self.zero_threshold)),
        )?;

        stream.record_tuple_end(None, None, None)
    }
}

impl sval::Value for SummaryDataPoint {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(
            &mut *stream,
            &ATTRIBUTES_LABEL,
            &SUMMARY_ATTRIBUTES_INDEX,
            |stream| stream.value(&self.attributes),
        )?;
        stream_field(
            &mut *stream,
            &START_TIME_LABEL,
            &SUMMARY_START_TIME_INDEX,
            |stream| stream.u64(self.start_time.as_unix_nanos()),
        )?;
        stream_field(&mut *stream, &TIME_LABEL, &SUMMARY_TIME_INDEX, |stream| {
            stream.u64(self.time.as_unix_nanos())
        })?;
        stream_field(&mut *stream, &COUNT_LABEL, &SUMMARY_COUNT_INDEX, |stream| {
            stream.u64(self.count)
        })?;
        stream_field(&mut *stream, &SUM_LABEL, &SUMMARY_SUM_INDEX, |stream| {
            stream.value_computed(&JsonDouble(self.sum))
        })?;
        stream_field(
            &mut *stream,
            &QUANTILE_VALUES_LABEL,
            &SUMMARY_QUANTILE_VALUES_INDEX,
            |stream| stream.value(&self.quantile_values),
        )?;
        stream_field(&mut *stream, &FLAGS_LABEL, &SUMMARY_FLAGS_INDEX, |stream| {
            stream.u32(self.flags.bits())
        })?;

        stream.record_tuple_end(None, None, None)
    }
}

impl sval::Value for ValueAtQuantile {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(&mut *stream, &QUANTILE_LABEL, &QUANTILE_INDEX, |stream| {
            stream.value_computed(&JsonDouble(self.quantile))
        })?;
        stream_field(&mut *stream, &VALUE_LABEL, &VALUE_INDEX, |stream| {
            stream.value_computed(&JsonDouble(self.value))
        })?;

        stream.record_tuple_end(None, None, None)
    }
}

fn hex(bytes: &[u8]) -> String {
    const HEX_ENCODE_TABLE: &[u8; 16] = b"0123456789abcdef";

    let mut hex = String::with_capacity(bytes.len() * 2);

    for b in bytes {
        hex.push(HEX_ENCODE_TABLE[(b >> 4) as usize] as char);
        hex.push(HEX_ENCODE_TABLE[(b & 0x0f) as usize] as char);
    }

    hex
}
