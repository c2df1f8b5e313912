use std::fmt;

use sval_derive::Value;

use crate::{
    encoding::stream_field,
    metrics::{
        AggregationTemporality, ExponentialHistogramDataPointSlice, HistogramDataPointSlice,
        NumberDataPointSlice, SummaryDataPointSlice,
    },
};

/**
A named series of data points.

A metric carries at most one payload, such as a [`Gauge`] or [`Sum`], and its [`MetricDataType`] always matches the payload it carries.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metric {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) unit: String,
    pub(crate) data: Option<MetricData>,
}

/**
The payload of a [`Metric`].
*/
#[derive(Clone, Debug, PartialEq)]
pub enum MetricData {
    Gauge(Gauge),
    Sum(Sum),
    Histogram(Histogram),
    ExponentialHistogram(ExponentialHistogram),
    Summary(Summary),
}

/**
The kind of payload carried by a [`Metric`].
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MetricDataType {
    #[default]
    None,
    Gauge,
    Sum,
    Histogram,
    ExponentialHistogram,
    Summary,
}

impl fmt::Display for MetricDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetricDataType::None => "None",
            MetricDataType::Gauge => "Gauge",
            MetricDataType::Sum => "Sum",
            MetricDataType::Histogram => "Histogram",
            MetricDataType::ExponentialHistogram => "ExponentialHistogram",
            MetricDataType::Summary => "Summary",
        })
    }
}

impl MetricData {
    pub fn data_type(&self) -> MetricDataType {
        match self {
            MetricData::Gauge(_) => MetricDataType::Gauge,
            MetricData::Sum(_) => MetricDataType::Sum,
            MetricData::Histogram(_) => MetricDataType::Histogram,
            MetricData::ExponentialHistogram(_) => MetricDataType::ExponentialHistogram,
            MetricData::Summary(_) => MetricDataType::Summary,
        }
    }

    /**
    Create an empty payload of the given kind.

    [`MetricDataType::None`] has no payload, so returns `None`.
    */
    pub fn empty(ty: MetricDataType) -> Option<Self> {
        match ty {
            MetricDataType::None => None,
            MetricDataType::Gauge => Some(MetricData::Gauge(Gauge::default())),
            MetricDataType::Sum => Some(MetricData::Sum(Sum::default())),
            MetricDataType::Histogram => Some(MetricData::Histogram(Histogram::default())),
            MetricDataType::ExponentialHistogram => Some(MetricData::ExponentialHistogram(
                ExponentialHistogram::default(),
            )),
            MetricDataType::Summary => Some(MetricData::Summary(Summary::default())),
        }
    }

    pub fn data_point_count(&self) -> usize {
        match self {
            MetricData::Gauge(gauge) => gauge.data_points.len(),
            MetricData::Sum(sum) => sum.data_points.len(),
            MetricData::Histogram(histogram) => histogram.data_points.len(),
            MetricData::ExponentialHistogram(histogram) => histogram.data_points.len(),
            MetricData::Summary(summary) => summary.data_points.len(),
        }
    }
}

macro_rules! payload_accessors {
    ($($variant:ident => $ty:ident, $get:ident, $get_mut:ident;)*) => {
        $(
            impl From<$ty> for MetricData {
                fn from(v: $ty) -> Self {
                    MetricData::$variant(v)
                }
            }
        )*

        impl Metric {
            $(
                #[doc = concat!("Get the [`", stringify!($ty), "`] payload.")]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = ""]
                #[doc = concat!("This method panics if the metric's data type isn't [`MetricDataType::", stringify!($variant), "`].")]
                #[track_caller]
                pub fn $get(&self) -> &$ty {
                    match self.data {
                        Some(MetricData::$variant(ref data)) => data,
                        _ => mismatched_data_type(MetricDataType::$variant, self.data_type()),
                    }
                }

                #[doc = concat!("Get the [`", stringify!($ty), "`] payload mutably.")]
                #[doc = ""]
                #[doc = "# Panics"]
                #[doc = ""]
                #[doc = concat!("This method panics if the metric's data type isn't [`MetricDataType::", stringify!($variant), "`].")]
                #[track_caller]
                pub fn $get_mut(&mut self) -> &mut $ty {
                    let actual = self.data_type();

                    match self.data {
                        Some(MetricData::$variant(ref mut data)) => data,
                        _ => mismatched_data_type(MetricDataType::$variant, actual),
                    }
                }
            )*
        }
    };
}

payload_accessors! {
    Gauge => Gauge, gauge, gauge_mut;
    Sum => Sum, sum, sum_mut;
    Histogram => Histogram, histogram, histogram_mut;
    ExponentialHistogram => ExponentialHistogram, exponential_histogram, exponential_histogram_mut;
    Summary => Summary, summary, summary_mut;
}

#[cold]
#[track_caller]
fn mismatched_data_type(expected: MetricDataType, actual: MetricDataType) -> ! {
    panic!("attempt to access the {expected} payload of a metric with data type {actual}")
}

impl Metric {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
    }

    pub fn data_type(&self) -> MetricDataType {
        self.data
            .as_ref()
            .map(MetricData::data_type)
            .unwrap_or(MetricDataType::None)
    }

    /**
    Replace the payload with a new empty one of the given kind.

    Any existing payload is discarded, even if it's already of the requested kind.
    Passing [`MetricDataType::None`] clears the payload.
    */
    pub fn set_data_type(&mut self, ty: MetricDataType) {
        self.data = MetricData::empty(ty);
    }

    pub fn data(&self) -> Option<&MetricData> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut MetricData> {
        self.data.as_mut()
    }

    pub fn set_data(&mut self, data: impl Into<MetricData>) {
        self.data = Some(data.into());
    }

    /**
    The number of data points in this metric's payload.

    A metric with no payload has no data points.
    */
    pub fn data_point_count(&self) -> usize {
        self.data.as_ref().map(MetricData::data_point_count).unwrap_or(0)
    }
}

/**
Point-in-time measurements, such as a temperature or queue depth.
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Gauge {
    #[sval(label = "dataPoints", index = 1)]
    pub(crate) data_points: NumberDataPointSlice,
}

impl Gauge {
    pub fn data_points(&self) -> &NumberDataPointSlice {
        &self.data_points
    }

    pub fn data_points_mut(&mut self) -> &mut NumberDataPointSlice {
        &mut self.data_points
    }
}

/**
Measurements that are added together over time, such as a request count.
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Sum {
    #[sval(label = "dataPoints", index = 1)]
    pub(crate) data_points: NumberDataPointSlice,
    #[sval(label = "aggregationTemporality", index = 2)]
    pub(crate) aggregation_temporality: AggregationTemporality,
    #[sval(label = "isMonotonic", index = 3)]
    pub(crate) is_monotonic: bool,
}

impl Sum {
    pub fn data_points(&self) -> &NumberDataPointSlice {
        &self.data_points
    }

    pub fn data_points_mut(&mut self) -> &mut NumberDataPointSlice {
        &mut self.data_points
    }

    pub fn aggregation_temporality(&self) -> AggregationTemporality {
        self.aggregation_temporality
    }

    pub fn set_aggregation_temporality(&mut self, temporality: AggregationTemporality) {
        self.aggregation_temporality = temporality;
    }

    /**
    Whether the sum only ever increases.
    */
    pub fn is_monotonic(&self) -> bool {
        self.is_monotonic
    }

    pub fn set_is_monotonic(&mut self, is_monotonic: bool) {
        self.is_monotonic = is_monotonic;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Histogram {
    #[sval(label = "dataPoints", index = 1)]
    pub(crate) data_points: HistogramDataPointSlice,
    #[sval(label = "aggregationTemporality", index = 2)]
    pub(crate) aggregation_temporality: AggregationTemporality,
}

impl Histogram {
    pub fn data_points(&self) -> &HistogramDataPointSlice {
        &self.data_points
    }

    pub fn data_points_mut(&mut self) -> &mut HistogramDataPointSlice {
        &mut self.data_points
    }

    pub fn aggregation_temporality(&self) -> AggregationTemporality {
        self.aggregation_temporality
    }

    pub fn set_aggregation_temporality(&mut self, temporality: AggregationTemporality) {
        self.aggregation_temporality = temporality;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct ExponentialHistogram {
    #[sval(label = "dataPoints", index = 1)]
    pub(crate) data_points: ExponentialHistogramDataPointSlice,
    #[sval(label = "aggregationTemporality", index = 2)]
    pub(crate) aggregation_temporality: AggregationTemporality,
}

impl ExponentialHistogram {
    pub fn data_points(&self) -> &ExponentialHistogramDataPointSlice {
        &self.data_points
    }

    pub fn data_points_mut(&mut self) -> &mut ExponentialHistogramDataPointSlice {
        &mut self.data_points
    }

    pub fn aggregation_temporality(&self) -> AggregationTemporality {
        self.aggregation_temporality
    }

    pub fn set_aggregation_temporality(&mut self, temporality: AggregationTemporality) {
        self.aggregation_temporality = temporality;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Summary {
    #[sval(label = "dataPoints", index = 1)]
    pub(crate) data_points: SummaryDataPointSlice,
}

impl Summary {
    pub fn data_points(&self) -> &SummaryDataPointSlice {
        &self.data_points
    }

    pub fn data_points_mut(&mut self) -> &mut SummaryDataPointSlice {
        &mut self.data_points
    }
}

const METRIC_NAME_LABEL: sval::Label = sval::Label::new("name").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_DESCRIPTION_LABEL: sval::Label =
    sval::Label::new("description").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_UNIT_LABEL: sval::Label = sval::Label::new("unit").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_GAUGE_LABEL: sval::Label = sval::Label::new("gauge").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_SUM_LABEL: sval::Label = sval::Label::new("sum").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_HISTOGRAM_LABEL: sval::Label =
    sval::Label::new("histogram").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_EXPONENTIAL_HISTOGRAM_LABEL: sval::Label =
    sval::Label::new("exponentialHistogram").with_tag(&sval::tags::VALUE_IDENT);
const METRIC_SUMMARY_LABEL: sval::Label =
    sval::Label::new("summary").with_tag(&sval::tags::VALUE_IDENT);

const METRIC_NAME_INDEX: sval::Index = sval::Index::new(1);
const METRIC_DESCRIPTION_INDEX: sval::Index = sval::Index::new(2);
const METRIC_UNIT_INDEX: sval::Index = sval::Index::new(3);
const METRIC_GAUGE_INDEX: sval::Index = sval::Index::new(5);
const METRIC_SUM_INDEX: sval::Index = sval::Index::new(7);
const METRIC_HISTOGRAM_INDEX: sval::Index = sval::Index::new(9);
const METRIC_EXPONENTIAL_HISTOGRAM_INDEX: sval::Index = sval::Index::new(10);
const METRIC_SUMMARY_INDEX: sval::Index = sval::Index::new(11);

impl sval::Value for Metric {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.record_tuple_begin(None, None, None, None)?;

        stream_field(&mut *stream, &METRIC_NAME_LABEL, &METRIC_NAME_INDEX, |stream| {
            stream.value(&*self.name)
        })?;

        if !self.description.is_empty() {
            stream_field(
                &mut *stream,
                &METRIC_DESCRIPTION_LABEL,
                &METRIC_DESCRIPTION_INDEX,
                |stream| stream.value(&*self.description),
            )?;
        }

        if !self.unit.is_empty() {
            stream_field(&mut *stream, &METRIC_UNIT_LABEL, &METRIC_UNIT_INDEX, |stream| {
                stream.value(&*self.unit)
            })?;
        }

        match self.data {
            Some(MetricData::Gauge(ref data)) => stream_field(
                &mut *stream,
                &METRIC_GAUGE_LABEL,
                &METRIC_GAUGE_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::Sum(ref data)) => stream_field(
                &mut *stream,
                &METRIC_SUM_LABEL,
                &METRIC_SUM_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::Histogram(ref data)) => stream_field(
                &mut *stream,
                &METRIC_HISTOGRAM_LABEL,
                &METRIC_HISTOGRAM_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::ExponentialHistogram(ref data)) => stream_field(
                &mut *stream,
                &METRIC_EXPONENTIAL_HISTOGRAM_LABEL,
                &METRIC_EXPONENTIAL_HISTOGRAM_INDEX,
                |stream| stream.value(data),
            )?,
            Some(MetricData::Summary(ref data)) => stream_field(
                &mut *stream,
                &METRIC_SUMMARY_LABEL,
                &METRIC_SUMMARY_INDEX,
                |stream| stream.value(data),
            )?,
            None => (),
        }

        stream.record_tuple_end(None, None, None)
    }
}
