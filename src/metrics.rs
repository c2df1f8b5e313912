/*!
The metrics data model.

A [`Metrics`] value owns a tree of [`ResourceMetrics`], each holding [`ScopeMetrics`], each holding [`Metric`]s with typed data points:

```text
Metrics
└── ResourceMetrics (Resource, schema URL)
    └── ScopeMetrics (InstrumentationScope, schema URL)
        └── Metric (name, description, unit)
            └── Gauge | Sum | Histogram | ExponentialHistogram | Summary
                └── data points
```

Everything below the root is reached through borrows of it, so a pipeline stage that owns a `Metrics` can navigate and mutate it in place before handing it on.
*/

use std::mem;

use sval_derive::Value;

use crate::{
    common::InstrumentationScope,
    resource::Resource,
    slice::Slice,
};

mod data_point;
mod flags;
mod metric;

pub use self::{data_point::*, flags::*, metric::*};

pub type ResourceMetricsSlice = Slice<ResourceMetrics>;
pub type ScopeMetricsSlice = Slice<ScopeMetrics>;
pub type MetricSlice = Slice<Metric>;
pub type NumberDataPointSlice = Slice<NumberDataPoint>;
pub type HistogramDataPointSlice = Slice<HistogramDataPoint>;
pub type ExponentialHistogramDataPointSlice = Slice<ExponentialHistogramDataPoint>;
pub type SummaryDataPointSlice = Slice<SummaryDataPoint>;
pub type ValueAtQuantileSlice = Slice<ValueAtQuantile>;
pub type ExemplarSlice = Slice<Exemplar>;

/**
A batch of metrics passed between pipeline stages.

`Metrics` can be cloned to produce a fully independent copy, or moved into another value with [`Metrics::move_to`].
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Metrics {
    #[sval(label = "resourceMetrics", index = 1)]
    pub(crate) resource_metrics: ResourceMetricsSlice,
}

impl Metrics {
    /**
    Create an empty batch.
    */
    pub fn new() -> Self {
        Metrics {
            resource_metrics: Slice::new(),
        }
    }

    pub fn resource_metrics(&self) -> &ResourceMetricsSlice {
        &self.resource_metrics
    }

    pub fn resource_metrics_mut(&mut self) -> &mut ResourceMetricsSlice {
        &mut self.resource_metrics
    }

    /**
    Move the contents of this batch into `dest`, replacing whatever it held.

    This batch is left empty.
    */
    pub fn move_to(&mut self, dest: &mut Metrics) {
        *dest = mem::take(self);
    }

    /**
    The total number of metrics across all resources and scopes.
    */
    pub fn metric_count(&self) -> usize {
        self.scope_metrics().map(|sm| sm.metrics.len()).sum()
    }

    /**
    The total number of data points across all metrics.

    Metrics without a payload contribute no data points.
    */
    pub fn data_point_count(&self) -> usize {
        self.scope_metrics()
            .flat_map(|sm| sm.metrics.iter())
            .map(Metric::data_point_count)
            .sum()
    }

    fn scope_metrics(&self) -> impl Iterator<Item = &ScopeMetrics> + '_ {
        self.resource_metrics
            .iter()
            .flat_map(|rm| rm.scope_metrics.iter())
    }
}

/**
The metrics produced by a single [`Resource`].
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct ResourceMetrics {
    #[sval(label = "resource", index = 1)]
    pub(crate) resource: Resource,
    #[sval(label = "scopeMetrics", index = 2)]
    pub(crate) scope_metrics: ScopeMetricsSlice,
    #[sval(label = "schemaUrl", index = 3)]
    pub(crate) schema_url: String,
}

impl ResourceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    pub fn schema_url(&self) -> &str {
        &self.schema_url
    }

    pub fn set_schema_url(&mut self, schema_url: impl Into<String>) {
        self.schema_url = schema_url.into();
    }

    pub fn scope_metrics(&self) -> &ScopeMetricsSlice {
        &self.scope_metrics
    }

    pub fn scope_metrics_mut(&mut self) -> &mut ScopeMetricsSlice {
        &mut self.scope_metrics
    }
}

/**
The metrics produced by a single [`InstrumentationScope`].
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct ScopeMetrics {
    #[sval(label = "scope", index = 1)]
    pub(crate) scope: InstrumentationScope,
    #[sval(label = "metrics", index = 2)]
    pub(crate) metrics: MetricSlice,
    #[sval(label = "schemaUrl", index = 3)]
    pub(crate) schema_url: String,
}

impl ScopeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> &InstrumentationScope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut InstrumentationScope {
        &mut self.scope
    }

    pub fn schema_url(&self) -> &str {
        &self.schema_url
    }

    pub fn set_schema_url(&mut self, schema_url: impl Into<String>) {
        self.schema_url = schema_url.into();
    }

    pub fn metrics(&self) -> &MetricSlice {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut MetricSlice {
        &mut self.metrics
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    use super::*;

    pub(crate) const START_TIME: u64 = 12578940000000012345;
    pub(crate) const END_TIME: u64 = 12578940000000054321;

    /**
    A batch covering every payload kind, with attributes and exemplars at each level.
    */
    pub(crate) fn metrics() -> Metrics {
        let mut md = Metrics::new();

        let rm = md.resource_metrics_mut().append_empty();
        rm.set_schema_url("https://opentelemetry.io/schemas/1.21.0");
        rm.resource_mut()
            .attributes_mut()
            .insert("string", "string-resource");
        rm.resource_mut().set_dropped_attributes_count(1);

        let sm = rm.scope_metrics_mut().append_empty();
        sm.scope_mut().set_name("emit_pdata");
        sm.scope_mut().set_version("0.1.0");
        sm.scope_mut().attributes_mut().insert("scope", true);

        fill_int_gauge(sm.metrics_mut().append_empty());
        fill_double_sum(sm.metrics_mut().append_empty());
        fill_double_histogram(sm.metrics_mut().append_empty());
        fill_exponential_histogram(sm.metrics_mut().append_empty());
        fill_summary(sm.metrics_mut().append_empty());

        md
    }

    fn fill_attributes(dp_attributes: &mut crate::common::Map, i: usize) {
        dp_attributes.insert(format!("key{i}"), format!("value{i}"));
    }

    pub(crate) fn fill_int_gauge(metric: &mut Metric) {
        metric.set_name("my_metric_int");
        metric.set_description("My metric");
        metric.set_unit("ms");
        metric.set_data_type(MetricDataType::Gauge);

        let points = metric.gauge_mut().data_points_mut();

        let dp = points.append_empty();
        fill_attributes(dp.attributes_mut(), 0);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_int_value(123);

        let dp = points.append_empty();
        fill_attributes(dp.attributes_mut(), 1);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_int_value(456);

        let exemplar = dp.exemplars_mut().append_empty();
        exemplar.set_timestamp(END_TIME);
        exemplar.set_int_value(-7);
        exemplar.set_trace_id(vec![1u8; 16]);
        exemplar.set_span_id(vec![2u8; 8]);
        exemplar.filtered_attributes_mut().insert("filtered", -1i64);
    }

    pub(crate) fn fill_double_sum(metric: &mut Metric) {
        metric.set_name("my_metric_double");
        metric.set_description("My metric");
        metric.set_unit("ms");
        metric.set_data_type(MetricDataType::Sum);

        let sum = metric.sum_mut();
        sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
        sum.set_is_monotonic(true);

        let dp = sum.data_points_mut().append_empty();
        fill_attributes(dp.attributes_mut(), 0);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_double_value(123.1);

        let dp = sum.data_points_mut().append_empty();
        fill_attributes(dp.attributes_mut(), 1);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_double_value(456.1);
        dp.set_flags(DataPointFlag::NO_RECORDED_VALUE);
    }

    pub(crate) fn fill_double_histogram(metric: &mut Metric) {
        metric.set_name("my_metric_histogram");
        metric.set_description("My metric");
        metric.set_unit("ms");
        metric.set_data_type(MetricDataType::Histogram);

        let histogram = metric.histogram_mut();
        histogram.set_aggregation_temporality(AggregationTemporality::Delta);

        let dp = histogram.data_points_mut().append_empty();
        fill_attributes(dp.attributes_mut(), 0);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_count(1);
        dp.set_sum(15.0);
        dp.set_bucket_counts(vec![0u64, 1]);
        dp.set_explicit_bounds(vec![1.0]);

        let dp = histogram.data_points_mut().append_empty();
        fill_attributes(dp.attributes_mut(), 1);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_count(26);
        dp.set_sum(15.0);
        dp.set_min(0.5);
        dp.set_max(5.0);
        dp.set_bucket_counts(vec![10u64, 15, 1]);
        dp.set_explicit_bounds(vec![1.0, 2.0]);

        let exemplar = dp.exemplars_mut().append_empty();
        exemplar.set_timestamp(END_TIME);
        exemplar.set_double_value(1.5);
    }

    pub(crate) fn fill_exponential_histogram(metric: &mut Metric) {
        metric.set_name("my_metric_exponential_histogram");
        metric.set_data_type(MetricDataType::ExponentialHistogram);

        let histogram = metric.exponential_histogram_mut();
        histogram.set_aggregation_temporality(AggregationTemporality::Cumulative);

        let dp = histogram.data_points_mut().append_empty();
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_count(7);
        dp.set_sum(-3.5);
        dp.set_scale(-2);
        dp.set_zero_count(1);
        dp.set_zero_threshold(0.001);
        dp.positive_mut().set_offset(-1);
        dp.positive_mut().set_bucket_counts(vec![1u64, 2]);
        dp.negative_mut().set_offset(3);
        dp.negative_mut().set_bucket_counts(vec![3u64]);
    }

    pub(crate) fn fill_summary(metric: &mut Metric) {
        metric.set_name("my_metric_summary");
        metric.set_data_type(MetricDataType::Summary);

        let dp = metric.summary_mut().data_points_mut().append_empty();
        fill_attributes(dp.attributes_mut(), 0);
        dp.set_start_timestamp(START_TIME);
        dp.set_timestamp(END_TIME);
        dp.set_count(100);
        dp.set_sum(1024.5);
        dp.quantile_values_mut()
            .extend([ValueAtQuantile::new(0.5, 9.0), ValueAtQuantile::new(0.99, 42.0)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_count() {
        let mut md = Metrics::new();
        assert_eq!(0, md.metric_count());

        md.resource_metrics_mut().append_empty();
        assert_eq!(0, md.metric_count());

        let rm = md.resource_metrics_mut().at_mut(0);
        rm.scope_metrics_mut().append_empty();
        assert_eq!(0, md.metric_count());

        let rm = md.resource_metrics_mut().at_mut(0);
        rm.scope_metrics_mut().at_mut(0).metrics_mut().append_empty();
        assert_eq!(1, md.metric_count());

        let rms = md.resource_metrics_mut();
        rms.ensure_capacity(3);
        rms.append_empty().scope_metrics_mut().append_empty();

        let ilms = rms.append_empty().scope_metrics_mut();
        ilms.append_empty();
        let ms = ilms.append_empty().metrics_mut();
        for _ in 0..5 {
            ms.append_empty();
        }

        // 5 + 1 (from rms[0]) metrics
        assert_eq!(6, md.metric_count());
    }

    #[test]
    fn metric_count_with_empty() {
        let mut md = Metrics::new();
        md.resource_metrics_mut().append_empty();
        assert_eq!(0, md.metric_count());

        let mut md = Metrics::new();
        md.resource_metrics_mut()
            .append_empty()
            .scope_metrics_mut()
            .append_empty();
        assert_eq!(0, md.metric_count());

        let mut md = Metrics::new();
        md.resource_metrics_mut()
            .append_empty()
            .scope_metrics_mut()
            .append_empty()
            .metrics_mut()
            .append_empty();
        assert_eq!(1, md.metric_count());
    }

    #[test]
    fn metric_and_data_point_count() {
        let mut md = Metrics::new();
        assert_eq!(0, md.data_point_count());

        md.resource_metrics_mut().append_empty();
        assert_eq!(0, md.data_point_count());

        md.resource_metrics_mut()
            .at_mut(0)
            .scope_metrics_mut()
            .append_empty();
        assert_eq!(0, md.data_point_count());

        let metric = md.resource_metrics_mut()[0].scope_metrics_mut()[0]
            .metrics_mut()
            .append_empty();
        metric.set_data_type(MetricDataType::Sum);
        metric.sum_mut().data_points_mut().append_empty();
        assert_eq!(1, md.data_point_count());

        let rms = md.resource_metrics_mut();
        rms.append_empty().scope_metrics_mut().append_empty();

        let ilms = rms.append_empty().scope_metrics_mut();
        ilms.append_empty();
        let ms = ilms.append_empty().metrics_mut();
        for _ in 0..5 {
            ms.append_empty();
        }

        // 5 metrics without a payload add no data points
        assert_eq!(6, md.metric_count());
        assert_eq!(1, md.data_point_count());

        let ms = md.resource_metrics_mut().at_mut(2).scope_metrics_mut().at_mut(1).metrics_mut();

        ms.at_mut(1).set_data_type(MetricDataType::Gauge);
        ms.at_mut(1).gauge_mut().data_points_mut().append_empty();

        ms.at_mut(3).set_data_type(MetricDataType::Sum);
        ms.at_mut(3).sum_mut().data_points_mut().append_empty();

        assert_eq!(6, md.metric_count());
        assert_eq!(3, md.data_point_count());
    }

    #[test]
    fn data_point_count_every_payload_kind() {
        let md = test_data::metrics();

        assert_eq!(5, md.metric_count());
        // 2 gauge + 2 sum + 2 histogram + 1 exponential histogram + 1 summary
        assert_eq!(8, md.data_point_count());
    }

    #[test]
    fn data_point_count_with_empty_payloads() {
        let mut md = Metrics::new();
        let ms = md
            .resource_metrics_mut()
            .append_empty()
            .scope_metrics_mut()
            .append_empty()
            .metrics_mut();

        for ty in [
            MetricDataType::Gauge,
            MetricDataType::Sum,
            MetricDataType::Histogram,
            MetricDataType::ExponentialHistogram,
            MetricDataType::Summary,
        ] {
            ms.append_empty().set_data_type(ty);
        }

        assert_eq!(5, md.metric_count());
        assert_eq!(0, md.data_point_count());
    }

    #[test]
    fn scenario_two_resources() {
        let mut md = Metrics::new();

        // Resource 0: one scope with two metrics, a gauge with two points and a metric with no payload
        let ms = md
            .resource_metrics_mut()
            .append_empty()
            .scope_metrics_mut()
            .append_empty()
            .metrics_mut();

        let gauge = ms.append_empty();
        gauge.set_data_type(MetricDataType::Gauge);
        gauge.gauge_mut().data_points_mut().append_empty();
        gauge.gauge_mut().data_points_mut().append_empty();

        ms.append_empty();

        // Resource 1: two scopes, the first empty and the second with five metrics
        let sms = md.resource_metrics_mut().append_empty().scope_metrics_mut();
        sms.append_empty();
        let ms = sms.append_empty().metrics_mut();

        for _ in 0..4 {
            ms.append_empty();
        }

        let sum = ms.append_empty();
        sum.set_data_type(MetricDataType::Sum);
        sum.sum_mut().data_points_mut().append_empty();

        assert_eq!(7, md.metric_count());
        assert_eq!(3, md.data_point_count());
    }

    #[test]
    fn changing_data_type_discards_points() {
        let mut md = Metrics::new();
        let metric = md
            .resource_metrics_mut()
            .append_empty()
            .scope_metrics_mut()
            .append_empty()
            .metrics_mut()
            .append_empty();

        metric.set_data_type(MetricDataType::Gauge);
        metric.gauge_mut().data_points_mut().append_empty();
        metric.gauge_mut().data_points_mut().append_empty();
        assert_eq!(2, md.data_point_count());

        let metric = &mut md.resource_metrics_mut()[0].scope_metrics_mut()[0].metrics_mut()[0];
        metric.set_data_type(MetricDataType::Sum);

        assert_eq!(MetricDataType::Sum, metric.data_type());
        assert_eq!(0, metric.sum().data_points().len());
        assert_eq!(1, md.metric_count());
        assert_eq!(0, md.data_point_count());
    }

    #[test]
    fn move_to() {
        let mut md = test_data::metrics();
        let expected = md.clone();

        let mut dest = Metrics::new();
        md.move_to(&mut dest);

        assert_eq!(Metrics::new(), md);
        assert_eq!(expected, dest);

        dest.move_to(&mut md);

        assert_eq!(Metrics::new(), dest);
        assert_eq!(expected, md);
    }

    #[test]
    fn move_to_replaces_dest() {
        let mut md = Metrics::new();
        md.resource_metrics_mut().append_empty();

        let mut dest = test_data::metrics();
        md.move_to(&mut dest);

        assert_eq!(1, dest.resource_metrics().len());
        assert_eq!(0, dest.metric_count());
    }

    #[test]
    fn clone_is_independent() {
        let md = test_data::metrics();
        let mut cloned = md.clone();

        assert_eq!(md, cloned);

        cloned
            .resource_metrics_mut()
            .at_mut(0)
            .resource_mut()
            .attributes_mut()
            .insert("string", "changed");
        cloned.resource_metrics_mut()[0].scope_metrics_mut()[0].metrics_mut()[0]
            .set_name("changed");

        assert_ne!(md, cloned);
        assert_eq!(
            Some("string-resource"),
            md.resource_metrics()[0]
                .resource()
                .attributes()
                .get("string")
                .and_then(|v| v.as_str())
        );
        assert_eq!(
            "my_metric_int",
            md.resource_metrics()[0].scope_metrics()[0].metrics()[0].name()
        );
    }

    #[test]
    fn copy_to() {
        let md = test_data::metrics();

        let mut dest = ResourceMetricsSlice::new();
        dest.append_empty().set_schema_url("discarded");

        md.resource_metrics().copy_to(&mut dest);

        assert_eq!(md.resource_metrics(), &dest);
    }

    #[test]
    fn mutate_through_views() {
        let mut md = test_data::metrics();

        for rm in md.resource_metrics_mut() {
            for sm in rm.scope_metrics_mut() {
                for metric in sm.metrics_mut() {
                    if let Some(MetricData::Gauge(gauge)) = metric.data_mut() {
                        for dp in gauge.data_points_mut() {
                            dp.attributes_mut().insert("mutated", true);
                        }
                    }
                }
            }
        }

        let gauge = md.resource_metrics()[0].scope_metrics()[0].metrics()[0].gauge();

        assert!(gauge
            .data_points()
            .iter()
            .all(|dp| dp.attributes().get("mutated").and_then(|v| v.as_bool()) == Some(true)));
    }

    #[test]
    fn flags_scenario() {
        let mut metric = Metric::new();
        metric.set_data_type(MetricDataType::Gauge);

        let dp = metric.gauge_mut().data_points_mut().append_empty();
        assert_eq!(DataPointFlags::NONE, dp.flags());
        assert!(!dp.flags().has_flag(DataPointFlag::NO_RECORDED_VALUE));
        assert_eq!("FLAG_NONE", dp.flags().to_string());

        dp.set_flags(DataPointFlags::new([DataPointFlag::NO_RECORDED_VALUE]));
        assert!(dp.flags().has_flag(DataPointFlag::NO_RECORDED_VALUE));
        assert_eq!("FLAG_NO_RECORDED_VALUE", dp.flags().to_string());
    }
}
