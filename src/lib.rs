/*!
An in-memory data model for metrics flowing through a telemetry pipeline.

The model mirrors OpenTelemetry's metrics data model: a [`Metrics`] batch owns [`ResourceMetrics`](metrics::ResourceMetrics), which own [`ScopeMetrics`](metrics::ScopeMetrics), which own [`Metric`](metrics::Metric)s carrying one of five kinds of payload.
Batches can be counted, cloned, moved between owners, and converted to and from the OTLP wire format with the [`encoding`] module.

```
use emit_pdata::{
    encoding,
    metrics::{AggregationTemporality, MetricDataType},
    Metrics,
};

let mut md = Metrics::new();

let rm = md.resource_metrics_mut().append_empty();
rm.resource_mut()
    .attributes_mut()
    .insert("service.name", "my-service");

let metric = rm
    .scope_metrics_mut()
    .append_empty()
    .metrics_mut()
    .append_empty();

metric.set_name("requests");
metric.set_data_type(MetricDataType::Sum);

let sum = metric.sum_mut();
sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
sum.set_is_monotonic(true);
sum.data_points_mut().append_empty().set_int_value(42);

assert_eq!(1, md.metric_count());
assert_eq!(1, md.data_point_count());

let bytes = encoding::encode(&md)?;
assert_eq!(md, encoding::decode(&*bytes)?);
# Ok::<(), emit_pdata::Error>(())
```

# Diagnostics

This library uses `emit`'s internal runtime for its own diagnostics, such as invalid environment configuration or processors skipping batches.
The data model and its codecs don't emit any diagnostics.
*/

pub mod common;
pub mod encoding;
mod env;
pub mod metrics;
pub mod processor;
pub mod resource;
pub mod slice;

mod error;

pub use self::{
    common::{AnyValue, InstrumentationScope, KeyValue, Map, Timestamp, ValueType},
    error::{Error, ErrorKind},
    metrics::Metrics,
    resource::Resource,
    slice::Slice,
};
