#![feature(test)]

extern crate test;

use emit_pdata::{
    encoding,
    metrics::{AggregationTemporality, MetricDataType},
    Metrics,
};
use test::Bencher;

fn metrics(resources: usize, metrics: usize, points: usize) -> Metrics {
    let mut md = Metrics::new();

    for r in 0..resources {
        let rm = md.resource_metrics_mut().append_empty();
        rm.resource_mut()
            .attributes_mut()
            .insert("service.name", format!("service-{r}"));

        let sm = rm.scope_metrics_mut().append_empty();
        sm.scope_mut().set_name("bench");

        for m in 0..metrics {
            let metric = sm.metrics_mut().append_empty();
            metric.set_name(format!("metric-{m}"));
            metric.set_unit("ms");

            if m % 2 == 0 {
                metric.set_data_type(MetricDataType::Sum);

                let sum = metric.sum_mut();
                sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
                sum.set_is_monotonic(true);

                for p in 0..points {
                    let dp = sum.data_points_mut().append_empty();
                    dp.attributes_mut().insert("point", p as i64);
                    dp.set_start_timestamp(1_700_000_000_000_000_000u64);
                    dp.set_timestamp(1_700_000_001_000_000_000u64);
                    dp.set_int_value(p as i64);
                }
            } else {
                metric.set_data_type(MetricDataType::Histogram);

                let histogram = metric.histogram_mut();
                histogram.set_aggregation_temporality(AggregationTemporality::Delta);

                for p in 0..points {
                    let dp = histogram.data_points_mut().append_empty();
                    dp.attributes_mut().insert("point", p as i64);
                    dp.set_timestamp(1_700_000_001_000_000_000u64);
                    dp.set_count(10);
                    dp.set_sum(55.0);
                    dp.set_bucket_counts(vec![1u64, 2, 3, 4]);
                    dp.set_explicit_bounds(vec![1.0, 5.0, 10.0]);
                }
            }
        }
    }

    md
}

#[bench]
fn clone(b: &mut Bencher) {
    let md = metrics(2, 10, 10);

    b.iter(|| md.clone());
}

#[bench]
fn data_point_count(b: &mut Bencher) {
    let md = metrics(2, 10, 10);

    b.iter(|| md.data_point_count());
}

#[bench]
fn encode(b: &mut Bencher) {
    let md = metrics(2, 10, 10);

    b.iter(|| encoding::encode(&md).unwrap());
}

#[bench]
fn size_of(b: &mut Bencher) {
    let md = metrics(2, 10, 10);

    b.iter(|| encoding::size_of(&md));
}

#[bench]
fn decode(b: &mut Bencher) {
    let encoded = encoding::encode(&metrics(2, 10, 10)).unwrap();

    b.iter(|| encoding::decode(&*encoded).unwrap());
}
