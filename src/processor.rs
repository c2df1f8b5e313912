/*!
Building blocks for stages of a metrics pipeline.

A [`MetricsConsumer`] accepts batches of [`Metrics`] by value, so each batch is owned by exactly one stage at a time.
A [`MetricsProcessor`] transforms a batch with a function and forwards the result to the next consumer.
*/

use std::{borrow::Cow, sync::Arc};

use crate::{Error, Metrics};

/**
A stage that accepts batches of metrics.
*/
pub trait MetricsConsumer {
    /**
    Consume a batch of metrics.
    */
    fn consume_metrics(&self, md: Metrics) -> Result<(), Error>;
}

impl<'a, T: MetricsConsumer + ?Sized> MetricsConsumer for &'a T {
    fn consume_metrics(&self, md: Metrics) -> Result<(), Error> {
        (**self).consume_metrics(md)
    }
}

impl<'a, T: MetricsConsumer + ?Sized + 'a> MetricsConsumer for Box<T> {
    fn consume_metrics(&self, md: Metrics) -> Result<(), Error> {
        (**self).consume_metrics(md)
    }
}

impl<'a, T: MetricsConsumer + ?Sized + 'a> MetricsConsumer for Arc<T> {
    fn consume_metrics(&self, md: Metrics) -> Result<(), Error> {
        (**self).consume_metrics(md)
    }
}

/**
A [`MetricsConsumer`] from a function.

This type can be created directly, or via [`from_fn`].
*/
pub struct FromFn<F>(F);

impl<F> FromFn<F> {
    /**
    Wrap the given consumer function.
    */
    pub const fn new(consumer: F) -> FromFn<F> {
        FromFn(consumer)
    }
}

impl<F: Fn(Metrics) -> Result<(), Error>> MetricsConsumer for FromFn<F> {
    fn consume_metrics(&self, md: Metrics) -> Result<(), Error> {
        (self.0)(md)
    }
}

/**
Create a [`MetricsConsumer`] from a function.
*/
pub fn from_fn<F: Fn(Metrics) -> Result<(), Error>>(f: F) -> FromFn<F> {
    FromFn::new(f)
}

/**
A [`MetricsConsumer`] that transforms batches before forwarding them to another consumer.

If the processing function returns [`Error::skip_processing`] then the batch is dropped and the processor reports success.
Any other error is returned to the caller without forwarding.
*/
pub struct MetricsProcessor<F, C> {
    id: Cow<'static, str>,
    process: F,
    next: C,
}

impl<F, C> MetricsProcessor<F, C>
where
    F: Fn(Metrics) -> Result<Metrics, Error>,
    C: MetricsConsumer,
{
    /**
    Create a processor identified by `id` that runs `process` on each batch and forwards the result to `next`.
    */
    pub fn new(id: impl Into<Cow<'static, str>>, process: F, next: C) -> Self {
        MetricsProcessor {
            id: id.into(),
            process,
            next,
        }
    }

    /**
    The identifier this processor reports in its diagnostics.
    */
    pub fn id(&self) -> &str {
        &self.id
    }

    /**
    The consumer processed batches are forwarded to.
    */
    pub fn next(&self) -> &C {
        &self.next
    }
}

impl<F, C> MetricsConsumer for MetricsProcessor<F, C>
where
    F: Fn(Metrics) -> Result<Metrics, Error>,
    C: MetricsConsumer,
{
    fn consume_metrics(&self, md: Metrics) -> Result<(), Error> {
        let processor = self.id();

        emit::debug!(
            rt: emit::runtime::internal(),
            "start processing {processor} with {data_point_count} data points",
            processor,
            data_point_count: md.data_point_count(),
        );

        match (self.process)(md) {
            Ok(md) => {
                emit::debug!(
                    rt: emit::runtime::internal(),
                    "end processing {processor}",
                    processor,
                );

                self.next.consume_metrics(md)
            }
            Err(err) if err.is_skip_processing() => {
                emit::debug!(
                    rt: emit::runtime::internal(),
                    "{processor} skipped processing",
                    processor,
                );

                Ok(())
            }
            Err(err) => {
                emit::debug!(
                    rt: emit::runtime::internal(),
                    "{processor} failed processing: {err}",
                    processor,
                    err,
                );

                Err(err)
            }
        }
    }
}
