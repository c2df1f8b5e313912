/*!
Converting [`Metrics`] to and from bytes.

The binary format is OTLP's `MetricsData` protobuf message, which is also the body of an `ExportMetricsServiceRequest`.
Bytes produced by [`encode`] can be read by any OTLP implementation, and [`decode`] accepts bytes produced by any of them.
*/

use base64::prelude::*;
use bytes::Buf;
use prost::Message;

use crate::{Error, Metrics};

mod proto;

#[cfg(test)]
mod generated;

/**
Encode metrics in the OTLP protobuf format.
*/
pub fn encode(md: &Metrics) -> Result<Vec<u8>, Error> {
    ProtoMarshaler.marshal_metrics(md)
}

/**
Decode metrics from the OTLP protobuf format.

Malformed or truncated input produces an error with [`crate::ErrorKind::Decoding`].
*/
pub fn decode(buf: impl Buf) -> Result<Metrics, Error> {
    Metrics::decode(buf).map_err(Error::decoding)
}

/**
The number of bytes [`encode`] will produce for `md`, computed without encoding it.
*/
pub fn size_of(md: &Metrics) -> usize {
    ProtoMarshaler.metrics_size(md)
}

/**
Serialize metrics to bytes.
*/
pub trait MetricsMarshaler {
    fn marshal_metrics(&self, md: &Metrics) -> Result<Vec<u8>, Error>;
}

/**
Deserialize metrics from bytes.
*/
pub trait MetricsUnmarshaler {
    fn unmarshal_metrics(&self, buf: &[u8]) -> Result<Metrics, Error>;
}

/**
Compute the size of metrics once serialized.
*/
pub trait MetricsSizer {
    fn metrics_size(&self, md: &Metrics) -> usize;
}

impl<'a, T: MetricsMarshaler + ?Sized> MetricsMarshaler for &'a T {
    fn marshal_metrics(&self, md: &Metrics) -> Result<Vec<u8>, Error> {
        (**self).marshal_metrics(md)
    }
}

impl<T: MetricsMarshaler + ?Sized> MetricsMarshaler for Box<T> {
    fn marshal_metrics(&self, md: &Metrics) -> Result<Vec<u8>, Error> {
        (**self).marshal_metrics(md)
    }
}

/**
The OTLP protobuf format.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoMarshaler;

impl MetricsMarshaler for ProtoMarshaler {
    fn marshal_metrics(&self, md: &Metrics) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::with_capacity(md.encoded_len());

        md.encode(&mut buf)
            .map_err(|err| Error::encoding("failed to encode metrics").with_source(err))?;

        Ok(buf)
    }
}

impl MetricsUnmarshaler for ProtoMarshaler {
    fn unmarshal_metrics(&self, buf: &[u8]) -> Result<Metrics, Error> {
        decode(buf)
    }
}

impl MetricsSizer for ProtoMarshaler {
    fn metrics_size(&self, md: &Metrics) -> usize {
        md.encoded_len()
    }
}

/**
The OTLP JSON format.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaler;

impl MetricsMarshaler for JsonMarshaler {
    fn marshal_metrics(&self, md: &Metrics) -> Result<Vec<u8>, Error> {
        sval_json::stream_to_string(md)
            .map(String::into_bytes)
            .map_err(|_| Error::encoding("failed to stream metrics as JSON"))
    }
}

/**
The format to marshal metrics with.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Proto,
    Json,
}

impl Encoding {
    /**
    The HTTP `content-type` for payloads in this format.
    */
    pub fn content_type(self) -> &'static str {
        match self {
            Encoding::Proto => "application/x-protobuf",
            Encoding::Json => "application/json",
        }
    }
}

impl MetricsMarshaler for Encoding {
    fn marshal_metrics(&self, md: &Metrics) -> Result<Vec<u8>, Error> {
        match self {
            Encoding::Proto => ProtoMarshaler.marshal_metrics(md),
            Encoding::Json => JsonMarshaler.marshal_metrics(md),
        }
    }
}

pub(crate) fn stream_field<'sval, S: sval::Stream<'sval> + ?Sized>(
    stream: &mut S,
    label: &sval::Label,
    index: &sval::Index,
    field: impl FnOnce(&mut S) -> sval::Result,
) -> sval::Result {
    stream.record_tuple_value_begin(None, label, index)?;
    field(&mut *stream)?;
    stream.record_tuple_value_end(None, label, index)
}

/**
A double in OTLP/JSON, where non-finite values are written as strings.
*/
pub(crate) struct JsonDouble(pub(crate) f64);

impl sval::Value for JsonDouble {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        let v = self.0;

        if v.is_finite() {
            stream.f64(v)
        } else if v.is_nan() {
            stream.value_computed("NaN")
        } else if v.is_sign_positive() {
            stream.value_computed("Infinity")
        } else {
            stream.value_computed("-Infinity")
        }
    }
}

pub(crate) struct JsonDoubles<'a>(pub(crate) &'a [f64]);

impl<'a> sval::Value for JsonDoubles<'a> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.seq_begin(Some(self.0.len()))?;

        for v in self.0 {
            stream.seq_value_begin()?;
            stream.value_computed(&JsonDouble(*v))?;
            stream.seq_value_end()?;
        }

        stream.seq_end()
    }
}

/**
Bytes in OTLP/JSON, written as standard base64.
*/
pub(crate) struct JsonBytes<'a>(pub(crate) &'a [u8]);

impl<'a> sval::Value for JsonBytes<'a> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.value_computed(&*BASE64_STANDARD.encode(self.0))
    }
}
