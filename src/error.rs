use std::{borrow::Cow, error, fmt};

/**
An error encountered encoding, decoding, or processing metrics.
*/
pub struct Error {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

/**
The broad category of an [`Error`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /**
    Wire bytes were malformed or truncated.
    */
    Decoding,
    /**
    Metrics could not be serialized.
    */
    Encoding,
    /**
    A processor asked for its input to be dropped without forwarding it.
    */
    SkipProcessing,
    /**
    A processor or consumer failed.
    */
    Processing,
    /**
    A configuration value was invalid.
    */
    Configuration,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, msg: impl Into<Cow<'static, str>>) -> Self {
        Error {
            kind,
            msg: msg.into(),
            source: None,
        }
    }

    pub(crate) fn with_source(
        mut self,
        source: impl Into<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    pub(crate) fn configuration(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::new(ErrorKind::Configuration, msg)
    }

    pub(crate) fn decoding(err: prost::DecodeError) -> Self {
        Error::new(ErrorKind::Decoding, "failed to decode metrics").with_source(err)
    }

    pub(crate) fn encoding(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::new(ErrorKind::Encoding, msg)
    }

    /**
    The error a processing function returns to drop its input.

    Data dropped this way isn't forwarded to the next consumer, and the processor reports success.
    */
    pub fn skip_processing() -> Self {
        Error::new(ErrorKind::SkipProcessing, "metrics processing was skipped")
    }

    /**
    A processing failure with the given message.
    */
    pub fn processing(msg: impl Into<Cow<'static, str>>) -> Self {
        Error::new(ErrorKind::Processing, msg)
    }

    /**
    A processing failure caused by another error.
    */
    pub fn processing_source(source: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
        Error::new(ErrorKind::Processing, "metrics processing failed").with_source(source)
    }

    /**
    The category of this error.
    */
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /**
    Whether this is the error returned by [`Error::skip_processing`].
    */
    pub fn is_skip_processing(&self) -> bool {
        self.kind == ErrorKind::SkipProcessing
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("msg", &self.msg)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)?;

        if let Some(ref source) = self.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn error::Error + 'static))
    }
}
