/*!
Support configuration via environment variables.

The set of variables is defined by the [OpenTelemetry spec](https://opentelemetry.io/docs/languages/sdk-configuration/general/).

If a variable is missing or invalid, then its default value is used.
Invalid values are reported as warnings through `emit`'s internal runtime.
*/

use std::{env, sync::LazyLock};

use crate::{
    common::{AnyValue, Map},
    encoding::Encoding,
    resource::Resource,
    Error,
};

const OTEL_EXPORTER_OTLP_PROTOCOL: &str = "OTEL_EXPORTER_OTLP_PROTOCOL";
const OTEL_EXPORTER_OTLP_METRICS_PROTOCOL: &str = "OTEL_EXPORTER_OTLP_METRICS_PROTOCOL";

const OTEL_SERVICE_NAME: &str = "OTEL_SERVICE_NAME";

const OTEL_RESOURCE_ATTRIBUTES: &str = "OTEL_RESOURCE_ATTRIBUTES";

const SERVICE_NAME: &str = "service.name";
const UNKNOWN_SERVICE: &str = "unknown_service";

impl Encoding {
    /**
    Select an encoding from OpenTelemetry's environment variables.

    `OTEL_EXPORTER_OTLP_METRICS_PROTOCOL` takes precedence over `OTEL_EXPORTER_OTLP_PROTOCOL`.
    The `grpc` and `http/protobuf` protocols use [`Encoding::Proto`], and `http/json` uses [`Encoding::Json`].
    */
    pub fn from_env() -> Self {
        CONFIG.encoding()
    }
}

impl Resource {
    /**
    Build a resource from OpenTelemetry's environment variables.

    Attributes are read from `OTEL_RESOURCE_ATTRIBUTES`, with `OTEL_SERVICE_NAME` overriding any `service.name` among them.
    If neither sets a service name then `unknown_service` is used.
    */
    pub fn from_env() -> Self {
        CONFIG.resource.clone()
    }
}

static CONFIG: LazyLock<EnvConfig> = LazyLock::new(|| EnvConfig::from_env(env::vars()));

#[derive(Default, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    base_protocol: Option<ProtocolConfig>,
    metrics_protocol: Option<ProtocolConfig>,
    resource: Resource,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum ProtocolConfig {
    #[default]
    Grpc,
    HttpProtobuf,
    HttpJson,
}

impl EnvConfig {
    pub(crate) fn from_env<K: AsRef<str>, V: AsRef<str>>(
        env: impl Iterator<Item = (K, V)>,
    ) -> EnvConfig {
        fn protocol(v: &str) -> Option<ProtocolConfig> {
            let v = v.trim();

            if v.eq_ignore_ascii_case("grpc") {
                return Some(ProtocolConfig::Grpc);
            }

            if v.eq_ignore_ascii_case("http/protobuf") {
                return Some(ProtocolConfig::HttpProtobuf);
            }

            if v.eq_ignore_ascii_case("http/json") {
                return Some(ProtocolConfig::HttpJson);
            }

            let err = Error::configuration(format!("{v} is not a valid protocol"));

            emit::warn!(rt: emit::runtime::internal(), "failed to parse protocol: {err}");

            None
        }

        fn resource(v: &str) -> Map {
            let mut resource = Map::new();

            match parse_attributes(v.trim()) {
                Ok(attributes) => {
                    for (k, v) in attributes {
                        if resource.get(&k).is_some() {
                            continue;
                        }

                        resource.insert(k, v);
                    }
                }
                Err(err) => {
                    emit::warn!(rt: emit::runtime::internal(), "failed to parse resource: {err}");
                }
            }

            resource
        }

        let mut config = EnvConfig::default();
        let mut config_service_name = None;

        for (k, v) in env {
            let k = k.as_ref();

            if k.eq_ignore_ascii_case(OTEL_EXPORTER_OTLP_PROTOCOL) {
                config.base_protocol = protocol(v.as_ref());
                continue;
            }

            if k.eq_ignore_ascii_case(OTEL_EXPORTER_OTLP_METRICS_PROTOCOL) {
                config.metrics_protocol = protocol(v.as_ref());
                continue;
            }

            if k.eq_ignore_ascii_case(OTEL_SERVICE_NAME) {
                config_service_name = Some(v.as_ref().trim().to_owned());
                continue;
            }

            if k.eq_ignore_ascii_case(OTEL_RESOURCE_ATTRIBUTES) {
                config.resource.attributes = resource(v.as_ref());
                continue;
            }
        }

        let attributes = &mut config.resource.attributes;

        if let Some(service_name) = config_service_name {
            attributes.insert(SERVICE_NAME, service_name);
        } else if attributes.get(SERVICE_NAME).is_none() {
            attributes.insert(SERVICE_NAME, UNKNOWN_SERVICE);
        }

        config
    }

    fn protocol(&self) -> ProtocolConfig {
        self.metrics_protocol
            .or(self.base_protocol)
            .unwrap_or_default()
    }

    fn encoding(&self) -> Encoding {
        match self.protocol() {
            ProtocolConfig::Grpc | ProtocolConfig::HttpProtobuf => Encoding::Proto,
            ProtocolConfig::HttpJson => Encoding::Json,
        }
    }
}

/**
Parse a list of resource attributes like:

```text
key1=value1, key2=value%202, key3=value3;property1;property2=value
```

Values are percent-decoded. A value carrying `;` separated properties is converted into a map, where properties without a value are `true`.
*/
fn parse_attributes(input: &str) -> Result<Vec<(String, AnyValue)>, Error> {
    let mut attributes = Vec::new();

    for member in input.split(',') {
        let member = member.trim();

        if member.is_empty() {
            continue;
        }

        let (key, value) = member
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("`{member}` is not a `key=value` pair"))
            })?;

        let value = if value.contains([';', '=']) {
            let mut properties = Map::new();

            for property in value.split(';') {
                let property = property.trim();

                if property.is_empty() {
                    continue;
                }

                match property.split_once('=') {
                    Some((k, v)) => properties.insert(k.trim(), unescape(v.trim())?),
                    None => properties.insert(property, true),
                };
            }

            AnyValue::Map(properties)
        } else {
            AnyValue::String(unescape(value)?)
        };

        attributes.push((key.to_owned(), value));
    }

    Ok(attributes)
}

fn unescape(escaped: &str) -> Result<String, Error> {
    fn hex(b: &u8) -> Option<u8> {
        match *b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let b = escaped.as_bytes();

    let mut unescaped = Vec::with_capacity(b.len());
    let mut i = 0;

    while i < b.len() {
        if b[i] != b'%' {
            unescaped.push(b[i]);
            i += 1;

            continue;
        }

        let (Some(h1), Some(h2)) = (b.get(i + 1).and_then(hex), b.get(i + 2).and_then(hex))
        else {
            return Err(Error::configuration(format!(
                "`{escaped}` contains an invalid escape sequence"
            )));
        };

        unescaped.push((h1 << 4) | h2);
        i += 3;
    }

    String::from_utf8(unescaped).map_err(|err| {
        Error::configuration(format!("`{escaped}` is not valid UTF8")).with_source(err)
    })
}
