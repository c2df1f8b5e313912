/*!
The entity producing telemetry.
*/

use sval_derive::Value;

use crate::common::Map;

/**
A resource, such as a service or host, described by its attributes.

See [`Resource::from_env`] for building one from OpenTelemetry's environment variables.
*/
#[derive(Clone, Debug, Default, PartialEq, Value)]
pub struct Resource {
    #[sval(label = "attributes", index = 1)]
    pub(crate) attributes: Map,
    #[sval(label = "droppedAttributesCount", index = 2)]
    pub(crate) dropped_attributes_count: u32,
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &Map {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Map {
        &mut self.attributes
    }

    pub fn dropped_attributes_count(&self) -> u32 {
        self.dropped_attributes_count
    }

    pub fn set_dropped_attributes_count(&mut self, count: u32) {
        self.dropped_attributes_count = count;
    }
}
