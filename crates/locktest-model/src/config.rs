use serde::Serialize;
use serde_json::Value;

use crate::{ClientSpec, ModelError};

/// Validated locktest configuration: the host role and the client role.
///
/// Built from the task's raw configuration value, which must be a sequence of
/// exactly two client specs. The first one is the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocktestConfig {
    pub host: ClientSpec,
    pub client: ClientSpec,
}

impl LocktestConfig {
    pub fn new(host: ClientSpec, client: ClientSpec) -> Self {
        Self { host, client }
    }

    /// Parse `["client.0", "client.1"]`.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        let items = value.as_array().ok_or_else(|| {
            ModelError::InvalidConfig(format!("expected a list of two clients, got {value}"))
        })?;

        let specs = items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| {
                        ModelError::InvalidConfig(format!("client entry is not a string: {item}"))
                    })?
                    .parse::<ClientSpec>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_specs(specs)
    }

    pub fn from_specs(specs: Vec<ClientSpec>) -> Result<Self, ModelError> {
        match <[ClientSpec; 2]>::try_from(specs) {
            Ok([host, client]) => Ok(Self { host, client }),
            Err(specs) => Err(ModelError::WrongClientCount(specs.len())),
        }
    }

    /// Both roles, host first.
    pub fn roles(&self) -> [&ClientSpec; 2] {
        [&self.host, &self.client]
    }
}

impl TryFrom<&Value> for LocktestConfig {
    type Error = ModelError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
