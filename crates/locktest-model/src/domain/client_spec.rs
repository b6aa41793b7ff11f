use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CLIENT_ROLE, ModelError};

/// Role identifier of the form `client.<id>`.
///
/// Names a remote endpoint in the cluster registry. The `<id>` part selects the
/// client's mount directory (see [`crate::Layout::mount_path`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientSpec {
    id: String,
}

impl ClientSpec {
    /// Build a spec from its id (`"3"` -> `client.3`).
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if !is_valid_id(&id) {
            return Err(ModelError::InvalidClientSpec(format!("{CLIENT_ROLE}.{id}")));
        }
        Ok(Self { id })
    }

    /// The part after `client.`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('/') && !id.chars().any(char::is_whitespace)
}

impl FromStr for ClientSpec {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((role, id)) if role == CLIENT_ROLE && is_valid_id(id) => Ok(Self {
                id: id.to_string(),
            }),
            _ => Err(ModelError::InvalidClientSpec(s.to_string())),
        }
    }
}

impl TryFrom<String> for ClientSpec {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClientSpec> for String {
    fn from(spec: ClientSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for ClientSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CLIENT_ROLE}.{}", self.id)
    }
}
