use std::collections::BTreeMap;
use std::sync::Arc;

use locktest_model::ClientSpec;

use crate::{error::CoreError, remote::Remote};

/// Registry resolving roles to remote endpoints.
pub trait Cluster: Send + Sync + 'static {
    /// The single remote serving `spec`.
    fn only(&self, spec: &ClientSpec) -> Result<Arc<dyn Remote>, CoreError>;
}

/// In-memory cluster: one remote per role.
#[derive(Default, Clone)]
pub struct Inventory {
    remotes: BTreeMap<ClientSpec, Arc<dyn Remote>>,
}

impl Inventory {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `spec` to `remote`, replacing any earlier binding.
    pub fn insert(&mut self, spec: ClientSpec, remote: Arc<dyn Remote>) -> &mut Self {
        self.remotes.insert(spec, remote);
        self
    }

    pub fn with(mut self, spec: ClientSpec, remote: Arc<dyn Remote>) -> Self {
        self.insert(spec, remote);
        self
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = &ClientSpec> {
        self.remotes.keys()
    }
}

impl Cluster for Inventory {
    fn only(&self, spec: &ClientSpec) -> Result<Arc<dyn Remote>, CoreError> {
        self.remotes
            .get(spec)
            .cloned()
            .ok_or_else(|| CoreError::NoRemote(spec.to_string()))
    }
}
