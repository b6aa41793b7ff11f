use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid client spec {0:?} (expected client.<id>)")]
    InvalidClientSpec(String),
    #[error("locktest expects exactly two clients, got {0}")]
    WrongClientCount(usize),
    #[error("invalid locktest config: {0}")]
    InvalidConfig(String),
}
