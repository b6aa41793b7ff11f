mod error;
pub use error::ModelError;

mod domain;
pub use domain::*;

mod config;
pub use config::LocktestConfig;
