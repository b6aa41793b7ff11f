mod error;
pub use error::{CleanupFailure, LocktestError, Role};

mod tasks;
pub use tasks::locktest;
pub use tasks::locktest::{Locktest, LocktestOptions, LocktestTask};

pub mod prelude {
    pub use crate::error::{LocktestError, Role};
    pub use crate::tasks::locktest::{Locktest, LocktestOptions, LocktestTask, TASK_NAME};
}
