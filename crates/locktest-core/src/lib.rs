pub mod error;
pub use error::{CoreError, RemoteError, TaskError};

pub mod remote;
pub use remote::{Arg, Remote, RemoteCommand, RemoteProcess, RunOutput};

pub mod cluster;
pub use cluster::{Cluster, Inventory};

pub mod task;
pub use task::{Task, TaskContext};

pub mod router;
pub use router::TaskRouter;
