mod drive;
mod util;

#[cfg(feature = "ssh")]
pub mod ssh;
#[cfg(feature = "ssh")]
pub use ssh::{KnownHostsPolicy, SshOptions, SshRemote};

#[cfg(feature = "local")]
pub mod local;
#[cfg(feature = "local")]
pub use local::LocalRemote;

pub mod prelude {
    #[cfg(feature = "local")]
    pub use crate::LocalRemote;
    #[cfg(feature = "ssh")]
    pub use crate::{KnownHostsPolicy, SshOptions, SshRemote};
}
