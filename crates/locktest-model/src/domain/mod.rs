mod constants;
pub use constants::*;

mod client_spec;
pub use client_spec::ClientSpec;

mod layout;
pub use layout::Layout;

mod address;
pub use address::rendezvous_address;

mod outcome;
pub use outcome::Outcome;

/// Process exit code as reported by the remote transport.
///
/// A process terminated by a signal is reported as `-1`.
pub type ExitCode = i32;
