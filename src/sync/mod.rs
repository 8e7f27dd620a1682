//! Push and pull backends

pub mod git;
pub mod ssh;

pub use git::{Git, PushOptions, AUTO_COMMIT_MESSAGE};
pub use ssh::Ssh;
