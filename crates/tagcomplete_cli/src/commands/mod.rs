//! Subcommand implementations

mod check;
mod complete;
mod init;

pub use check::run_check;
pub use complete::run_complete;
pub use init::run_init;
