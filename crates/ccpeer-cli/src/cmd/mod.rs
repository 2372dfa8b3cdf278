//! Command entry points. Each turns parsed arguments into an operation and
//! reports the outcome.

pub mod completions;
pub mod install;
