//! Install workflow: validate, resolve, build, submit, interpret.

pub mod context;
pub mod error;
pub mod flow;
pub mod install;
pub mod proposal;
pub mod resolve;
pub mod submit;

#[cfg(test)]
pub(crate) mod fakes;

pub use context::Context;
pub use error::{InstallError, InstallFailure, Stage};
pub use flow::{Dialect, InstallInput};
pub use install::{InstallReceipt, install};
