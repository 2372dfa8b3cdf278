//! Terminal output.
//!
//! Commands print through [`Output`]; nothing else in the crate writes to the
//! terminal directly. Diagnostics go through `tracing` instead.

pub mod output;

pub use output::Output;
