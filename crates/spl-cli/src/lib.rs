//! Library components of the `spl` command-line checker.

pub mod input;
pub mod logging;
pub mod report;
