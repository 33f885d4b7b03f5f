//! Library components of the `yardex` command line tool.

pub mod config;
pub mod fields;
pub mod logging;
