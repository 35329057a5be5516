//! Configuration sources layered on top of the defaults.

pub mod env;
pub mod file;
