//! Built-in listeners.

mod log;
mod nesting;

pub use log::TracingListener;
pub use nesting::NestingTracker;
