//! Ready-made listeners.

mod logging;

pub use logging::LoggingListener;
