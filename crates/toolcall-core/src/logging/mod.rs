//! Logging abstractions for runtime-agnostic logging

mod traits;
mod level;
mod noop;
mod console;

pub use traits::{Logger, SharedLogger};
pub use level::{LogLevel, LOG_LEVEL_ENV};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
