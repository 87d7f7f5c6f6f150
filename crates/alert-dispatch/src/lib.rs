//! Dispatcher implementations for finished alerts.
//!
//! Everything here is a sink behind [`monitor_core::AlertDispatcher`]:
//! fire-and-forget, called synchronously from the evaluation path, so none
//! of these channels propagate failures back to the engine.

mod channel;
mod console;
mod file;
mod memory;

pub use channel::ChannelDispatcher;
pub use console::ConsoleDispatcher;
pub use file::FileDispatcher;
pub use memory::MemoryDispatcher;
