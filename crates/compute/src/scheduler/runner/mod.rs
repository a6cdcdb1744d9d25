//! Worker-pool scheduler -- assigns tasks to idle workers and reports status.
//!
//! Split into focused submodules:
//! - `core`: Scheduler struct, constructor, observers, and accessor methods
//! - `execution`: task submission, completion, and status broadcasts

mod core;
mod execution;

pub use self::core::Scheduler;
