//! Background Tasks Module
//!
//! Contains background tasks that run periodically during a session.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired response cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
