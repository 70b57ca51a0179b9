//! Profiling runtime primitives.
//!
//! This module models the handles and configuration values the profiling runtime exchanges
//! with an attached agent:
//!
//! - [`ThreadId`] - Opaque handle of a live managed thread (`ThreadID`)
//! - [`FunctionId`] - Opaque handle of a managed method (`FunctionID`)
//! - [`ProfilerEventMask`] - The low event mask (`COR_PRF_MONITOR`) an agent subscribes with
//!
//! Handles are only meaningful while the entity they name is alive; they are compared and
//! hashed by value and never dereferenced by this crate.

mod ids;
mod mask;

pub use ids::{FunctionId, ThreadId};
pub use mask::ProfilerEventMask;
