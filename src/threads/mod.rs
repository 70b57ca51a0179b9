//! Per-thread exception state tracking.
//!
//! This module holds the only shared mutable state of the agent: a map from live managed
//! threads to their exception state, fed by runtime callbacks arriving concurrently on
//! arbitrary threads.
//!
//! # Key Types
//!
//! - [`ThreadRegistry`] - Owns one record per live thread, lifecycle and fleet-wide queries
//! - [`ExceptionState`] - The record of one thread: exception flag and catcher function
//! - [`ExceptionInfo`] - Snapshot of a record as returned by queries
//! - [`Notification`] - Runtime callbacks the registry consumes, for single-point dispatch
//! - [`RegistryConfig`] - Construction-time options
//!
//! # Lifecycle
//!
//! 1. The agent creates one [`ThreadRegistry`] at attach time and advertises
//!    [`ThreadRegistry::EVENT_MASK`] into its event mask
//! 2. `ThreadCreated` registers a fresh record; `ThreadDestroyed` drops it
//! 3. Exception callbacks in between mutate the record of their thread
//! 4. The registry is dropped when the agent detaches
//!
//! An exception callback for a thread outside step 2's window fails with
//! [`crate::Error::UnknownThread`].

mod config;
mod notification;
mod registry;
mod state;

pub use config::RegistryConfig;
pub use notification::Notification;
pub use registry::{ExceptionStateRc, ThreadRegistry};
pub use state::{ExceptionInfo, ExceptionState};
