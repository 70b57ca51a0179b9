//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use threadscope::prelude::*;
//!
//! let registry = ThreadRegistry::new();
//! registry.thread_created(ThreadId::new(1))?;
//! assert!(!registry.any_exception_pending()?);
//! # Ok::<(), Error>(())
//! ```

pub use crate::Error;

pub use crate::Result;

pub use crate::error::hresult;

pub use crate::profiler::{FunctionId, ProfilerEventMask, ThreadId};

pub use crate::threads::{
    ExceptionInfo, ExceptionState, ExceptionStateRc, Notification, RegistryConfig,
    ThreadRegistry,
};
