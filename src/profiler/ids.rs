use std::fmt;

use crate::{Error, Result};

/// Opaque identifier of one live managed thread, as handed out by the profiling runtime.
///
/// The value is process-unique while the thread lives and may be reused by the runtime once
/// the thread has been destroyed.
///
/// # Examples
///
/// ```rust
/// use threadscope::ThreadId;
///
/// let id = ThreadId::new(0x1f40);
/// assert_eq!(id.value(), 0x1f40);
/// assert!(ThreadId::from_raw(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(pub usize);

impl ThreadId {
    /// Creates a new `ThreadId` from a raw handle value without validation.
    #[must_use]
    pub fn new(value: usize) -> Self {
        ThreadId(value)
    }

    /// Creates a new `ThreadId` from a raw runtime handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for the null handle.
    pub fn from_raw(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(Error::InvalidArgument("null ThreadID".to_string()));
        }

        Ok(ThreadId(value))
    }

    /// Returns the raw handle value.
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns `true` if this is the null handle.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for ThreadId {
    fn from(value: usize) -> Self {
        ThreadId(value)
    }
}

impl From<ThreadId> for usize {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

impl fmt::Debug for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThreadId(0x{:016x})", self.0)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Opaque identifier of one managed method, as handed out by the profiling runtime.
///
/// Within this crate it is only used to name the candidate catcher of an in-flight exception.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionId(pub usize);

impl FunctionId {
    /// Creates a new `FunctionId` from a raw handle value without validation.
    #[must_use]
    pub fn new(value: usize) -> Self {
        FunctionId(value)
    }

    /// Creates a new `FunctionId` from a raw runtime handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for the null handle.
    pub fn from_raw(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(Error::InvalidArgument("null FunctionID".to_string()));
        }

        Ok(FunctionId(value))
    }

    /// Returns the raw handle value.
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<usize> for FunctionId {
    fn from(value: usize) -> Self {
        FunctionId(value)
    }
}

impl From<FunctionId> for usize {
    fn from(id: FunctionId) -> Self {
        id.0
    }
}

impl fmt::Debug for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionId(0x{:016x})", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}
