use thiserror::Error;

use crate::profiler::ThreadId;

/// COM `HRESULT` values used when reporting results back to the profiling runtime.
///
/// Only the codes this crate can produce are listed. The values are the canonical Win32
/// definitions, so they can be handed to the runtime unchanged.
pub mod hresult {
    /// Operation succeeded.
    pub const S_OK: i32 = 0;
    /// Operation succeeded with a "false" outcome (e.g. an exception is pending).
    pub const S_FALSE: i32 = 1;
    /// Catastrophic or unexpected failure.
    pub const E_UNEXPECTED: i32 = 0x8000_FFFF_u32 as i32;
    /// One or more arguments are invalid.
    pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
    /// Unspecified failure.
    pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;

    /// Returns `true` if `hr` signals success (`S_OK`, `S_FALSE`, ...).
    #[must_use]
    pub fn succeeded(hr: i32) -> bool {
        hr >= 0
    }

    /// Returns `true` if `hr` signals failure.
    #[must_use]
    pub fn failed(hr: i32) -> bool {
        hr < 0
    }
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The registry has no I/O and no transient failure modes: every error is immediate and
/// deterministic given the current set of live threads. Nothing is retried internally.
///
/// # Error Categories
///
/// - [`Error::UnknownThread`] - Per-thread operation on a thread that is not registered
/// - [`Error::InvalidArgument`] - A caller supplied a value that violates the API contract
/// - [`Error::LockError`] - A lock was poisoned by a panicking holder
///
/// # Examples
///
/// ```rust
/// use threadscope::{Error, ThreadId, ThreadRegistry};
///
/// let registry = ThreadRegistry::new();
/// match registry.get_exception(ThreadId::new(0x1000)) {
///     Ok(info) => println!("pending: {}", info.has_exception()),
///     Err(Error::UnknownThread(id)) => println!("thread {} was never announced", id),
///     Err(e) => println!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No live record exists for the given thread.
    ///
    /// This signals an ordering violation between lifecycle and exception notifications:
    /// an exception event delivered before the thread was created, or after it was destroyed.
    /// It is surfaced to the caller and never absorbed by creating an implicit record.
    #[error("Unknown thread - {0}")]
    UnknownThread(ThreadId),

    /// A caller supplied an argument that violates the API contract.
    ///
    /// Raised when converting raw runtime handles, e.g. a null `ThreadID` or `FunctionID`.
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// Failed to lock target.
    ///
    /// The registry map or a per-thread record lock was poisoned because a thread panicked
    /// while holding it.
    #[error("Failed to lock target")]
    LockError,
}

impl Error {
    /// Translates this error into the `HRESULT` reported to the profiling runtime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadscope::{hresult, Error, ThreadId};
    ///
    /// let err = Error::UnknownThread(ThreadId::new(7));
    /// assert_eq!(err.hresult(), hresult::E_UNEXPECTED);
    /// ```
    #[must_use]
    pub fn hresult(&self) -> i32 {
        match self {
            Error::UnknownThread(_) => hresult::E_UNEXPECTED,
            Error::InvalidArgument(_) => hresult::E_INVALIDARG,
            Error::LockError => hresult::E_FAIL,
        }
    }
}
