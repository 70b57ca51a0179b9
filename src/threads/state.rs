//! Per-thread exception tracking.
//!
//! [`ExceptionState`] is the record the registry keeps for every live thread. It tracks two
//! independent facts reported by separate runtime callbacks:
//!
//! - whether an exception is currently in flight on the thread
//! - which function, if any, the runtime identified as the catcher
//!
//! The runtime reports "exception thrown" and "catcher found" as distinct events which may
//! arrive in either order or be skipped entirely, so the two fields are never updated as a
//! single transition.
//!
//! # State Transitions
//!
//! | From              | Operation                          | To                 |
//! |-------------------|------------------------------------|--------------------|
//! | any               | `clear_exception`                  | `Clear`            |
//! | `Clear`           | `set_has_exception`                | `Pending(None)`    |
//! | `Pending(c)`      | `set_has_exception`                | `Pending(c)`       |
//! | any               | `set_exception_catcher_function(f)`| catcher = `Some(f)`|

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{error::hresult, profiler::FunctionId};

/// Snapshot of one thread's exception state, as returned by
/// [`crate::ThreadRegistry::get_exception`].
///
/// Both fields were observed at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExceptionInfo {
    has_exception: bool,
    catcher: Option<FunctionId>,
}

impl ExceptionInfo {
    /// An `ExceptionInfo` with no exception in flight and no catcher.
    pub const CLEAR: ExceptionInfo = ExceptionInfo {
        has_exception: false,
        catcher: None,
    };

    /// Returns `true` if an exception is in flight and has not been cleared yet.
    #[must_use]
    pub fn has_exception(&self) -> bool {
        self.has_exception
    }

    /// Returns the function registered as catcher of the in-flight exception.
    ///
    /// Always `None` while no exception is in flight, even if a catcher was recorded earlier.
    #[must_use]
    pub fn catcher(&self) -> Option<FunctionId> {
        if self.has_exception {
            self.catcher
        } else {
            None
        }
    }

    /// Returns the recorded catcher regardless of the exception flag.
    ///
    /// A catcher may be reported before the exception flag is set; this exposes it.
    #[must_use]
    pub fn recorded_catcher(&self) -> Option<FunctionId> {
        self.catcher
    }

    /// Translates the snapshot into the runtime query convention: `S_FALSE` while an
    /// exception is pending, `S_OK` otherwise.
    #[must_use]
    pub fn hresult(&self) -> i32 {
        if self.has_exception {
            hresult::S_FALSE
        } else {
            hresult::S_OK
        }
    }
}

/// Exception-tracking record for exactly one managed thread.
///
/// Owned by a [`crate::ThreadRegistry`] entry and shared out as an `Arc` so callers can work
/// on it after the registry's map lock has been released. The fields sit behind their own
/// lock, which keeps the record consistent even if the runtime delivers callbacks for the
/// same thread concurrently.
#[derive(Debug, Default)]
pub struct ExceptionState {
    info: Mutex<ExceptionInfo>,
}

impl ExceptionState {
    /// Creates a record with no exception in flight and no catcher.
    #[must_use]
    pub fn new() -> Self {
        ExceptionState {
            info: Mutex::new(ExceptionInfo::CLEAR),
        }
    }

    // Writers never panic while holding the guard, so a poisoned record is still consistent.
    fn info(&self) -> MutexGuard<'_, ExceptionInfo> {
        self.info.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resets the record to `Clear`, dropping any recorded catcher.
    pub fn clear_exception(&self) {
        *self.info() = ExceptionInfo::CLEAR;
    }

    /// Marks an exception as in flight. A catcher already recorded is left untouched.
    pub fn set_has_exception(&self) {
        self.info().has_exception = true;
    }

    /// Records `catcher` as the function expected to catch the exception.
    ///
    /// Does not touch the exception flag.
    pub fn set_exception_catcher_function(&self, catcher: FunctionId) {
        self.info().catcher = Some(catcher);
    }

    /// Returns a consistent snapshot of the record.
    #[must_use]
    pub fn get_exception(&self) -> ExceptionInfo {
        *self.info()
    }

    /// Returns only the exception flag.
    #[must_use]
    pub fn has_exception(&self) -> bool {
        self.info().has_exception
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = ExceptionState::new();
        let info = state.get_exception();
        assert!(!info.has_exception());
        assert_eq!(info.catcher(), None);
        assert_eq!(info, ExceptionInfo::CLEAR);
        assert_eq!(info.hresult(), hresult::S_OK);
    }

    #[test]
    fn test_set_then_catcher() {
        let state = ExceptionState::new();
        state.set_has_exception();
        assert_eq!(state.get_exception().catcher(), None);
        assert!(state.has_exception());

        state.set_exception_catcher_function(FunctionId::new(42));
        let info = state.get_exception();
        assert!(info.has_exception());
        assert_eq!(info.catcher(), Some(FunctionId::new(42)));
        assert_eq!(info.hresult(), hresult::S_FALSE);
    }

    #[test]
    fn test_set_twice_keeps_catcher() {
        let state = ExceptionState::new();
        state.set_has_exception();
        state.set_exception_catcher_function(FunctionId::new(7));
        state.set_has_exception();

        let info = state.get_exception();
        assert!(info.has_exception());
        assert_eq!(info.catcher(), Some(FunctionId::new(7)));
    }

    #[test]
    fn test_catcher_without_exception() {
        let state = ExceptionState::new();
        state.set_exception_catcher_function(FunctionId::new(9));

        let info = state.get_exception();
        assert!(!info.has_exception());
        assert_eq!(info.catcher(), None);
        assert_eq!(info.recorded_catcher(), Some(FunctionId::new(9)));

        // catcher reported first, then the throw
        state.set_has_exception();
        assert_eq!(state.get_exception().catcher(), Some(FunctionId::new(9)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let state = ExceptionState::new();
        state.set_has_exception();
        state.set_exception_catcher_function(FunctionId::new(3));

        for _ in 0..3 {
            state.clear_exception();
            assert_eq!(state.get_exception(), ExceptionInfo::CLEAR);
        }
    }

    #[test]
    fn test_clear_drops_catcher() {
        let state = ExceptionState::new();
        state.set_exception_catcher_function(FunctionId::new(3));
        state.clear_exception();
        state.set_has_exception();
        assert_eq!(state.get_exception().catcher(), None);
    }
}
