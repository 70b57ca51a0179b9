//! Thread-indexed registry of exception state records.
//!
//! The [`ThreadRegistry`] keeps one [`ExceptionState`] per live managed thread. Runtime
//! callbacks arrive on arbitrary threads with no serialization guaranteed by the caller, so
//! every entry point takes `&self` and is safe under any interleaving.
//!
//! # Locking
//!
//! - One exclusive lock guards the map's structure and entry set. It is held only for the
//!   lookup / insert / remove itself.
//! - Per-thread work happens on an `Arc` handle cloned out of the map after that lock has
//!   been released.
//! - The fleet-wide scan holds the map lock while enumerating and takes each record's own
//!   lock briefly. Locks are always taken map first, record second.
//!
//! # Examples
//!
//! ```rust
//! use threadscope::{FunctionId, ThreadId, ThreadRegistry};
//!
//! let registry = ThreadRegistry::new();
//! let thread = ThreadId::new(1);
//!
//! registry.thread_created(thread)?;
//! registry.set_has_exception(thread)?;
//! registry.set_exception_catcher_function(thread, FunctionId::new(42))?;
//! assert!(registry.any_exception_pending()?);
//!
//! registry.clear_exception(thread)?;
//! registry.thread_destroyed(thread)?;
//! assert!(registry.get_exception(thread).is_err());
//! # Ok::<(), threadscope::Error>(())
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    error::hresult,
    profiler::{FunctionId, ProfilerEventMask, ThreadId},
    threads::{ExceptionInfo, ExceptionState, Notification, RegistryConfig},
    Error, Result,
};

/// Reference-counted handle to a thread's record, shared out of the registry map
pub type ExceptionStateRc = Arc<ExceptionState>;

/// Registry of per-thread exception state, owned by the profiler agent for its attached
/// lifetime.
///
/// A thread is present iff its creation has been observed and its destruction has not. Only
/// [`ThreadRegistry::thread_created`] creates records; every other per-thread operation on an
/// unregistered thread fails with [`Error::UnknownThread`].
#[derive(Debug)]
pub struct ThreadRegistry {
    records: Mutex<HashMap<ThreadId, ExceptionStateRc>>,
    config: RegistryConfig,
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadRegistry {
    /// Event flags the registry needs the runtime to deliver.
    pub const EVENT_MASK: ProfilerEventMask = ProfilerEventMask::MONITOR_THREADS
        .union(ProfilerEventMask::MONITOR_EXCEPTIONS);

    /// Creates an empty registry with the default [`RegistryConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        ThreadRegistry {
            records: Mutex::new(HashMap::with_capacity(config.initial_capacity)),
            config,
        }
    }

    /// Returns the configuration this registry was created with.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Unions the thread lifecycle and exception flags into `events`.
    ///
    /// Called once during agent setup, before the combined mask is handed to the runtime.
    /// Idempotent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadscope::{ProfilerEventMask, ThreadRegistry};
    ///
    /// let mut events = ProfilerEventMask::MONITOR_GC;
    /// ThreadRegistry::advertise_interest(&mut events);
    /// assert!(events.contains(ProfilerEventMask::MONITOR_THREADS));
    /// assert!(events.contains(ProfilerEventMask::MONITOR_EXCEPTIONS));
    /// assert!(events.contains(ProfilerEventMask::MONITOR_GC));
    /// ```
    pub fn advertise_interest(events: &mut ProfilerEventMask) {
        *events |= Self::EVENT_MASK;
    }

    /// Same as [`ThreadRegistry::advertise_interest`], over the raw `DWORD` low event mask.
    ///
    /// Bits outside the modelled flags are preserved.
    pub fn advertise_interest_raw(events_low: &mut u32) {
        *events_low |= Self::EVENT_MASK.bits();
    }

    /// Registers a fresh record for `thread_id`, replacing any record still present for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn thread_created(&self, thread_id: ThreadId) -> Result<()> {
        let replaced = {
            let mut records = lock!(self.records);
            records
                .insert(thread_id, Arc::new(ExceptionState::new()))
                .is_some()
        };

        if self.config.log_lifecycle {
            log::debug!("Thread Created: {}", thread_id);
            if replaced {
                log::debug!("Thread {} was still registered, record reset", thread_id);
            }
        }

        Ok(())
    }

    /// Removes the record for `thread_id`. Removing an absent thread is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn thread_destroyed(&self, thread_id: ThreadId) -> Result<()> {
        let removed = lock!(self.records).remove(&thread_id).is_some();

        if self.config.log_lifecycle {
            log::debug!("Thread Destroyed: {}", thread_id);
            if !removed {
                log::debug!("Thread {} was not registered", thread_id);
            }
        }

        Ok(())
    }

    /// Marks the in-flight exception on `thread_id` as resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownThread`] if `thread_id` has no live record, or
    /// [`Error::LockError`] if the registry lock is poisoned.
    pub fn clear_exception(&self, thread_id: ThreadId) -> Result<()> {
        let record = warn_on_err!(self.record(thread_id));
        record.clear_exception();
        Ok(())
    }

    /// Marks an exception as in flight on `thread_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownThread`] if `thread_id` has no live record, or
    /// [`Error::LockError`] if the registry lock is poisoned.
    pub fn set_has_exception(&self, thread_id: ThreadId) -> Result<()> {
        let record = warn_on_err!(self.record(thread_id));
        record.set_has_exception();
        Ok(())
    }

    /// Records `catcher` as the function expected to catch the exception on `thread_id`.
    ///
    /// The exception flag is not touched; see [`ExceptionState::set_exception_catcher_function`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownThread`] if `thread_id` has no live record, or
    /// [`Error::LockError`] if the registry lock is poisoned.
    pub fn set_exception_catcher_function(
        &self,
        thread_id: ThreadId,
        catcher: FunctionId,
    ) -> Result<()> {
        let record = warn_on_err!(self.record(thread_id));
        record.set_exception_catcher_function(catcher);
        Ok(())
    }

    /// Returns the exception state of `thread_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownThread`] if `thread_id` has no live record, or
    /// [`Error::LockError`] if the registry lock is poisoned.
    pub fn get_exception(&self, thread_id: ThreadId) -> Result<ExceptionInfo> {
        let record = warn_on_err!(self.record(thread_id));
        Ok(record.get_exception())
    }

    /// Returns `true` if any live thread has an exception in flight.
    ///
    /// Stops at the first match. Membership is a consistent snapshot, but the flags are read
    /// one record at a time: a flag set on a record the scan already passed is not seen. A
    /// `false` result only means no set flag was observed during the scan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn any_exception_pending(&self) -> Result<bool> {
        let records = lock!(self.records);
        Ok(records.values().any(|record| record.has_exception()))
    }

    /// Translates [`ThreadRegistry::any_exception_pending`] into the runtime convention of the
    /// fleet query: `S_OK` when an exception is pending, `S_FALSE` otherwise.
    ///
    /// This is the inverse of [`ExceptionInfo::hresult`], which reports a pending exception as
    /// `S_FALSE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn any_exception_pending_hresult(&self) -> Result<i32> {
        if self.any_exception_pending()? {
            Ok(hresult::S_OK)
        } else {
            Ok(hresult::S_FALSE)
        }
    }

    /// Returns every live thread with an exception in flight, sorted by id.
    ///
    /// Full-enumeration counterpart of [`ThreadRegistry::any_exception_pending`], with the
    /// same per-record consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn threads_with_exceptions(&self) -> Result<Vec<ThreadId>> {
        let mut pending: Vec<ThreadId> = {
            let records = lock!(self.records);
            records
                .iter()
                .filter(|(_, record)| record.has_exception())
                .map(|(thread_id, _)| *thread_id)
                .collect()
        };

        pending.sort_unstable();
        Ok(pending)
    }

    /// Forwards `notification` to the matching operation.
    ///
    /// Returns `Some` with the thread's state for [`Notification::ExceptionQuery`], `None`
    /// for everything else.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the notification maps to.
    pub fn handle(&self, notification: Notification) -> Result<Option<ExceptionInfo>> {
        log::trace!("{}: {}", notification.name(), notification.thread_id());

        match notification {
            Notification::ThreadCreated(thread_id) => self.thread_created(thread_id)?,
            Notification::ThreadDestroyed(thread_id) => self.thread_destroyed(thread_id)?,
            Notification::ExceptionCleared(thread_id) => self.clear_exception(thread_id)?,
            Notification::ExceptionThrown(thread_id) => self.set_has_exception(thread_id)?,
            Notification::ExceptionCatcherFound(thread_id, catcher) => {
                self.set_exception_catcher_function(thread_id, catcher)?;
            }
            Notification::ExceptionQuery(thread_id) => {
                return self.get_exception(thread_id).map(Some);
            }
        }

        Ok(None)
    }

    /// Returns the shared record for `thread_id`.
    ///
    /// The map lock is released before the handle is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownThread`] if `thread_id` has no live record, or
    /// [`Error::LockError`] if the registry lock is poisoned.
    pub fn record(&self, thread_id: ThreadId) -> Result<ExceptionStateRc> {
        let records = lock!(self.records);
        records
            .get(&thread_id)
            .cloned()
            .ok_or(Error::UnknownThread(thread_id))
    }

    /// Returns `true` if `thread_id` has a live record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn contains(&self, thread_id: ThreadId) -> Result<bool> {
        Ok(lock!(self.records).contains_key(&thread_id))
    }

    /// Returns the number of live threads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(lock!(self.records).len())
    }

    /// Returns `true` if no thread is registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(lock!(self.records).is_empty())
    }

    /// Returns the ids of all live threads, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn thread_ids(&self) -> Result<Vec<ThreadId>> {
        let mut ids: Vec<ThreadId> = lock!(self.records).keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Drops every record, e.g. when the agent detaches.
    ///
    /// Handles obtained through [`ThreadRegistry::record`] stay valid but are no longer
    /// reachable through the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the registry lock is poisoned.
    pub fn clear(&self) -> Result<()> {
        let released = {
            let mut records = lock!(self.records);
            let count = records.len();
            records.clear();
            count
        };

        log::debug!("Released {} thread records", released);
        Ok(())
    }
}
