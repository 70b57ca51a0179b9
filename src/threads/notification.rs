use strum::IntoStaticStr;

use crate::profiler::{FunctionId, ThreadId};

/// A runtime callback relevant to the registry, keyed by the thread it originated on.
///
/// Lets a dispatcher forward callbacks through a single entry point,
/// [`crate::ThreadRegistry::handle`], and makes notification sequences easy to record and
/// replay.
///
/// Only per-thread notifications are modelled. The fleet-wide query is not tied to a thread
/// and is answered by [`crate::ThreadRegistry::any_exception_pending`] directly:
///
/// ```rust
/// use threadscope::{Notification, ThreadId, ThreadRegistry};
///
/// let registry = ThreadRegistry::new();
/// registry.handle(Notification::ThreadCreated(ThreadId::new(1)))?;
/// registry.handle(Notification::ExceptionThrown(ThreadId::new(1)))?;
/// assert!(registry.any_exception_pending()?);
/// # Ok::<(), threadscope::Error>(())
/// ```
///
/// # Examples
///
/// ```rust
/// use threadscope::{FunctionId, Notification, ThreadId, ThreadRegistry};
///
/// let registry = ThreadRegistry::new();
/// let thread = ThreadId::new(1);
///
/// registry.handle(Notification::ThreadCreated(thread))?;
/// registry.handle(Notification::ExceptionThrown(thread))?;
/// registry.handle(Notification::ExceptionCatcherFound(thread, FunctionId::new(42)))?;
///
/// let info = registry.handle(Notification::ExceptionQuery(thread))?.unwrap();
/// assert_eq!(info.catcher(), Some(FunctionId::new(42)));
/// # Ok::<(), threadscope::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Notification {
    /// A managed thread was created.
    ThreadCreated(ThreadId),
    /// A managed thread was destroyed.
    ThreadDestroyed(ThreadId),
    /// The in-flight exception on the thread was handled or otherwise resolved.
    ExceptionCleared(ThreadId),
    /// An exception was thrown on the thread.
    ExceptionThrown(ThreadId),
    /// The runtime identified the function that will catch the in-flight exception.
    ExceptionCatcherFound(ThreadId, FunctionId),
    /// Query of the thread's current exception state.
    ExceptionQuery(ThreadId),
}

impl Notification {
    /// Returns the thread this notification originated on.
    #[must_use]
    pub fn thread_id(&self) -> ThreadId {
        match *self {
            Notification::ThreadCreated(id)
            | Notification::ThreadDestroyed(id)
            | Notification::ExceptionCleared(id)
            | Notification::ExceptionThrown(id)
            | Notification::ExceptionCatcherFound(id, _)
            | Notification::ExceptionQuery(id) => id,
        }
    }

    /// Returns the kebab-case name of the notification kind, e.g. `"thread-created"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
