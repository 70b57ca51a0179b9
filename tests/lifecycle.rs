//! Lifecycle integration tests.
//!
//! These tests drive the registry through the public API the way a profiler agent does:
//! 1. Advertise the event mask during setup
//! 2. Feed thread lifecycle and exception notifications
//! 3. Verify per-thread and fleet-wide queries after every step

use threadscope::{
    hresult, Error, ExceptionInfo, FunctionId, Notification, ProfilerEventMask, RegistryConfig,
    Result, ThreadId, ThreadRegistry,
};

/// Replay a notification sequence, stopping at the first failure.
fn replay(registry: &ThreadRegistry, notifications: &[Notification]) -> Result<()> {
    for notification in notifications {
        registry.handle(*notification)?;
    }
    Ok(())
}

/// Assert every per-thread operation on `thread` fails with `UnknownThread`.
fn assert_unknown(registry: &ThreadRegistry, thread: ThreadId) {
    let unknown = Error::UnknownThread(thread);
    assert_eq!(registry.get_exception(thread), Err(unknown.clone()));
    assert_eq!(registry.clear_exception(thread), Err(unknown.clone()));
    assert_eq!(registry.set_has_exception(thread), Err(unknown.clone()));
    assert_eq!(
        registry.set_exception_catcher_function(thread, FunctionId::new(1)),
        Err(unknown)
    );
}

#[test]
fn test_agent_setup_mask() {
    let mut events = ProfilerEventMask::MONITOR_MODULE_LOADS;
    ThreadRegistry::advertise_interest(&mut events);
    ThreadRegistry::advertise_interest(&mut events);

    assert_eq!(
        events,
        ProfilerEventMask::MONITOR_MODULE_LOADS
            | ProfilerEventMask::MONITOR_THREADS
            | ProfilerEventMask::MONITOR_EXCEPTIONS
    );
}

#[test]
fn test_lifecycle_exactness() -> Result<()> {
    let registry = ThreadRegistry::new();
    let thread = ThreadId::new(0x2000);

    assert_unknown(&registry, thread);

    registry.thread_created(thread)?;
    registry.clear_exception(thread)?;
    registry.set_has_exception(thread)?;
    registry.set_exception_catcher_function(thread, FunctionId::new(0x10))?;
    assert!(registry.get_exception(thread)?.has_exception());

    registry.thread_destroyed(thread)?;
    assert_unknown(&registry, thread);

    registry.thread_created(thread)?;
    assert_eq!(registry.get_exception(thread)?, ExceptionInfo::CLEAR);
    Ok(())
}

#[test]
fn test_exception_round_trip_scenario() -> Result<()> {
    let registry = ThreadRegistry::new();
    let thread = ThreadId::new(1);

    registry.thread_created(thread)?;
    let info = registry.get_exception(thread)?;
    assert_eq!((info.has_exception(), info.catcher()), (false, None));
    assert_eq!(info.hresult(), hresult::S_OK);

    registry.set_has_exception(thread)?;
    let info = registry.get_exception(thread)?;
    assert_eq!((info.has_exception(), info.catcher()), (true, None));
    assert_eq!(info.hresult(), hresult::S_FALSE);

    registry.set_exception_catcher_function(thread, FunctionId::new(42))?;
    let info = registry.get_exception(thread)?;
    assert_eq!(
        (info.has_exception(), info.catcher()),
        (true, Some(FunctionId::new(42)))
    );

    registry.clear_exception(thread)?;
    let info = registry.get_exception(thread)?;
    assert_eq!((info.has_exception(), info.catcher()), (false, None));

    registry.thread_destroyed(thread)?;
    let err = registry.get_exception(thread).unwrap_err();
    assert_eq!(err, Error::UnknownThread(thread));
    assert_eq!(err.hresult(), hresult::E_UNEXPECTED);
    Ok(())
}

#[test]
fn test_fleet_aggregation_scenario() -> Result<()> {
    let registry = ThreadRegistry::new();
    let (first, second) = (ThreadId::new(1), ThreadId::new(2));

    replay(
        &registry,
        &[
            Notification::ThreadCreated(first),
            Notification::ThreadCreated(second),
            Notification::ExceptionThrown(second),
        ],
    )?;
    assert!(registry.any_exception_pending()?);
    assert_eq!(registry.threads_with_exceptions()?, vec![second]);

    registry.handle(Notification::ThreadDestroyed(second))?;
    assert!(!registry.any_exception_pending()?);
    assert_eq!(registry.thread_ids()?, vec![first]);
    Ok(())
}

#[test]
fn test_fleet_query_ignores_stale_catchers() -> Result<()> {
    let registry = ThreadRegistry::new();

    for raw in 1..=8 {
        let thread = ThreadId::new(raw);
        registry.thread_created(thread)?;
        registry.set_exception_catcher_function(thread, FunctionId::new(raw * 10))?;
    }

    assert!(!registry.any_exception_pending()?);
    assert!(registry.threads_with_exceptions()?.is_empty());
    Ok(())
}

#[test]
fn test_clear_idempotence() -> Result<()> {
    let registry = ThreadRegistry::new();
    let thread = ThreadId::new(5);
    registry.thread_created(thread)?;
    registry.set_has_exception(thread)?;

    for _ in 0..5 {
        registry.clear_exception(thread)?;
        assert!(!registry.get_exception(thread)?.has_exception());
    }
    Ok(())
}

#[test]
fn test_misordered_notifications_are_surfaced() -> Result<()> {
    let registry = ThreadRegistry::with_config(RegistryConfig::quiet());
    let thread = ThreadId::new(0x77);

    // exception delivered before the thread was announced
    let result = replay(
        &registry,
        &[
            Notification::ExceptionThrown(thread),
            Notification::ThreadCreated(thread),
        ],
    );
    assert_eq!(result, Err(Error::UnknownThread(thread)));
    assert!(!registry.contains(thread)?);

    // exception delivered after the thread was destroyed
    replay(
        &registry,
        &[
            Notification::ThreadCreated(thread),
            Notification::ThreadDestroyed(thread),
        ],
    )?;
    assert_eq!(
        registry.handle(Notification::ExceptionCatcherFound(thread, FunctionId::new(1))),
        Err(Error::UnknownThread(thread))
    );
    assert!(registry.is_empty()?);
    Ok(())
}

#[test]
fn test_teardown_releases_records() -> Result<()> {
    let registry = ThreadRegistry::new();
    for raw in 1..=16 {
        registry.thread_created(ThreadId::new(raw))?;
    }
    assert_eq!(registry.len()?, 16);

    registry.clear()?;
    assert!(registry.is_empty()?);
    assert!(!registry.any_exception_pending()?);
    Ok(())
}
