#![allow(unused_macros)]

/// Helper macro for locking items, propagating poisoning as [`crate::Error::LockError`]
///
/// ```rust, ignore
///  let mut data = lock!(my_mutex);
///  data.some_field = 42;
/// ```
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().map_err(|_| crate::Error::LockError)?
    };
}

/// Helper macro that logs a failed result at warn level before returning it to the caller
///
/// ```rust, ignore
///  let record = warn_on_err!(self.record(thread_id));
/// ```
macro_rules! warn_on_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(error) => {
                log::warn!("{}", error);
                return Err(error);
            }
        }
    };
}
