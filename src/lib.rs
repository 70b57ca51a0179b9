// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # threadscope
//!
//! Thread-indexed exception state tracking for .NET profiler agents.
//!
//! A profiler attached to the CLR receives thread lifecycle callbacks (`ThreadCreated`,
//! `ThreadDestroyed`) and exception callbacks (thrown, catcher found, handled) on whichever
//! runtime thread triggered them, concurrently and without any ordering guarantees across
//! threads. `threadscope` keeps one exception state record per live managed thread and
//! answers both per-thread queries and the fleet-wide "is any thread currently unwinding an
//! exception?" question.
//!
//! ## Quick Start
//!
//! ```rust
//! use threadscope::prelude::*;
//!
//! // During agent setup
//! let mut events = ProfilerEventMask::empty();
//! ThreadRegistry::advertise_interest(&mut events);
//! let registry = ThreadRegistry::new();
//!
//! // From runtime callbacks
//! let thread = ThreadId::new(0x1c40);
//! registry.thread_created(thread)?;
//! registry.set_has_exception(thread)?;
//! registry.set_exception_catcher_function(thread, FunctionId::new(0x7ff8_0000))?;
//!
//! let info = registry.get_exception(thread)?;
//! assert!(info.has_exception());
//! assert_eq!(info.catcher(), Some(FunctionId::new(0x7ff8_0000)));
//! assert!(registry.any_exception_pending()?);
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`profiler`] - Runtime handles ([`ThreadId`], [`FunctionId`]) and the event mask
//! - [`threads`] - The [`ThreadRegistry`] and its per-thread [`threads::ExceptionState`]
//! - [`Error`] and [`Result`] - Error handling, with `HRESULT` translation
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade: thread lifecycle at
//! `debug`, notifications for unknown threads at `warn`, dispatched notifications at
//! `trace`. Install any `log` backend in the host to see them.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use threadscope::{Error, ThreadId, ThreadRegistry};
//!
//! let registry = ThreadRegistry::new();
//! match registry.set_has_exception(ThreadId::new(3)) {
//!     Ok(()) => println!("recorded"),
//!     Err(Error::UnknownThread(id)) => println!("{} was never created", id),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
pub mod prelude;

/// Handles and configuration values exchanged with the profiling runtime.
pub mod profiler;

/// Per-thread exception state and the registry owning it.
pub mod threads;

/// `threadscope` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

pub use error::{hresult, Error};

pub use profiler::{FunctionId, ProfilerEventMask, ThreadId};

pub use threads::{ExceptionInfo, Notification, RegistryConfig, ThreadRegistry};
