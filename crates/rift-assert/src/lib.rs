//! Fluent debug assertions for Rift components.
//!
//! Assertions state runtime invariants inline in application code. They are
//! checked only in builds that opt in; everywhere else every call compiles to
//! nothing.
//!
//! # Builds
//!
//! - **Active**: the `enabled` feature, or `RUSTFLAGS="--cfg rift_assert"`.
//!   Predicates inspect the captured value and panic with
//!   `"<file>:<line>: assertion failed: <message>"` on the first violation.
//! - **Inert** (default): the same functions and methods, all zero-sized
//!   no-ops that never inspect, format or panic.
//!
//! # Example
//!
//! ```
//! use rift_assert::{assertf, should};
//!
//! let upstreams = vec!["10.0.0.1:8080", "10.0.0.2:8080"];
//! should(&upstreams).not_be_empty().have_len(2).contain("10.0.0.1:8080");
//!
//! let retries = 3u32;
//! should(retries).be_greater_than(0).be_less_than_or_equal_to(10);
//!
//! assertf!(retries < 5, "retries {} above ceiling", retries);
//! ```
//!
//! Values enter the engine through the [`Capture`] trait. Std scalars,
//! strings, collections, `Option`, `Result`, errors, `anyhow::Error` and
//! `serde_json::Value` are supported out of the box; wrap any other
//! `Serialize` type in [`Json`], implement [`Capture`] by hand, or use
//! [`capture_error!`] for error types.

mod capture;
mod diagnostic;
mod serialize;
mod value;

#[cfg(any(feature = "enabled", rift_assert, test))]
mod active;
#[cfg(any(feature = "enabled", rift_assert, test))]
mod introspect;

#[cfg(any(not(any(feature = "enabled", rift_assert)), test))]
mod inert;

pub mod testing;

pub use capture::{Capture, Json};
pub use diagnostic::UsageError;
pub use serialize::SerializeError;
pub use value::Value;

#[cfg(any(feature = "enabled", rift_assert))]
pub use active::{assert, assertf, should, Assertion};

#[cfg(not(any(feature = "enabled", rift_assert)))]
pub use inert::{assert, assertf, should, Assertion};

/// Whether this build checks assertions. Fixed at compile time.
pub const fn enabled() -> bool {
    cfg!(any(feature = "enabled", rift_assert))
}

/// Assert `condition`, panicking with a formatted message when it does not
/// hold. The message is only formatted on failure, and never in the inert
/// build.
///
/// ```
/// let pool_size = 8;
/// rift_assert::assertf!(pool_size > 0, "pool size must be positive, got {}", pool_size);
/// ```
#[macro_export]
macro_rules! assertf {
    ($condition:expr, $($arg:tt)+) => {
        $crate::assertf($condition, ::core::format_args!($($arg)+))
    };
}
