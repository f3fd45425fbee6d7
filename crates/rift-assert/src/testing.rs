//! Helpers for test suites that check their own assertions.
//!
//! ```
//! use rift_assert::should;
//! use rift_assert::testing::{must_not_panic, must_panic_if_enabled};
//!
//! must_not_panic(|| {
//!     should(vec![1, 2, 3]).have_len(3);
//! });
//! must_panic_if_enabled(|| {
//!     should(vec![1, 2, 3]).have_len(4);
//! });
//! ```

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

fn payload_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast_ref::<&'static str>() {
            Some(message) => (*message).to_string(),
            None => "<non-string panic payload>".to_string(),
        },
    }
}

/// Run `f`, require it to panic and return the panic message.
///
/// # Panics
///
/// Panics when `f` returns normally.
#[track_caller]
pub fn must_panic<F: FnOnce()>(f: F) -> String {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("expected a panic, but the closure returned normally"),
        Err(payload) => payload_message(payload),
    }
}

/// Run `f` and require it to return normally.
///
/// # Panics
///
/// Panics with the original message, prefixed, when `f` panics.
#[track_caller]
pub fn must_not_panic<F: FnOnce()>(f: F) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        panic!("expected no panic, but got: {}", payload_message(payload));
    }
}

/// [`must_panic`] in the active build, [`must_not_panic`] in the inert one.
/// Returns the panic message, or `None` when assertions are compiled out.
#[track_caller]
pub fn must_panic_if_enabled<F: FnOnce()>(f: F) -> Option<String> {
    if crate::enabled() {
        Some(must_panic(f))
    } else {
        must_not_panic(f);
        None
    }
}

/// Run `f` and require it to return normally in both builds.
///
/// The counterpart of [`must_panic_if_enabled`] for assertions that hold, so
/// a suite reads the same whichever build is selected. Behaves exactly like
/// [`must_not_panic`].
#[track_caller]
pub fn must_not_panic_if_enabled<F: FnOnce()>(f: F) {
    must_not_panic(f);
}
