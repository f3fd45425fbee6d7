//! Failure reporting: call-site capture, the assertion panic and usage errors.

#![cfg_attr(not(any(feature = "enabled", rift_assert, test)), allow(dead_code))]

use std::fmt;
use std::panic::Location;

use tracing::error;

use crate::serialize::SerializeError;

/// Misuse of the assertion API by the calling code, as opposed to a violated
/// invariant in the code under test.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("cannot capture {type_name}: {source}")]
    Serialize {
        type_name: &'static str,
        #[source]
        source: SerializeError,
    },
}

/// Keep only the last path segment, whichever separator the toolchain used.
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Render the diagnostic for a failure at `location`.
pub(crate) fn render(location: &Location<'_>, message: &str) -> String {
    format!(
        "{}:{}: assertion failed: {message}",
        file_name(location.file()),
        location.line()
    )
}

/// Report an assertion failure at the caller's location and panic.
#[cold]
#[track_caller]
pub(crate) fn fail(message: fmt::Arguments<'_>) -> ! {
    let location = Location::caller();
    let message = message.to_string();
    error!(
        target: "rift_assert",
        file = file_name(location.file()),
        line = location.line(),
        "assertion failed: {message}"
    );
    panic!("{}", render(location, &message));
}

/// Report a usage error and panic with the internal-error prefix.
#[cold]
pub(crate) fn usage_error(err: UsageError) -> ! {
    error!(target: "rift_assert", error = %err, "internal rift-assert error");
    panic!("internal rift-assert error: {err}");
}
