//! Active assertions: every predicate inspects the captured value and panics
//! with a located diagnostic when the invariant does not hold.

use std::any::type_name;
use std::error::Error;
use std::fmt;

use crate::capture::Capture;
use crate::diagnostic::fail;
use crate::introspect::{compare, deep_equal, is_nil, is_zero, length, Comparison};
use crate::value::Value;

/// A captured value with chainable predicates.
///
/// Every predicate consumes the holder and hands it back on success, so
/// checks chain left to right and the first failure panics.
pub struct Assertion<T> {
    value: T,
}

/// Start an assertion chain on `value`.
///
/// ```
/// use rift_assert::should;
///
/// should(vec![1, 2]).not_be_empty().have_len(2);
/// ```
pub fn should<T: Capture>(value: T) -> Assertion<T> {
    Assertion { value }
}

impl<T: fmt::Debug> fmt::Debug for Assertion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion").field("value", &self.value).finish()
    }
}

impl<T: Capture> Assertion<T> {
    /// Run `check` against the captured value and fail at the caller's
    /// location when it reports a violation.
    #[track_caller]
    fn verify<F>(self, check: F) -> Self
    where
        F: FnOnce(&Value<'_>) -> Result<(), String>,
    {
        if let Err(message) = check(&self.value.capture()) {
            fail(format_args!("{message}"));
        }
        self
    }

    #[track_caller]
    fn ordered<E: Capture>(self, expected: E, op: Comparison) -> Self {
        self.verify(|value| {
            let expected = expected.capture();
            match compare(value, &expected, op) {
                None => Err(format!(
                    "{} requires comparable numeric types, got {} and {}",
                    op.predicate(),
                    type_name::<T>(),
                    type_name::<E>()
                )),
                Some(false) => Err(format!("should be {op} {expected}, but got {value}")),
                Some(true) => Ok(()),
            }
        })
    }

    /// Passes when the value is nil (`None`, `()` or JSON `null`).
    #[track_caller]
    pub fn be_nil(self) -> Self {
        self.verify(|value| {
            if is_nil(value) {
                Ok(())
            } else {
                Err(format!(
                    "should be nil: value ({value}) of type {} is not nil",
                    type_name::<T>()
                ))
            }
        })
    }

    #[track_caller]
    pub fn not_be_nil(self) -> Self {
        self.verify(|value| {
            if is_nil(value) {
                Err("should not be nil: value is nil".to_string())
            } else {
                Ok(())
            }
        })
    }

    /// Passes when `condition` returns true. The captured value is not consulted.
    #[track_caller]
    pub fn true_fn<F: FnOnce() -> bool>(self, condition: F) -> Self {
        if !condition() {
            fail(format_args!("function returned false"));
        }
        self
    }

    #[track_caller]
    pub fn be_true(self) -> Self {
        self.verify(|value| match value {
            Value::Bool(true) => Ok(()),
            _ => Err(format!(
                "should be true, but got: {value} (type {})",
                type_name::<T>()
            )),
        })
    }

    #[track_caller]
    pub fn be_false(self) -> Self {
        self.verify(|value| match value {
            Value::Bool(false) => Ok(()),
            _ => Err(format!(
                "should be false, but got: {value} (type {})",
                type_name::<T>()
            )),
        })
    }

    /// Passes when the value is deeply equal to `expected`, including its
    /// concrete type.
    #[track_caller]
    pub fn be_equal<E: Capture>(self, expected: E) -> Self {
        self.verify(|value| {
            let expected = expected.capture();
            if deep_equal(value, &expected) {
                Ok(())
            } else {
                Err(format!(
                    "should be equal:\n  expected: {expected} (type {})\n       got: {value} (type {})",
                    type_name::<E>(),
                    type_name::<T>()
                ))
            }
        })
    }

    #[track_caller]
    pub fn not_be_equal<E: Capture>(self, expected: E) -> Self {
        self.verify(|value| {
            if deep_equal(value, &expected.capture()) {
                Err(format!(
                    "should not be equal, but got: {value} (type {})",
                    type_name::<T>()
                ))
            } else {
                Ok(())
            }
        })
    }

    /// Passes for nil, or for a length-testable value of length zero.
    #[track_caller]
    pub fn be_empty(self) -> Self {
        self.verify(|value| {
            if is_nil(value) {
                return Ok(());
            }
            match length(value) {
                Some(0) => Ok(()),
                Some(len) => Err(format!("should be empty, but got length {len}: {value}")),
                None => Err(format!(
                    "should be empty, but got non-nil, non-length-testable value: {value} (type {})",
                    type_name::<T>()
                )),
            }
        })
    }

    /// Passes for a non-nil value that is either not length-testable or has
    /// a non-zero length.
    #[track_caller]
    pub fn not_be_empty(self) -> Self {
        self.verify(|value| {
            if is_nil(value) {
                return Err("should not be empty, but got nil".to_string());
            }
            match length(value) {
                Some(0) => Err(format!("should not be empty, but got zero length: {value}")),
                _ => Ok(()),
            }
        })
    }

    /// Passes when the value is length-testable with exactly `expected`
    /// elements (characters, for strings).
    #[track_caller]
    pub fn have_len(self, expected: usize) -> Self {
        self.verify(|value| match length(value) {
            Some(len) if len == expected => Ok(()),
            Some(len) => Err(format!(
                "should have length {expected}, but got {len}: {value}"
            )),
            None => Err(format!(
                "should have length, but got non-length-testable value: {value} (type {})",
                type_name::<T>()
            )),
        })
    }

    /// For strings, `element` must be a string and is searched as a
    /// substring. For sequences and arrays, any deeply equal element matches.
    #[track_caller]
    pub fn contain<E: Capture>(self, element: E) -> Self {
        self.verify(|value| match value {
            Value::Str(haystack) => match element.capture() {
                Value::Str(needle) if haystack.contains(needle.as_ref()) => Ok(()),
                Value::Str(needle) => Err(format!(
                    "string {value} should contain substring {needle:?}"
                )),
                _ => Err(format!(
                    "contain expected a string element for string value, got {}",
                    type_name::<E>()
                )),
            },
            Value::Seq(items) | Value::Array(items) => {
                let element = element.capture();
                if items.iter().any(|item| deep_equal(item, &element)) {
                    Ok(())
                } else {
                    Err(format!("collection {value} should contain element {element}"))
                }
            }
            _ => Err(format!(
                "contain requires slice, array, or string, got {}",
                type_name::<T>()
            )),
        })
    }

    #[track_caller]
    pub fn not_contain<E: Capture>(self, element: E) -> Self {
        self.verify(|value| match value {
            Value::Str(haystack) => match element.capture() {
                Value::Str(needle) if haystack.contains(needle.as_ref()) => Err(format!(
                    "string {value} should not contain substring {needle:?}"
                )),
                Value::Str(_) => Ok(()),
                _ => Err(format!(
                    "not_contain expected a string element for string value, got {}",
                    type_name::<E>()
                )),
            },
            Value::Seq(items) | Value::Array(items) => {
                let element = element.capture();
                if items.iter().any(|item| deep_equal(item, &element)) {
                    Err(format!(
                        "collection {value} should not contain element {element}"
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Err(format!(
                "not_contain requires slice, array, or string, got {}",
                type_name::<T>()
            )),
        })
    }

    #[track_caller]
    pub fn contain_substring(self, substring: &str) -> Self {
        self.verify(|value| match value.as_str() {
            Some(s) if s.contains(substring) => Ok(()),
            Some(_) => Err(format!(
                "string {value} should contain substring {substring:?}"
            )),
            None => Err(format!(
                "contain_substring requires a string value, got {}",
                type_name::<T>()
            )),
        })
    }

    #[track_caller]
    pub fn have_prefix(self, prefix: &str) -> Self {
        self.verify(|value| match value.as_str() {
            Some(s) if s.starts_with(prefix) => Ok(()),
            Some(_) => Err(format!("string {value} should have prefix {prefix:?}")),
            None => Err(format!(
                "have_prefix requires a string value, got {}",
                type_name::<T>()
            )),
        })
    }

    #[track_caller]
    pub fn have_suffix(self, suffix: &str) -> Self {
        self.verify(|value| match value.as_str() {
            Some(s) if s.ends_with(suffix) => Ok(()),
            Some(_) => Err(format!("string {value} should have suffix {suffix:?}")),
            None => Err(format!(
                "have_suffix requires a string value, got {}",
                type_name::<T>()
            )),
        })
    }

    /// Passes for the zero value of the value's kind: nil, `false`, numeric
    /// zero, `'\0'`, `""`, or an array/record whose parts are all zero.
    #[track_caller]
    pub fn be_zero(self) -> Self {
        self.verify(|value| {
            if is_zero(value) {
                Ok(())
            } else {
                Err(format!(
                    "should be the zero value, but got: {value} (type {})",
                    type_name::<T>()
                ))
            }
        })
    }

    #[track_caller]
    pub fn not_be_zero(self) -> Self {
        self.verify(|value| {
            if is_zero(value) {
                Err(format!(
                    "should not be the zero value, but got: {value} (type {})",
                    type_name::<T>()
                ))
            } else {
                Ok(())
            }
        })
    }

    /// Numeric `>`. Operands of different numeric types are widened to `f64`.
    #[track_caller]
    pub fn be_greater_than<E: Capture>(self, expected: E) -> Self {
        self.ordered(expected, Comparison::Greater)
    }

    #[track_caller]
    pub fn be_less_than<E: Capture>(self, expected: E) -> Self {
        self.ordered(expected, Comparison::Less)
    }

    #[track_caller]
    pub fn be_greater_than_or_equal_to<E: Capture>(self, expected: E) -> Self {
        self.ordered(expected, Comparison::GreaterOrEqual)
    }

    #[track_caller]
    pub fn be_less_than_or_equal_to<E: Capture>(self, expected: E) -> Self {
        self.ordered(expected, Comparison::LessOrEqual)
    }

    /// Passes when the value is a present error.
    #[track_caller]
    pub fn be_error(self) -> Self {
        self.verify(|value| match value {
            Value::Error(_) => Ok(()),
            Value::Nil(_) => Err("should be an error, but got nil".to_string()),
            _ => Err(format!(
                "should be an error, but got type {} with value {value}",
                type_name::<T>()
            )),
        })
    }

    /// Passes when the value is nil or is not an error at all.
    #[track_caller]
    pub fn not_be_error(self) -> Self {
        self.verify(|value| match value.as_error() {
            Some(err) => Err(format!("should not be an error, but got: {err}")),
            None => Ok(()),
        })
    }

    /// Passes when the value is an error with an `E` somewhere in its
    /// `source()` chain, itself included.
    #[track_caller]
    pub fn be_error_of_type<E: Error + 'static>(self) -> Self {
        self.verify(|value| {
            let Some(err) = value.as_error() else {
                return Err(format!(
                    "should be a non-nil error, but got: {value} (type {})",
                    type_name::<T>()
                ));
            };
            let mut cause = Some(err);
            while let Some(current) = cause {
                if current.is::<E>() {
                    return Ok(());
                }
                cause = current.source();
            }
            Err(format!(
                "error type should be {} (or wrap it), but got type {}: {err}",
                type_name::<E>(),
                type_name::<T>()
            ))
        })
    }

    /// Passes when the value is an error whose message contains `substring`.
    #[track_caller]
    pub fn be_error_with_message(self, substring: &str) -> Self {
        self.verify(|value| {
            let Some(err) = value.as_error() else {
                return Err(format!(
                    "should be a non-nil error, but got: {value} (type {})",
                    type_name::<T>()
                ));
            };
            let message = err.to_string();
            if message.contains(substring) {
                Ok(())
            } else {
                Err(format!(
                    "error message {message:?} should contain substring {substring:?}"
                ))
            }
        })
    }
}

/// Panic with `condition was false` when `condition` does not hold.
#[track_caller]
pub fn assert(condition: bool) {
    if !condition {
        fail(format_args!("condition was false"));
    }
}

/// Panic with the caller's message when `condition` does not hold. Prefer
/// the [`assertf!`](crate::assertf) macro, which builds the arguments.
#[track_caller]
pub fn assertf(condition: bool, message: fmt::Arguments<'_>) {
    if !condition {
        fail(message);
    }
}
