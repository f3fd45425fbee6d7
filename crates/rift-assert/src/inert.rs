//! Inert assertions: the same surface as the active build, compiled down to
//! nothing. Arguments are dropped unexamined and closures are never called.

use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

use crate::capture::Capture;

/// A zero-sized stand-in for the active holder.
pub struct Assertion<T> {
    _value: PhantomData<fn() -> T>,
}

/// Start an assertion chain that checks nothing.
#[inline(always)]
pub fn should<T: Capture>(_value: T) -> Assertion<T> {
    Assertion {
        _value: PhantomData,
    }
}

impl<T> fmt::Debug for Assertion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Assertion")
    }
}

impl<T: Capture> Assertion<T> {
    #[inline(always)]
    pub fn be_nil(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn not_be_nil(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn true_fn<F: FnOnce() -> bool>(self, _condition: F) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_true(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_false(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_equal<E: Capture>(self, _expected: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn not_be_equal<E: Capture>(self, _expected: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_empty(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn not_be_empty(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn have_len(self, _expected: usize) -> Self {
        self
    }

    #[inline(always)]
    pub fn contain<E: Capture>(self, _element: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn not_contain<E: Capture>(self, _element: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn contain_substring(self, _substring: &str) -> Self {
        self
    }

    #[inline(always)]
    pub fn have_prefix(self, _prefix: &str) -> Self {
        self
    }

    #[inline(always)]
    pub fn have_suffix(self, _suffix: &str) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_zero(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn not_be_zero(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_greater_than<E: Capture>(self, _expected: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_less_than<E: Capture>(self, _expected: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_greater_than_or_equal_to<E: Capture>(self, _expected: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_less_than_or_equal_to<E: Capture>(self, _expected: E) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_error(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn not_be_error(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_error_of_type<E: Error + 'static>(self) -> Self {
        self
    }

    #[inline(always)]
    pub fn be_error_with_message(self, _substring: &str) -> Self {
        self
    }
}

#[inline(always)]
pub fn assert(_condition: bool) {}

#[inline(always)]
pub fn assertf(_condition: bool, _message: fmt::Arguments<'_>) {}
