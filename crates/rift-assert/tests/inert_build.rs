//! Behavior of the public surface in the default build, where assertions
//! compile to no-ops.

#![cfg(not(any(feature = "enabled", rift_assert)))]

use std::collections::HashMap;
use std::io;

use rift_assert::testing::{must_not_panic, must_panic_if_enabled};
use rift_assert::{assert, assertf, should, Assertion, Json};

#[test]
fn test_enabled_reports_false() {
    assert!(!rift_assert::enabled());
}

#[test]
fn test_holder_is_zero_sized() {
    assert_eq!(std::mem::size_of::<Assertion<String>>(), 0);
    assert_eq!(std::mem::size_of::<Assertion<Vec<HashMap<String, u64>>>>(), 0);
}

#[test]
fn test_violations_are_ignored() {
    must_not_panic(|| {
        should(Some(1)).be_nil();
        should(vec![1, 2]).have_len(3).contain(9);
        should("edge").have_prefix("core").be_greater_than(1);
        should(io::Error::other("down")).not_be_error();
        assert(false);
        assertf(false, format_args!("ignored"));
        rift_assert::assertf!(false, "ignored {}", 1);
    });
}

#[test]
fn test_usage_errors_are_ignored() {
    struct Opaque;

    impl serde::Serialize for Opaque {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(<S::Error as serde::ser::Error>::custom("opaque handle"))
        }
    }

    must_not_panic(|| {
        should(Json(Opaque)).be_nil();
    });
}

#[test]
fn test_closures_are_not_called() {
    let mut calls = 0;
    should(()).true_fn(|| {
        calls += 1;
        false
    });
    assert_eq!(calls, 0);
}

#[test]
fn test_panic_helpers_follow_build() {
    let result = must_panic_if_enabled(|| {
        should(1).be_equal(2);
    });
    assert!(result.is_none());
}
