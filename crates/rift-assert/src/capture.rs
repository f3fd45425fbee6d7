//! The `Capture` trait and its implementations for std, serde_json and anyhow types.
//!
//! Capturing is how a value of arbitrary type enters the assertion engine:
//! the holder keeps the original value and asks for its [`Value`] view only
//! when a predicate runs. References and smart pointers are transparent,
//! `Option` is the nullable handle, and errors keep their source chain.

use std::any::type_name;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::error::Error;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::diagnostic::{usage_error, UsageError};
use crate::serialize;
use crate::value::Value;

/// A value that can be reflected into the assertion engine.
///
/// Implement this for your own types to assert on them. Records usually map
/// onto [`Value::Record`]:
///
/// ```
/// use rift_assert::{Capture, Value};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Capture for Endpoint {
///     fn capture(&self) -> Value<'_> {
///         Value::record(
///             "Endpoint",
///             [("host", self.host.capture()), ("port", self.port.capture())],
///         )
///     }
/// }
/// ```
///
/// Error types use [`capture_error!`](crate::capture_error) instead.
pub trait Capture {
    /// Reflect `self` into a [`Value`].
    fn capture(&self) -> Value<'_>;
}

/// Implement [`Capture`] for error types so they satisfy the error predicates.
///
/// ```
/// use rift_assert::capture_error;
///
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("timed out")
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// capture_error!(Timeout);
/// ```
#[macro_export]
macro_rules! capture_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Capture for $ty {
                fn capture(&self) -> $crate::Value<'_> {
                    $crate::Value::Error(self)
                }
            }
        )+
    };
}

macro_rules! capture_signed {
    ($($ty:ty),+) => {
        $(
            impl Capture for $ty {
                fn capture(&self) -> Value<'_> {
                    Value::Int(*self as i128, stringify!($ty))
                }
            }
        )+
    };
}

macro_rules! capture_unsigned {
    ($($ty:ty),+) => {
        $(
            impl Capture for $ty {
                fn capture(&self) -> Value<'_> {
                    Value::Uint(*self as u128, stringify!($ty))
                }
            }
        )+
    };
}

capture_signed!(i8, i16, i32, i64, i128, isize);
capture_unsigned!(u8, u16, u32, u64, u128, usize);

impl Capture for f32 {
    fn capture(&self) -> Value<'_> {
        Value::Float(f64::from(*self), "f32")
    }
}

impl Capture for f64 {
    fn capture(&self) -> Value<'_> {
        Value::Float(*self, "f64")
    }
}

impl Capture for bool {
    fn capture(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Capture for char {
    fn capture(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl Capture for str {
    fn capture(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl Capture for String {
    fn capture(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Capture for Cow<'_, str> {
    fn capture(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_ref()))
    }
}

/// The unit value is the untyped nil.
impl Capture for () {
    fn capture(&self) -> Value<'_> {
        Value::Nil("()")
    }
}

impl<T: Capture> Capture for Option<T> {
    fn capture(&self) -> Value<'_> {
        match self {
            None => Value::Nil(type_name::<Self>()),
            // An optional error is the nullable error handle itself.
            Some(inner) => match inner.capture() {
                err @ Value::Error(_) => err,
                value => Value::Handle(Box::new(value)),
            },
        }
    }
}

impl<T: Capture, E: Error + 'static> Capture for Result<T, E> {
    fn capture(&self) -> Value<'_> {
        match self {
            Ok(value) => value.capture(),
            Err(err) => Value::Error(err),
        }
    }
}

macro_rules! capture_transparent {
    ($($ptr:ident),+) => {
        $(
            impl<T: Capture + ?Sized> Capture for $ptr<T> {
                fn capture(&self) -> Value<'_> {
                    (**self).capture()
                }
            }
        )+
    };
}

capture_transparent!(Box, Rc, Arc);

impl<T: Capture + ?Sized> Capture for &T {
    fn capture(&self) -> Value<'_> {
        (**self).capture()
    }
}

impl<T: Capture + ?Sized> Capture for &mut T {
    fn capture(&self) -> Value<'_> {
        (**self).capture()
    }
}

impl<T: Capture> Capture for [T] {
    fn capture(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Capture::capture).collect())
    }
}

impl<T: Capture> Capture for Vec<T> {
    fn capture(&self) -> Value<'_> {
        self.as_slice().capture()
    }
}

impl<T: Capture> Capture for VecDeque<T> {
    fn capture(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Capture::capture).collect())
    }
}

impl<T: Capture, S> Capture for HashSet<T, S> {
    fn capture(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Capture::capture).collect())
    }
}

impl<T: Capture> Capture for BTreeSet<T> {
    fn capture(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Capture::capture).collect())
    }
}

impl<T: Capture, const N: usize> Capture for [T; N] {
    fn capture(&self) -> Value<'_> {
        Value::Array(self.iter().map(Capture::capture).collect())
    }
}

impl<K: Capture, V: Capture, S> Capture for HashMap<K, V, S> {
    fn capture(&self) -> Value<'_> {
        Value::Map(self.iter().map(|(k, v)| (k.capture(), v.capture())).collect())
    }
}

impl<K: Capture, V: Capture> Capture for BTreeMap<K, V> {
    fn capture(&self) -> Value<'_> {
        Value::Map(self.iter().map(|(k, v)| (k.capture(), v.capture())).collect())
    }
}

macro_rules! capture_tuple {
    ($(($($name:ident . $idx:tt),+))+) => {
        $(
            impl<$($name: Capture),+> Capture for ($($name,)+) {
                fn capture(&self) -> Value<'_> {
                    Value::Array(vec![$(self.$idx.capture()),+])
                }
            }
        )+
    };
}

capture_tuple! {
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
}

impl Capture for dyn Error + 'static {
    fn capture(&self) -> Value<'_> {
        Value::Error(self)
    }
}

impl Capture for dyn Error + Send + Sync + 'static {
    fn capture(&self) -> Value<'_> {
        Value::Error(self)
    }
}

impl Capture for anyhow::Error {
    fn capture(&self) -> Value<'_> {
        let err: &(dyn Error + 'static) = self.as_ref();
        Value::Error(err)
    }
}

capture_error!(
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::char::ParseCharError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    serde_json::Error,
);

fn json_number(n: &serde_json::Number) -> Value<'static> {
    if let Some(i) = n.as_i64() {
        Value::Int(i128::from(i), "i64")
    } else if let Some(u) = n.as_u64() {
        Value::Uint(u128::from(u), "u64")
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN), "f64")
    }
}

/// JSON values map onto the engine kinds: objects are maps, arrays are
/// sequences, `null` is nil.
impl Capture for JsonValue {
    fn capture(&self) -> Value<'_> {
        match self {
            JsonValue::Null => Value::Nil("null"),
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => json_number(n),
            JsonValue::String(s) => Value::Str(Cow::Borrowed(s.as_str())),
            JsonValue::Array(items) => Value::Seq(items.iter().map(Capture::capture).collect()),
            JsonValue::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Value::Str(Cow::Borrowed(k.as_str())), v.capture()))
                    .collect(),
            ),
        }
    }
}

/// Capture any `Serialize` value through its serde data model.
///
/// Structs and enum variants become records with their field names and
/// primitives keep their concrete types, so a derived `Serialize` behaves like
/// a hand-written [`Capture`] impl: an all-zero struct is zero and a struct is
/// not length-testable. Sequences and maps keep their collection shapes. A
/// `Serialize` impl that reports an error is a usage error and panics as such.
///
/// ```
/// use rift_assert::{should, Json};
///
/// #[derive(serde::Serialize)]
/// struct Limits {
///     max_connections: u32,
///     burst: Option<u32>,
/// }
///
/// should(Json(Limits { max_connections: 0, burst: None })).be_zero();
/// should(Json(vec!["a", "b"])).have_len(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Capture for Json<T> {
    fn capture(&self) -> Value<'_> {
        match serialize::to_value(&self.0) {
            Ok(value) => value,
            Err(source) => usage_error(UsageError::Serialize {
                type_name: type_name::<T>(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_families() {
        assert!(matches!(5i8.capture(), Value::Int(5, "i8")));
        assert!(matches!(5usize.capture(), Value::Uint(5, "usize")));
        assert!(matches!(1.5f32.capture(), Value::Float(f, "f32") if f == 1.5));
        assert!(matches!(u128::MAX.capture(), Value::Uint(u128::MAX, "u128")));
    }

    #[test]
    fn test_strings_borrow() {
        let owned = String::from("hello");
        assert_eq!(owned.capture().as_str(), Some("hello"));
        assert_eq!("hi".capture().as_str(), Some("hi"));
        assert_eq!(Cow::from("cow").capture().as_str(), Some("cow"));
    }

    #[test]
    fn test_option_is_nullable_handle() {
        let none: Option<i32> = None;
        assert!(matches!(none.capture(), Value::Nil(ty) if ty.contains("Option<i32>")));
        assert!(matches!(Some(0).capture(), Value::Handle(_)));
        assert!(matches!(().capture(), Value::Nil("()")));
    }

    #[test]
    fn test_optional_error_collapses_to_error() {
        let err: Option<std::fmt::Error> = Some(std::fmt::Error);
        assert!(matches!(err.capture(), Value::Error(_)));
    }

    #[test]
    fn test_result_capture() {
        let ok: Result<u8, std::fmt::Error> = Ok(3);
        assert!(matches!(ok.capture(), Value::Uint(3, "u8")));

        let unit: Result<(), std::fmt::Error> = Ok(());
        assert!(matches!(unit.capture(), Value::Nil("()")));

        let err: Result<u8, std::fmt::Error> = Err(std::fmt::Error);
        assert!(matches!(err.capture(), Value::Error(_)));
    }

    #[test]
    fn test_pointers_are_transparent() {
        let boxed = Box::new(7i64);
        assert!(matches!(boxed.capture(), Value::Int(7, "i64")));
        assert!(matches!(Rc::new(7i64).capture(), Value::Int(7, "i64")));
        assert!(matches!(Arc::new(7i64).capture(), Value::Int(7, "i64")));
        assert!(matches!((&&7i64).capture(), Value::Int(7, "i64")));
    }

    #[test]
    fn test_collection_kinds() {
        assert!(matches!(vec![1, 2].capture(), Value::Seq(items) if items.len() == 2));
        assert!(matches!([1, 2, 3].capture(), Value::Array(items) if items.len() == 3));
        assert!(matches!((1, "a").capture(), Value::Array(items) if items.len() == 2));

        let map: HashMap<&str, i32> = [("a", 1)].into_iter().collect();
        assert!(matches!(map.capture(), Value::Map(entries) if entries.len() == 1));

        let set: BTreeSet<i32> = [1, 2, 3].into_iter().collect();
        assert!(matches!(set.capture(), Value::Seq(items) if items.len() == 3));
    }

    #[test]
    fn test_error_trait_objects() {
        let boxed: Box<dyn Error + Send + Sync> = "boom".into();
        assert!(matches!(boxed.capture(), Value::Error(e) if e.to_string() == "boom"));

        let any = anyhow::anyhow!("failed").context("while loading");
        assert!(matches!(any.capture(), Value::Error(_)));

        let io = std::io::Error::other("disk");
        assert!(matches!(io.capture(), Value::Error(_)));
    }

    #[test]
    fn test_json_value_capture() {
        let doc = json!({"name": "rift", "ports": [8080, 8081], "tls": null, "ratio": 0.5});
        let Value::Map(entries) = doc.capture() else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 4);

        assert!(matches!(json!(null).capture(), Value::Nil("null")));
        assert!(matches!(json!(-1).capture(), Value::Int(-1, "i64")));
        assert!(matches!(json!(u64::MAX).capture(), Value::Uint(_, "u64")));
        assert!(matches!(json!(0.5).capture(), Value::Float(f, "f64") if f == 0.5));
    }

    #[test]
    fn test_json_wrapper_keeps_records() {
        #[derive(Serialize)]
        struct Upstream {
            host: &'static str,
            port: u16,
        }

        let value = Json(Upstream {
            host: "localhost",
            port: 8080,
        });
        let Value::Record(name, fields) = value.capture() else {
            panic!("expected a record");
        };
        assert_eq!(name, "Upstream");
        assert!(matches!(fields[1], ("port", Value::Uint(8080, "u16"))));
    }

    #[test]
    fn test_json_wrapper_usage_error() {
        struct Unrepresentable;

        impl Serialize for Unrepresentable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(<S::Error as serde::ser::Error>::custom("no data model"))
            }
        }

        let result = std::panic::catch_unwind(|| {
            let _ = Json(Unrepresentable).capture();
        });
        let payload = result.expect_err("failing Serialize impls are usage errors");
        let message = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(message.starts_with("internal rift-assert error:"), "{message}");
        assert!(message.contains("no data model"), "{message}");
    }
}
