//! Captured representation of asserted values.
//!
//! Every value handed to `should` is reflected into a [`Value`] tree when a
//! predicate needs to look at it. The tree keeps enough kind information to
//! tell a nil handle from an empty collection, a `u8` from an `i64`, and a
//! fixed-size array from a growable sequence.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// A type-erased view of a captured value.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    /// An absent value. Carries the type name of its shape, so `None::<i32>`
    /// and `()` are both nil but not equal to each other.
    Nil(&'static str),
    Bool(bool),
    /// Signed integer family, widened to `i128`, with the concrete type name.
    Int(i128, &'static str),
    /// Unsigned integer family, widened to `u128`, with the concrete type name.
    Uint(u128, &'static str),
    /// Floating-point family, widened to `f64`, with the concrete type name.
    Float(f64, &'static str),
    Char(char),
    Str(Cow<'a, str>),
    /// A present nullable handle (`Some(x)`).
    Handle(Box<Value<'a>>),
    /// A growable sequence: `Vec`, slices, deques, sets, JSON arrays.
    Seq(Vec<Value<'a>>),
    /// A fixed-size aggregate: `[T; N]` and tuples.
    Array(Vec<Value<'a>>),
    /// Key/value pairs in iteration order.
    Map(Vec<(Value<'a>, Value<'a>)>),
    /// A named record with named fields.
    Record(&'static str, Vec<(&'static str, Value<'a>)>),
    /// A live error, with its source chain reachable through `Error::source`.
    Error(&'a (dyn Error + 'static)),
}

impl<'a> Value<'a> {
    /// Build a record value from a name and `(field, value)` pairs.
    pub fn record<I>(name: &'static str, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Value<'a>)>,
    {
        Value::Record(name, fields.into_iter().collect())
    }

    /// The string slice, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The error, if this is an error value.
    pub fn as_error(&self) -> Option<&'a (dyn Error + 'static)> {
        match self {
            Value::Error(err) => Some(*err),
            _ => None,
        }
    }

    /// Whether this value belongs to one of the numeric families.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(..) | Value::Uint(..) | Value::Float(..))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value<'_>]) -> fmt::Result {
    f.write_str("[")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil("()") => f.write_str("()"),
            Value::Nil("null") => f.write_str("null"),
            Value::Nil(_) => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n, _) => write!(f, "{n}"),
            Value::Uint(n, _) => write!(f, "{n}"),
            Value::Float(n, _) => write!(f, "{n:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Handle(inner) => write!(f, "Some({inner})"),
            Value::Seq(items) | Value::Array(items) => write_list(f, items),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Record(name, fields) if fields.is_empty() => f.write_str(name),
            Value::Record(name, fields) => {
                write!(f, "{name} {{ ")?;
                for (idx, (field, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}: {value}")?;
                }
                f.write_str(" }")
            }
            Value::Error(err) => write!(f, "{err}"),
        }
    }
}
