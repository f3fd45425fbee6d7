//! Kind-aware inspection of captured values: nil, zero, length, deep
//! equality and cross-family numeric comparison.

use std::cmp::Ordering;
use std::fmt;
use std::ptr;

use crate::value::Value;

/// Whether the value is the nil handle.
pub(crate) fn is_nil(value: &Value<'_>) -> bool {
    matches!(value, Value::Nil(_))
}

/// Whether the value is the zero value of its kind.
///
/// Present handles, sequences, maps and errors are never zero, so an empty
/// `Vec` is empty but not zero.
pub(crate) fn is_zero(value: &Value<'_>) -> bool {
    match value {
        Value::Nil(_) => true,
        Value::Bool(b) => !b,
        Value::Int(n, _) => *n == 0,
        Value::Uint(n, _) => *n == 0,
        // -0.0 has a non-zero bit pattern.
        Value::Float(n, _) => n.to_bits() == 0,
        Value::Char(c) => *c == '\0',
        Value::Str(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_zero),
        Value::Record(_, fields) => fields.iter().all(|(_, field)| is_zero(field)),
        Value::Handle(_) | Value::Seq(_) | Value::Map(_) | Value::Error(_) => false,
    }
}

/// Element count for collections, character count for strings, `None` for
/// anything that is not length-testable.
pub(crate) fn length(value: &Value<'_>) -> Option<usize> {
    match value {
        Value::Seq(items) | Value::Array(items) => Some(items.len()),
        Value::Map(entries) => Some(entries.len()),
        Value::Str(s) => Some(s.chars().count()),
        _ => None,
    }
}

fn all_equal(left: &[Value<'_>], right: &[Value<'_>]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| deep_equal(a, b))
}

/// Recursive structural equality.
///
/// Scalars must agree on concrete type as well as value, so `5u8` and `5i32`
/// differ. Maps compare without regard to iteration order.
pub(crate) fn deep_equal(left: &Value<'_>, right: &Value<'_>) -> bool {
    match (left, right) {
        (Value::Nil(a), Value::Nil(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a, ta), Value::Int(b, tb)) => ta == tb && a == b,
        (Value::Uint(a, ta), Value::Uint(b, tb)) => ta == tb && a == b,
        (Value::Float(a, ta), Value::Float(b, tb)) => ta == tb && a == b,
        (Value::Char(a), Value::Char(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Handle(a), Value::Handle(b)) => deep_equal(a, b),
        (Value::Seq(a), Value::Seq(b)) | (Value::Array(a), Value::Array(b)) => all_equal(a, b),
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.iter()
                        .any(|(other_key, other_value)| {
                            deep_equal(key, other_key) && deep_equal(value, other_value)
                        })
                })
        }
        (Value::Record(name_a, fields_a), Value::Record(name_b, fields_b)) => {
            name_a == name_b
                && fields_a.len() == fields_b.len()
                && fields_a
                    .iter()
                    .zip(fields_b)
                    .all(|((fa, va), (fb, vb))| fa == fb && deep_equal(va, vb))
        }
        (Value::Error(a), Value::Error(b)) => {
            ptr::addr_eq(*a, *b) || format!("{a:?}") == format!("{b:?}")
        }
        _ => false,
    }
}

/// An ordering relation checked by the comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl Comparison {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Greater => ordering == Ordering::Greater,
            Comparison::Less => ordering == Ordering::Less,
            Comparison::GreaterOrEqual => ordering != Ordering::Less,
            Comparison::LessOrEqual => ordering != Ordering::Greater,
        }
    }

    /// Predicate name used in non-comparable diagnostics.
    pub(crate) fn predicate(self) -> &'static str {
        match self {
            Comparison::Greater => "be_greater_than",
            Comparison::Less => "be_less_than",
            Comparison::GreaterOrEqual => "be_greater_than_or_equal_to",
            Comparison::LessOrEqual => "be_less_than_or_equal_to",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Greater => "greater than",
            Comparison::Less => "less than",
            Comparison::GreaterOrEqual => "greater than or equal to",
            Comparison::LessOrEqual => "less than or equal to",
        })
    }
}

fn widen(value: &Value<'_>) -> Option<f64> {
    match value {
        Value::Int(n, _) => Some(*n as f64),
        Value::Uint(n, _) => Some(*n as f64),
        Value::Float(n, _) => Some(*n),
        _ => None,
    }
}

/// Check `left <op> right`.
///
/// Values of the same concrete numeric type compare natively; values of
/// different numeric types compare after widening to `f64`. Returns `None`
/// when either side is not numeric. A NaN operand makes every relation false.
pub(crate) fn compare(left: &Value<'_>, right: &Value<'_>, op: Comparison) -> Option<bool> {
    let ordering = match (left, right) {
        (Value::Int(a, ta), Value::Int(b, tb)) if ta == tb => Some(a.cmp(b)),
        (Value::Uint(a, ta), Value::Uint(b, tb)) if ta == tb => Some(a.cmp(b)),
        (Value::Float(a, ta), Value::Float(b, tb)) if ta == tb => a.partial_cmp(b),
        _ => widen(left)?.partial_cmp(&widen(right)?),
    };
    Some(ordering.is_some_and(|ordering| op.holds(ordering)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::Capture;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Debug, thiserror::Error)]
    #[error("not found: {0}")]
    struct NotFound(&'static str);

    #[test]
    fn test_nil_only_for_absent_values() {
        assert!(is_nil(&().capture()));
        assert!(is_nil(&None::<i32>.capture()));
        assert!(!is_nil(&Some(0).capture()));
        assert!(!is_nil(&0.capture()));
        assert!(!is_nil(&"".capture()));
        assert!(!is_nil(&Vec::<i32>::new().capture()));
    }

    #[test]
    fn test_zero_values() {
        assert!(is_zero(&0.capture()));
        assert!(is_zero(&0.0f64.capture()));
        assert!(!is_zero(&(-0.0f64).capture()));
        assert!(is_zero(&false.capture()));
        assert!(is_zero(&'\0'.capture()));
        assert!(is_zero(&"".capture()));
        assert!(is_zero(&[0, 0].capture()));
        assert!(is_zero(&(0u8, "").capture()));
        assert!(is_zero(&None::<String>.capture()));

        assert!(!is_zero(&Some(0).capture()));
        assert!(!is_zero(&Vec::<i32>::new().capture()));
        assert!(!is_zero(&HashMap::<i32, i32>::new().capture()));
        assert!(!is_zero(&[0, 1].capture()));
    }

    #[test]
    fn test_zero_record() {
        let zero = Value::record("Limits", [("max", Value::Uint(0, "u32"))]);
        let set = Value::record("Limits", [("max", Value::Uint(3, "u32"))]);
        assert!(is_zero(&zero));
        assert!(!is_zero(&set));
    }

    #[test]
    fn test_length() {
        assert_eq!(length(&vec![1, 2, 3].capture()), Some(3));
        assert_eq!(length(&[1u8; 4].capture()), Some(4));
        assert_eq!(length(&"héllo".capture()), Some(5));
        let map: BTreeMap<i32, i32> = [(1, 1)].into_iter().collect();
        assert_eq!(length(&map.capture()), Some(1));

        assert_eq!(length(&None::<Vec<i32>>.capture()), None);
        assert_eq!(length(&Some(vec![1]).capture()), None);
        assert_eq!(length(&5.capture()), None);
    }

    #[test]
    fn test_deep_equal_scalars() {
        assert!(deep_equal(&5.capture(), &5.capture()));
        assert!(!deep_equal(&5i32.capture(), &5i64.capture()));
        assert!(!deep_equal(&5u8.capture(), &5i8.capture()));
        assert!(deep_equal(&"a".capture(), &String::from("a").capture()));
        assert!(!deep_equal(&f64::NAN.capture(), &f64::NAN.capture()));
        assert!(!deep_equal(&'a'.capture(), &"a".capture()));
    }

    #[test]
    fn test_deep_equal_nil_shapes() {
        assert!(deep_equal(&().capture(), &().capture()));
        assert!(deep_equal(&None::<i32>.capture(), &None::<i32>.capture()));
        assert!(!deep_equal(&None::<i32>.capture(), &None::<u8>.capture()));
        assert!(!deep_equal(&None::<i32>.capture(), &().capture()));
    }

    #[test]
    fn test_deep_equal_containers() {
        assert!(deep_equal(&vec![1, 2].capture(), &vec![1, 2].capture()));
        assert!(!deep_equal(&vec![1, 2].capture(), &vec![2, 1].capture()));
        assert!(!deep_equal(&vec![1, 2].capture(), &[1, 2].capture()));
        assert!(deep_equal(&Some(vec![1]).capture(), &Some(vec![1]).capture()));

        let a: HashMap<&str, Vec<i32>> = [("x", vec![1]), ("y", vec![2])].into_iter().collect();
        let b: BTreeMap<&str, Vec<i32>> = [("y", vec![2]), ("x", vec![1])].into_iter().collect();
        assert!(deep_equal(&a.capture(), &b.capture()));

        let c: BTreeMap<&str, Vec<i32>> = [("x", vec![1])].into_iter().collect();
        assert!(!deep_equal(&a.capture(), &c.capture()));
    }

    #[test]
    fn test_deep_equal_records() {
        let a = Value::record("Point", [("x", Value::Int(1, "i32"))]);
        let b = Value::record("Point", [("x", Value::Int(1, "i32"))]);
        let c = Value::record("Pair", [("x", Value::Int(1, "i32"))]);
        assert!(deep_equal(&a, &b));
        assert!(!deep_equal(&a, &c));
    }

    #[test]
    fn test_deep_equal_errors() {
        let err = NotFound("user");
        let same = NotFound("user");
        let other = NotFound("group");
        assert!(deep_equal(&Value::Error(&err), &Value::Error(&err)));
        assert!(deep_equal(&Value::Error(&err), &Value::Error(&same)));
        assert!(!deep_equal(&Value::Error(&err), &Value::Error(&other)));
    }

    #[test]
    fn test_compare_same_type() {
        assert_eq!(compare(&10.capture(), &9.capture(), Comparison::Greater), Some(true));
        assert_eq!(compare(&9.capture(), &9.capture(), Comparison::Greater), Some(false));
        assert_eq!(compare(&9.capture(), &9.capture(), Comparison::GreaterOrEqual), Some(true));
        assert_eq!(compare(&u128::MAX.capture(), &(u128::MAX - 1).capture(), Comparison::Greater), Some(true));
    }

    #[test]
    fn test_compare_widens_mixed_numeric() {
        assert_eq!(compare(&10.capture(), &9.5.capture(), Comparison::Greater), Some(true));
        assert_eq!(compare(&10u8.capture(), &(-1i64).capture(), Comparison::Less), Some(false));
        assert_eq!(compare(&2.5f32.capture(), &3u16.capture(), Comparison::LessOrEqual), Some(true));
    }

    #[test]
    fn test_compare_rejects_non_numeric() {
        assert_eq!(compare(&"10".capture(), &9.capture(), Comparison::Greater), None);
        assert_eq!(compare(&'a'.capture(), &'b'.capture(), Comparison::Less), None);
        assert_eq!(compare(&Some(1).capture(), &0.capture(), Comparison::Greater), None);
    }

    #[test]
    fn test_compare_nan_is_never_ordered() {
        for op in [
            Comparison::Greater,
            Comparison::Less,
            Comparison::GreaterOrEqual,
            Comparison::LessOrEqual,
        ] {
            assert_eq!(compare(&f64::NAN.capture(), &1.0.capture(), op), Some(false));
        }
    }
}
