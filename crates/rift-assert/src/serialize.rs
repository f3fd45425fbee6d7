//! A `serde::Serializer` that builds [`Value`] trees directly.
//!
//! Structs keep their name and fields as [`Value::Record`], tuples become
//! arrays, and every primitive keeps its concrete type name, so a serialized
//! struct behaves like a hand-written [`Capture`](crate::Capture) impl.

use std::borrow::Cow;
use std::fmt;

use serde::ser::{self, Serialize};

use crate::value::Value;

/// Failure reported by a `Serialize` impl while capturing.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SerializeError(String);

impl ser::Error for SerializeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        SerializeError(msg.to_string())
    }
}

type Result<T> = std::result::Result<T, SerializeError>;

/// Names for positional fields of tuple structs and tuple variants.
const POSITIONS: [&str; 16] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15",
];

/// Name positional fields when there are few enough to name; wider tuples
/// fall back to a plain array.
fn positional(name: &'static str, items: Vec<Value<'static>>) -> Value<'static> {
    if items.len() > POSITIONS.len() {
        return Value::Array(items);
    }
    Value::Record(name, POSITIONS.iter().copied().zip(items).collect())
}

pub(crate) fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value<'static>> {
    value.serialize(ValueSerializer)
}

pub(crate) struct ValueSerializer;

enum Shape {
    Seq,
    Array,
    Record(&'static str),
}

pub(crate) struct SerializeItems {
    shape: Shape,
    items: Vec<Value<'static>>,
}

impl SerializeItems {
    fn new(shape: Shape, len: Option<usize>) -> Self {
        SerializeItems {
            shape,
            items: Vec::with_capacity(len.unwrap_or(0)),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value<'static> {
        match self.shape {
            Shape::Seq => Value::Seq(self.items),
            Shape::Array => Value::Array(self.items),
            Shape::Record(name) => positional(name, self.items),
        }
    }
}

pub(crate) struct SerializeEntries {
    entries: Vec<(Value<'static>, Value<'static>)>,
    key: Option<Value<'static>>,
}

pub(crate) struct SerializeFields {
    name: &'static str,
    fields: Vec<(&'static str, Value<'static>)>,
}

impl SerializeFields {
    fn push<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.push((key, to_value(value)?));
        Ok(())
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value<'static>;
    type Error = SerializeError;
    type SerializeSeq = SerializeItems;
    type SerializeTuple = SerializeItems;
    type SerializeTupleStruct = SerializeItems;
    type SerializeTupleVariant = SerializeItems;
    type SerializeMap = SerializeEntries;
    type SerializeStruct = SerializeFields;
    type SerializeStructVariant = SerializeFields;

    fn serialize_bool(self, v: bool) -> Result<Value<'static>> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value<'static>> {
        Ok(Value::Int(i128::from(v), "i8"))
    }

    fn serialize_i16(self, v: i16) -> Result<Value<'static>> {
        Ok(Value::Int(i128::from(v), "i16"))
    }

    fn serialize_i32(self, v: i32) -> Result<Value<'static>> {
        Ok(Value::Int(i128::from(v), "i32"))
    }

    fn serialize_i64(self, v: i64) -> Result<Value<'static>> {
        Ok(Value::Int(i128::from(v), "i64"))
    }

    fn serialize_i128(self, v: i128) -> Result<Value<'static>> {
        Ok(Value::Int(v, "i128"))
    }

    fn serialize_u8(self, v: u8) -> Result<Value<'static>> {
        Ok(Value::Uint(u128::from(v), "u8"))
    }

    fn serialize_u16(self, v: u16) -> Result<Value<'static>> {
        Ok(Value::Uint(u128::from(v), "u16"))
    }

    fn serialize_u32(self, v: u32) -> Result<Value<'static>> {
        Ok(Value::Uint(u128::from(v), "u32"))
    }

    fn serialize_u64(self, v: u64) -> Result<Value<'static>> {
        Ok(Value::Uint(u128::from(v), "u64"))
    }

    fn serialize_u128(self, v: u128) -> Result<Value<'static>> {
        Ok(Value::Uint(v, "u128"))
    }

    fn serialize_f32(self, v: f32) -> Result<Value<'static>> {
        Ok(Value::Float(f64::from(v), "f32"))
    }

    fn serialize_f64(self, v: f64) -> Result<Value<'static>> {
        Ok(Value::Float(v, "f64"))
    }

    fn serialize_char(self, v: char) -> Result<Value<'static>> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value<'static>> {
        Ok(Value::Str(Cow::Owned(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value<'static>> {
        Ok(Value::Seq(
            v.iter().map(|b| Value::Uint(u128::from(*b), "u8")).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value<'static>> {
        Ok(Value::Nil("Option"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value<'static>>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Handle(Box::new(to_value(value)?)))
    }

    fn serialize_unit(self) -> Result<Value<'static>> {
        Ok(Value::Nil("()"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value<'static>> {
        Ok(Value::Record(name, Vec::new()))
    }

    // Unit variants render as their name, the way serde's data formats spell them.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value<'static>> {
        Ok(Value::Str(Cow::Borrowed(variant)))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value<'static>>
    where
        T: ?Sized + Serialize,
    {
        Ok(positional(name, vec![to_value(value)?]))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value<'static>>
    where
        T: ?Sized + Serialize,
    {
        Ok(positional(variant, vec![to_value(value)?]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeItems> {
        Ok(SerializeItems::new(Shape::Seq, len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeItems> {
        Ok(SerializeItems::new(Shape::Array, Some(len)))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> Result<SerializeItems> {
        Ok(SerializeItems::new(Shape::Record(name), Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeItems> {
        Ok(SerializeItems::new(Shape::Record(variant), Some(len)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeEntries> {
        Ok(SerializeEntries {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeFields> {
        Ok(SerializeFields {
            name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeFields> {
        Ok(SerializeFields {
            name: variant,
            fields: Vec::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeItems {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeItems {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeItems {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeItems {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeEntries {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| <SerializeError as ser::Error>::custom("map value without a key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(Value::Map(self.entries))
    }
}

impl ser::SerializeStruct for SerializeFields {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(Value::Record(self.name, self.fields))
    }
}

impl ser::SerializeStructVariant for SerializeFields {
    type Ok = Value<'static>;
    type Error = SerializeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Value<'static>> {
        Ok(Value::Record(self.name, self.fields))
    }
}
