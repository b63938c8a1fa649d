//! Literal values for document trees.
//!
//! [`Value`] is the owned, detached form of a subtree: it is what callers hand
//! to [`Document::new`](super::Document::new) and the `set` family, and what
//! comes back out of [`Node::to_value`](super::Node::to_value) and staticizing.
//! A `Value` never contains a node handle, so a node assigned into a tree is
//! always copied down to its payload first.
//!
//! [`Scalar`] is the closed set of leaf payloads. Integer inputs of any width
//! collapse into [`Scalar::Int`], with [`Scalar::Uint`] only for unsigned
//! values above `i64::MAX`. Floats become [`Scalar::Float`].

use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};

use super::TreeError;

/// Mapping type used for Group literals and staticized output.
pub type Map = HashMap<String, Value>;

/// The structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// String-keyed container
    Group,
    /// Ordered container
    Array,
    /// Scalar leaf, including the empty `Null` payload
    Value,
}

impl Kind {
    /// Returns the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Group => "group",
            Kind::Array => "array",
            Kind::Value => "value",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf payload of a tree node.
///
/// Integers compare by numeric value, so `Int(3) == Uint(3)`.
#[derive(Debug, Clone, Default)]
pub enum Scalar {
    /// No payload
    #[default]
    Null,
    Bool(bool),
    /// Any signed integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    Uint(u64),
    /// Any floating point number
    Float(f64),
    Char(char),
    /// UTF-8 text
    Text(String),
    /// Raw byte sequence
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Returns the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Uint(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Char(_) => "char",
            Scalar::Text(_) => "text",
            Scalar::Bytes(_) => "bytes",
        }
    }

    /// Returns true if there is no payload
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Uint(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Char(c) => write!(f, "{c}"),
            Scalar::Text(s) => write!(f, "{s}"),
            Scalar::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// An owned literal tree.
///
/// # Examples
///
/// ```
/// use arbor::{array, group, tree::{Kind, Value}};
///
/// let value = group! {
///     "name" => "Alice",
///     "tags" => array!["a", "b"],
///     "address" => group! { "city" => "Paris" },
/// };
/// assert_eq!(value.kind(), Kind::Group);
/// assert_eq!(value.as_group().unwrap()["name"], "Alice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Group(Map),
    Array(Vec<Value>),
    Scalar(Scalar),
}

impl Value {
    /// The empty payload
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    /// An empty Group
    pub fn group() -> Self {
        Value::Group(Map::new())
    }

    /// An empty Array
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Group(_) => Kind::Group,
            Value::Array(_) => Kind::Array,
            Value::Scalar(_) => Kind::Value,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Value::Group(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }

    /// Kind name for groups and arrays, variant name for scalars
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(scalar) => scalar.type_name(),
            other => other.kind().as_str(),
        }
    }

    pub fn as_group(&self) -> Option<&Map> {
        match self {
            Value::Group(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Group(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Group(map) => {
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Scalar(scalar) => write!(f, "{scalar}"),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value as $target)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
}

macro_rules! wide_unsigned_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    let value = value as u64;
                    match i64::try_from(value) {
                        Ok(n) => Scalar::Int(n),
                        Err(_) => Scalar::Uint(value),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

// Unsigned inputs that fit stay `Int`, the same shape decoding produces
wide_unsigned_from!(u64, usize);

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Uint(a), Scalar::Uint(b)) => a == b,
            (Scalar::Int(i), Scalar::Uint(u)) | (Scalar::Uint(u), Scalar::Int(i)) => {
                u64::try_from(*i).is_ok_and(|i| i == *u)
            }
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<char> for Scalar {
    fn from(value: char) -> Self {
        Scalar::Char(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Bytes(value)
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Scalar::Bytes(value.to_vec())
    }
}

impl From<()> for Scalar {
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Scalar(Scalar::Char(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Text(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Scalar(Scalar::Bytes(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Scalar(Scalar::Bytes(value.to_vec()))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::null()
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
    fn from(map: HashMap<String, V>) -> Self {
        Value::Group(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Value::null, Into::into)
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

fn mismatch(expected: &'static str, value: &Value) -> TreeError {
    TreeError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

impl TryFrom<&Value> for String {
    type Error = TreeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(scalar) => scalar.as_string(),
            _ => Err(mismatch("String", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = TreeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(scalar) => scalar.as_i64(),
            _ => Err(mismatch("i64", value)),
        }
    }
}

impl TryFrom<&Value> for u64 {
    type Error = TreeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(scalar) => scalar.as_u64(),
            _ => Err(mismatch("u64", value)),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = TreeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(scalar) => scalar.as_f64(),
            _ => Err(mismatch("f64", value)),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = TreeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(scalar) => scalar.as_bool(),
            _ => Err(mismatch("bool", value)),
        }
    }
}

// PartialEq implementations for comparing values with primitives
impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Scalar::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i64> for Scalar {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Scalar::Int(n) => n == other,
            Scalar::Uint(n) => i64::try_from(*n).is_ok_and(|n| n == *other),
            _ => false,
        }
    }
}

impl PartialEq<i32> for Scalar {
    fn eq(&self, other: &i32) -> bool {
        *self == i64::from(*other)
    }
}

impl PartialEq<f64> for Scalar {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Scalar::Float(x) if x == other)
    }
}

impl PartialEq<bool> for Scalar {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Scalar::Bool(b) if b == other)
    }
}

macro_rules! value_eq_via_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Value::Scalar(scalar) if scalar == other)
                }
            }

            impl PartialEq<Value> for $ty {
                fn eq(&self, other: &Value) -> bool {
                    other == self
                }
            }
        )*
    };
}

value_eq_via_scalar!(&str, i64, i32, f64, bool);

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Scalar(scalar) if scalar == other)
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(n) => serializer.serialize_i64(*n),
            Scalar::Uint(n) => serializer.serialize_u64(*n),
            Scalar::Float(x) => serializer.serialize_f64(*x),
            Scalar::Char(c) => serializer.serialize_char(*c),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Bytes(b) => serializer.serialize_bytes(b),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Group(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Array(items) => serializer.collect_seq(items),
            Value::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any self-describing value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        // Self-describing formats report every non-negative integer as u64
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_char<E>(self, v: char) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::null())
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::null())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Group(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Builds a Group [`Value`] from `key => value` pairs.
///
/// Values go through `Value::from`, so primitives, nested literals and
/// documents can be mixed freely.
#[macro_export]
macro_rules! group {
    () => {
        $crate::tree::Value::group()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::tree::Map::new();
        $(
            map.insert(::std::string::String::from($key), $crate::tree::Value::from($value));
        )+
        $crate::tree::Value::Group(map)
    }};
}

/// Builds an Array [`Value`] from a list of values.
#[macro_export]
macro_rules! array {
    () => {
        $crate::tree::Value::array()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::tree::Value::Array(::std::vec![$($crate::tree::Value::from($value)),+])
    };
}
