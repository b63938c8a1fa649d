//! Scalar conversions.
//!
//! Numbers convert to any other numeric type with `as` semantics: integers
//! wrap or truncate, floats saturate when cast to integers. A `char` counts as
//! its code point. Text, bytes and chars convert into each other through UTF-8.
//! Everything else fails with [`TreeError::TypeMismatch`].

use super::{Node, NodeMut, Scalar, TreeError};

enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Scalar {
    fn mismatch(&self, expected: &'static str) -> TreeError {
        TreeError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    fn number(&self, expected: &'static str) -> Result<Number, TreeError> {
        match self {
            Scalar::Int(n) => Ok(Number::Signed(*n)),
            Scalar::Uint(n) => Ok(Number::Unsigned(*n)),
            Scalar::Float(x) => Ok(Number::Float(*x)),
            Scalar::Char(c) => Ok(Number::Unsigned(u64::from(*c))),
            _ => Err(self.mismatch(expected)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, TreeError> {
        match self {
            Scalar::Bool(b) => Ok(*b),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// Borrows text content. Bytes are accepted when they are valid UTF-8.
    pub fn as_str(&self) -> Result<&str, TreeError> {
        match self {
            Scalar::Text(s) => Ok(s),
            Scalar::Bytes(b) => std::str::from_utf8(b).map_err(|_| self.mismatch("str")),
            _ => Err(self.mismatch("str")),
        }
    }

    pub fn as_string(&self) -> Result<String, TreeError> {
        match self {
            Scalar::Char(c) => Ok(c.to_string()),
            _ => self.as_str().map(str::to_string).map_err(|_| self.mismatch("String")),
        }
    }

    pub fn as_bytes(&self) -> Result<Vec<u8>, TreeError> {
        match self {
            Scalar::Bytes(b) => Ok(b.clone()),
            Scalar::Text(s) => Ok(s.as_bytes().to_vec()),
            Scalar::Char(c) => Ok(c.to_string().into_bytes()),
            _ => Err(self.mismatch("bytes")),
        }
    }

    pub fn as_chars(&self) -> Result<Vec<char>, TreeError> {
        match self {
            Scalar::Char(c) => Ok(vec![*c]),
            _ => self
                .as_str()
                .map(|s| s.chars().collect())
                .map_err(|_| self.mismatch("chars")),
        }
    }

    /// A char, a valid code point, or text holding exactly one char.
    pub fn as_char(&self) -> Result<char, TreeError> {
        match self {
            Scalar::Char(c) => Ok(*c),
            Scalar::Int(_) | Scalar::Uint(_) => {
                let code = match self.number("char")? {
                    Number::Signed(n) => u32::try_from(n).ok(),
                    Number::Unsigned(n) => u32::try_from(n).ok(),
                    Number::Float(_) => None,
                };
                code.and_then(char::from_u32)
                    .ok_or_else(|| self.mismatch("char"))
            }
            _ => {
                let text = self.as_str().map_err(|_| self.mismatch("char"))?;
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(self.mismatch("char")),
                }
            }
        }
    }
}

macro_rules! numeric_accessors {
    ($($name:ident => $ty:ty),* $(,)?) => {
        impl Scalar {
            $(
                pub fn $name(&self) -> Result<$ty, TreeError> {
                    Ok(match self.number(stringify!($ty))? {
                        Number::Signed(n) => n as $ty,
                        Number::Unsigned(n) => n as $ty,
                        Number::Float(x) => x as $ty,
                    })
                }
            )*
        }

        impl Node<'_> {
            $(
                pub fn $name(&self) -> Result<$ty, TreeError> {
                    self.leaf(stringify!($ty))?.$name()
                }
            )*
        }
    };
}

numeric_accessors! {
    as_i8 => i8,
    as_i16 => i16,
    as_i32 => i32,
    as_i64 => i64,
    as_isize => isize,
    as_u8 => u8,
    as_u16 => u16,
    as_u32 => u32,
    as_u64 => u64,
    as_usize => usize,
    as_f32 => f32,
    as_f64 => f64,
}

impl<'a> Node<'a> {
    fn leaf(&self, expected: &'static str) -> Result<&'a Scalar, TreeError> {
        self.scalar().ok_or_else(|| TreeError::TypeMismatch {
            expected,
            actual: self.kind().as_str(),
        })
    }

    pub fn as_bool(&self) -> Result<bool, TreeError> {
        self.leaf("bool")?.as_bool()
    }

    pub fn as_char(&self) -> Result<char, TreeError> {
        self.leaf("char")?.as_char()
    }

    /// Borrows the text of this node for as long as the document is borrowed.
    pub fn as_str(&self) -> Result<&'a str, TreeError> {
        self.leaf("str")?.as_str()
    }

    pub fn as_string(&self) -> Result<String, TreeError> {
        self.leaf("String")?.as_string()
    }

    pub fn as_bytes(&self) -> Result<Vec<u8>, TreeError> {
        self.leaf("bytes")?.as_bytes()
    }

    pub fn as_chars(&self) -> Result<Vec<char>, TreeError> {
        self.leaf("chars")?.as_chars()
    }
}

impl NodeMut<'_> {
    pub fn as_string(&self) -> Result<String, TreeError> {
        self.as_node().as_string()
    }

    pub fn as_i64(&self) -> Result<i64, TreeError> {
        self.as_node().as_i64()
    }

    pub fn as_f64(&self) -> Result<f64, TreeError> {
        self.as_node().as_f64()
    }

    pub fn as_bool(&self) -> Result<bool, TreeError> {
        self.as_node().as_bool()
    }
}
