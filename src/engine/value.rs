use std::fmt;

/// The closed set of kinds a parameter slot can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    String,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ValueKind {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ValueKind::Bool | ValueKind::String)
    }

    /// Whether a value of kind `from` may be bound to a slot of this kind.
    pub fn accepts(self, from: ValueKind) -> bool {
        self == from || (self.is_numeric() && from.is_numeric())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// A runtime value: a literal, a variable's content, a bound parameter or a
/// command result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

// A numeric value widened to a type that holds every source exactly.
#[derive(Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

// Integers must fit the target. Floats round half to even first, and a
// result outside the target's range does not convert.
macro_rules! to_int {
    ($n:expr, $ty:ty) => {
        match $n {
            Numeric::Int(i) => <$ty>::try_from(i).ok(),
            Numeric::Float(f) => {
                let r = f.round_ties_even();
                if r.is_finite() && r.abs() < 1e38 {
                    <$ty>::try_from(r as i128).ok()
                } else {
                    None
                }
            }
        }
    };
}

macro_rules! to_float {
    ($n:expr, $ty:ty) => {
        match $n {
            Numeric::Int(i) => i as $ty,
            Numeric::Float(f) => f as $ty,
        }
    };
}

impl Value {
    /// Kind of this value, `None` for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts this value to `kind` following the coercion table: an exact
    /// kind match passes through, numeric kinds convert into each other when
    /// the value fits the target, and nothing else converts.
    pub fn coerce(&self, kind: ValueKind) -> Option<Value> {
        let from = self.kind()?;
        if from == kind {
            return Some(self.clone());
        }
        if !kind.accepts(from) {
            return None;
        }
        let n = self.numeric()?;
        Some(match kind {
            ValueKind::I8 => Value::I8(to_int!(n, i8)?),
            ValueKind::I16 => Value::I16(to_int!(n, i16)?),
            ValueKind::I32 => Value::I32(to_int!(n, i32)?),
            ValueKind::I64 => Value::I64(to_int!(n, i64)?),
            ValueKind::U8 => Value::U8(to_int!(n, u8)?),
            ValueKind::U16 => Value::U16(to_int!(n, u16)?),
            ValueKind::U32 => Value::U32(to_int!(n, u32)?),
            ValueKind::U64 => Value::U64(to_int!(n, u64)?),
            ValueKind::F32 => Value::F32(to_float!(n, f32)),
            ValueKind::F64 => Value::F64(to_float!(n, f64)),
            ValueKind::Bool | ValueKind::String => return None,
        })
    }

    fn numeric(&self) -> Option<Numeric> {
        Some(match self {
            Value::I8(n) => Numeric::Int(i128::from(*n)),
            Value::I16(n) => Numeric::Int(i128::from(*n)),
            Value::I32(n) => Numeric::Int(i128::from(*n)),
            Value::I64(n) => Numeric::Int(i128::from(*n)),
            Value::U8(n) => Numeric::Int(i128::from(*n)),
            Value::U16(n) => Numeric::Int(i128::from(*n)),
            Value::U32(n) => Numeric::Int(i128::from(*n)),
            Value::U64(n) => Numeric::Int(i128::from(*n)),
            Value::F32(n) => Numeric::Float(f64::from(*n)),
            Value::F64(n) => Numeric::Float(*n),
            _ => return None,
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.numeric().map(|n| to_float!(n, f64))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::U8(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A Rust field type that can back a command parameter.
pub trait ParamValue: Clone + 'static {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    /// Extracts the field value; `value` has already been coerced to `KIND`.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! param_value {
    ($ty:ty, $kind:ident) => {
        impl ParamValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

param_value!(bool, Bool);
param_value!(String, String);
param_value!(i8, I8);
param_value!(i16, I16);
param_value!(i32, I32);
param_value!(i64, I64);
param_value!(u8, U8);
param_value!(u16, U16);
param_value!(u32, U32);
param_value!(u64, U64);
param_value!(f32, F32);
param_value!(f64, F64);
