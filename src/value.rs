/// A non-NULL column value of a binary resultset row
///
/// Each variant corresponds to one host representation the binary protocol can carry.
/// Integer variants keep the width of the wire type they came from so that re-encoding
/// writes the same number of bytes.
#[derive(Debug, Clone)]
pub enum Value {
    /// TINYINT
    I8(i8),
    /// TINYINT UNSIGNED
    U8(u8),
    /// SMALLINT, YEAR
    I16(i16),
    /// SMALLINT UNSIGNED, YEAR
    U16(u16),
    /// INT
    I32(i32),
    /// INT UNSIGNED
    U32(u32),
    /// BIGINT
    I64(i64),
    /// BIGINT UNSIGNED
    U64(u64),
    /// FLOAT - 4-byte floating point
    Float(f32),
    /// DOUBLE - 8-byte floating point
    Double(f64),
    /// STRING, VARCHAR, VAR_STRING, BLOB family, JSON
    Text(String),
    /// String-family payload that is not valid UTF-8
    Bytes(Vec<u8>),
    /// DATE, rendered as `YYYY-MM-DD`
    Date(String),
    /// DATETIME/TIMESTAMP, rendered as `YYYY-MM-DD HH:MM:SS[.FFFFFF]`
    Datetime(String),
    /// TIME, rendered as `[-]D HH:MM:SS.FFFFFF`
    Time(String),
    /// DATE/DATETIME/TIMESTAMP/TIME sent with length 0 (`0000-00-00`, `00:00:00`)
    ZeroTemporal,
}

impl Value {
    /// A zero date/datetime/time carries no data and compares like SQL NULL
    pub fn is_null_equivalent(&self) -> bool {
        matches!(self, Value::ZeroTemporal)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(i64::from(v)),
            Value::U8(v) => Some(i64::from(v)),
            Value::I16(v) => Some(i64::from(v)),
            Value::U16(v) => Some(i64::from(v)),
            Value::I32(v) => Some(i64::from(v)),
            Value::U32(v) => Some(i64::from(v)),
            Value::I64(v) => Some(v),
            Value::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(u64::from(v)),
            Value::U16(v) => Some(u64::from(v)),
            Value::U32(v) => Some(u64::from(v)),
            Value::U64(v) => Some(v),
            Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
                self.as_i64().and_then(|v| u64::try_from(v).ok())
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(f64::from(v)),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Text of string-family and temporal values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Date(s) | Value::Datetime(s) | Value::Time(s) => Some(s),
            _ => None,
        }
    }

    /// Raw payload of string-family values
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(s) => Some(s.as_bytes()),
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// Floats compare by bit pattern (NaN == NaN, 0.0 != -0.0).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Datetime(a), Value::Datetime(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::ZeroTemporal, Value::ZeroTemporal) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => Float,
    f64 => Double,
    String => Text,
    Vec<u8> => Bytes,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}
