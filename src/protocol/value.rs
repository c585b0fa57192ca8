//! Per-column binary value codec.

use simdutf8::basic::from_utf8;

use crate::col::ColumnDefinition;
use crate::constant::ColumnType;
use crate::error::{Error, Result};
use crate::opts::{CodecOpts, FractionalSeconds};
use crate::protocol::primitive::*;
use crate::protocol::temporal::{self, Date, DateTime, Time};
use crate::value::Value;

/// Decode a single non-NULL binary protocol value
///
/// Returns the value and the number of bytes it occupied.
/// A fixed-width value that does not fit in `data` fails with `Error::MalformedValue`
/// and consumes nothing.
pub fn decode_value(col: &ColumnDefinition, data: &[u8]) -> Result<(Value, usize)> {
    let is_unsigned = col.is_unsigned();
    let column_type = col.column_type;
    let malformed = |_: Error| Error::MalformedValue(column_type.kind_name());

    let (value, rest) = match column_type {
        ColumnType::MYSQL_TYPE_TINY => {
            let (val, rest) = read_int_1(data).map_err(malformed)?;
            let value = if is_unsigned {
                Value::U8(val)
            } else {
                Value::I8(val as i8)
            };
            (value, rest)
        }

        ColumnType::MYSQL_TYPE_SHORT | ColumnType::MYSQL_TYPE_YEAR => {
            let (val, rest) = read_int_2(data).map_err(malformed)?;
            let value = if is_unsigned {
                Value::U16(val)
            } else {
                Value::I16(val as i16)
            };
            (value, rest)
        }

        ColumnType::MYSQL_TYPE_LONG => {
            let (val, rest) = read_int_4(data).map_err(malformed)?;
            let value = if is_unsigned {
                Value::U32(val)
            } else {
                Value::I32(val as i32)
            };
            (value, rest)
        }

        ColumnType::MYSQL_TYPE_LONGLONG => {
            let (val, rest) = read_int_8(data).map_err(malformed)?;
            let value = if is_unsigned {
                Value::U64(val)
            } else {
                Value::I64(val as i64)
            };
            (value, rest)
        }

        // IEEE-754 bit patterns, not numeric conversions
        ColumnType::MYSQL_TYPE_FLOAT => {
            let (val, rest) = read_int_4(data).map_err(malformed)?;
            (Value::Float(f32::from_bits(val)), rest)
        }

        ColumnType::MYSQL_TYPE_DOUBLE => {
            let (val, rest) = read_int_8(data).map_err(malformed)?;
            (Value::Double(f64::from_bits(val)), rest)
        }

        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
            let (date, rest) = temporal::read_date(data).map_err(malformed)?;
            let value = date.map_or(Value::ZeroTemporal, |date| Value::Date(date.to_string()));
            (value, rest)
        }

        ColumnType::MYSQL_TYPE_TIMESTAMP | ColumnType::MYSQL_TYPE_DATETIME => {
            let (datetime, rest) = temporal::read_datetime(data).map_err(malformed)?;
            let value = datetime.map_or(Value::ZeroTemporal, |datetime| {
                Value::Datetime(datetime.to_string())
            });
            (value, rest)
        }

        ColumnType::MYSQL_TYPE_TIME => {
            let (time, rest) = temporal::read_time(data).map_err(malformed)?;
            let value = time.map_or(Value::ZeroTemporal, |time| Value::Time(time.to_string()));
            (value, rest)
        }

        ty if ty.is_string_family() => {
            let (bytes, rest) = read_string_lenenc(data)?;
            let value = match from_utf8(bytes) {
                Ok(text) => Value::Text(text.to_string()),
                Err(_) => Value::Bytes(bytes.to_vec()),
            };
            (value, rest)
        }

        ty => return Err(Error::UnsupportedColumnType(ty as u8)),
    };

    Ok((value, data.len() - rest.len()))
}

/// Encode a single non-NULL value in the binary protocol format of `col`
///
/// The value must match the column's declared type. Integer columns accept either the
/// signed or the unsigned variant of their width.
pub fn encode_value(
    col: &ColumnDefinition,
    value: &Value,
    opts: &CodecOpts,
    out: &mut Vec<u8>,
) -> Result<()> {
    let keep_fraction = opts.fractional_seconds == FractionalSeconds::Preserve;

    match col.column_type {
        ColumnType::MYSQL_TYPE_TINY => {
            let val = match *value {
                Value::I8(v) => v as u8,
                Value::U8(v) => v,
                _ => return Err(Error::InvalidValueType("tiny")),
            };
            write_int_1(out, val);
        }

        ColumnType::MYSQL_TYPE_SHORT | ColumnType::MYSQL_TYPE_YEAR => {
            let val = match *value {
                Value::I16(v) => v as u16,
                Value::U16(v) => v,
                _ => return Err(Error::InvalidValueType("short")),
            };
            write_int_2(out, val);
        }

        ColumnType::MYSQL_TYPE_LONG => {
            let val = match *value {
                Value::I32(v) => v as u32,
                Value::U32(v) => v,
                _ => return Err(Error::InvalidValueType("long")),
            };
            write_int_4(out, val);
        }

        ColumnType::MYSQL_TYPE_LONGLONG => {
            let val = match *value {
                Value::I64(v) => v as u64,
                Value::U64(v) => v,
                _ => return Err(Error::InvalidValueType("long long")),
            };
            write_int_8(out, val);
        }

        ColumnType::MYSQL_TYPE_FLOAT => match *value {
            Value::Float(v) => write_int_4(out, v.to_bits()),
            _ => return Err(Error::InvalidValueType("float")),
        },

        ColumnType::MYSQL_TYPE_DOUBLE => match *value {
            Value::Double(v) => write_int_8(out, v.to_bits()),
            _ => return Err(Error::InvalidValueType("double")),
        },

        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => match value {
            Value::Date(text) => temporal::write_date(out, &text.parse::<Date>()?),
            Value::ZeroTemporal => temporal::write_zero(out),
            _ => return Err(Error::InvalidValueType("date")),
        },

        ColumnType::MYSQL_TYPE_TIMESTAMP | ColumnType::MYSQL_TYPE_DATETIME => match value {
            Value::Datetime(text) => {
                temporal::write_datetime(out, &text.parse::<DateTime>()?, keep_fraction)
            }
            Value::ZeroTemporal => temporal::write_zero(out),
            _ => return Err(Error::InvalidValueType("datetime")),
        },

        ColumnType::MYSQL_TYPE_TIME => match value {
            Value::Time(text) => temporal::write_time(out, &text.parse::<Time>()?, keep_fraction),
            Value::ZeroTemporal => temporal::write_zero(out),
            _ => return Err(Error::InvalidValueType("time")),
        },

        ty if ty.is_string_family() => match value {
            Value::Text(text) => write_string_lenenc(out, text),
            Value::Bytes(bytes) => write_bytes_lenenc(out, bytes),
            _ => return Err(Error::InvalidValueType("string")),
        },

        ty => return Err(Error::UnsupportedColumnType(ty as u8)),
    }
    Ok(())
}
