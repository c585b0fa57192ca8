use crate::constant::{ColumnFlags, ColumnType};
use crate::error::{Error, Result};

/// Column definition consumed by the row codec
///
/// Supplied by the column-metadata decoder before any row of the result set is processed,
/// and immutable for the lifetime of that result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    pub flags: ColumnFlags,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType, flags: ColumnFlags) -> Self {
        Self {
            name: name.into(),
            column_type,
            flags,
        }
    }

    /// Build from the raw `type` and `flags` fields of a ColumnDefinition41 packet
    pub fn from_wire(name: impl Into<String>, column_type: u8, flags: u16) -> Result<Self> {
        let column_type =
            ColumnType::from_u8(column_type).ok_or(Error::UnsupportedColumnType(column_type))?;
        Ok(Self::new(name, column_type, ColumnFlags::from_bits_retain(flags)))
    }

    pub fn is_unsigned(&self) -> bool {
        self.flags.contains(ColumnFlags::UNSIGNED_FLAG)
    }
}
