/// First payload byte of every binary resultset row
pub const ROW_MARKER: u8 = 0x00;

/// Size of the packet header that precedes each row payload
pub const PACKET_HEADER_LEN: usize = 4;

/// Reserved leading bits of the NULL bitmap in a binary resultset row
pub const RESULT_SET_NULL_BITMAP_OFFSET: usize = 2;

bitflags::bitflags! {
    /// Column definition flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColumnFlags: u16 {
        const NOT_NULL_FLAG = 0x0001;
        const PRI_KEY_FLAG = 0x0002;
        const UNIQUE_KEY_FLAG = 0x0004;
        const MULTIPLE_KEY_FLAG = 0x0008;
        const BLOB_FLAG = 0x0010;
        const UNSIGNED_FLAG = 0x0020;
        const ZEROFILL_FLAG = 0x0040;
        const BINARY_FLAG = 0x0080;
        const ENUM_FLAG = 0x0100;
        const AUTO_INCREMENT_FLAG = 0x0200;
        const TIMESTAMP_FLAG = 0x0400;
        const SET_FLAG = 0x0800;
        const NO_DEFAULT_VALUE_FLAG = 0x1000;
        const ON_UPDATE_NOW_FLAG = 0x2000;
        const PART_KEY_FLAG = 0x4000;
        const NUM_FLAG = 0x8000;
    }
}

/// MySQL column types
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    MYSQL_TYPE_DECIMAL = 0x00,
    MYSQL_TYPE_TINY = 0x01,
    MYSQL_TYPE_SHORT = 0x02,
    MYSQL_TYPE_LONG = 0x03,
    MYSQL_TYPE_FLOAT = 0x04,
    MYSQL_TYPE_DOUBLE = 0x05,
    MYSQL_TYPE_NULL = 0x06,
    MYSQL_TYPE_TIMESTAMP = 0x07,
    MYSQL_TYPE_LONGLONG = 0x08,
    MYSQL_TYPE_INT24 = 0x09,
    MYSQL_TYPE_DATE = 0x0a,
    MYSQL_TYPE_TIME = 0x0b,
    MYSQL_TYPE_DATETIME = 0x0c,
    MYSQL_TYPE_YEAR = 0x0d,
    MYSQL_TYPE_NEWDATE = 0x0e,
    MYSQL_TYPE_VARCHAR = 0x0f,
    MYSQL_TYPE_BIT = 0x10,
    MYSQL_TYPE_TIMESTAMP2 = 0x11,
    MYSQL_TYPE_DATETIME2 = 0x12,
    MYSQL_TYPE_TIME2 = 0x13,
    MYSQL_TYPE_TYPED_ARRAY = 0x14,
    MYSQL_TYPE_JSON = 0xf5,
    MYSQL_TYPE_NEWDECIMAL = 0xf6,
    MYSQL_TYPE_ENUM = 0xf7,
    MYSQL_TYPE_SET = 0xf8,
    MYSQL_TYPE_TINY_BLOB = 0xf9,
    MYSQL_TYPE_MEDIUM_BLOB = 0xfa,
    MYSQL_TYPE_LONG_BLOB = 0xfb,
    MYSQL_TYPE_BLOB = 0xfc,
    MYSQL_TYPE_VAR_STRING = 0xfd,
    MYSQL_TYPE_STRING = 0xfe,
    MYSQL_TYPE_GEOMETRY = 0xff,
}

impl ColumnType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::MYSQL_TYPE_DECIMAL),
            0x01 => Some(Self::MYSQL_TYPE_TINY),
            0x02 => Some(Self::MYSQL_TYPE_SHORT),
            0x03 => Some(Self::MYSQL_TYPE_LONG),
            0x04 => Some(Self::MYSQL_TYPE_FLOAT),
            0x05 => Some(Self::MYSQL_TYPE_DOUBLE),
            0x06 => Some(Self::MYSQL_TYPE_NULL),
            0x07 => Some(Self::MYSQL_TYPE_TIMESTAMP),
            0x08 => Some(Self::MYSQL_TYPE_LONGLONG),
            0x09 => Some(Self::MYSQL_TYPE_INT24),
            0x0a => Some(Self::MYSQL_TYPE_DATE),
            0x0b => Some(Self::MYSQL_TYPE_TIME),
            0x0c => Some(Self::MYSQL_TYPE_DATETIME),
            0x0d => Some(Self::MYSQL_TYPE_YEAR),
            0x0e => Some(Self::MYSQL_TYPE_NEWDATE),
            0x0f => Some(Self::MYSQL_TYPE_VARCHAR),
            0x10 => Some(Self::MYSQL_TYPE_BIT),
            0x11 => Some(Self::MYSQL_TYPE_TIMESTAMP2),
            0x12 => Some(Self::MYSQL_TYPE_DATETIME2),
            0x13 => Some(Self::MYSQL_TYPE_TIME2),
            0x14 => Some(Self::MYSQL_TYPE_TYPED_ARRAY),
            0xf5 => Some(Self::MYSQL_TYPE_JSON),
            0xf6 => Some(Self::MYSQL_TYPE_NEWDECIMAL),
            0xf7 => Some(Self::MYSQL_TYPE_ENUM),
            0xf8 => Some(Self::MYSQL_TYPE_SET),
            0xf9 => Some(Self::MYSQL_TYPE_TINY_BLOB),
            0xfa => Some(Self::MYSQL_TYPE_MEDIUM_BLOB),
            0xfb => Some(Self::MYSQL_TYPE_LONG_BLOB),
            0xfc => Some(Self::MYSQL_TYPE_BLOB),
            0xfd => Some(Self::MYSQL_TYPE_VAR_STRING),
            0xfe => Some(Self::MYSQL_TYPE_STRING),
            0xff => Some(Self::MYSQL_TYPE_GEOMETRY),
            _ => None,
        }
    }

    /// Short name used in codec error messages ("malformed Long value")
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::MYSQL_TYPE_DECIMAL => "Decimal",
            Self::MYSQL_TYPE_TINY => "Tiny",
            Self::MYSQL_TYPE_SHORT => "Short",
            Self::MYSQL_TYPE_LONG => "Long",
            Self::MYSQL_TYPE_FLOAT => "Float",
            Self::MYSQL_TYPE_DOUBLE => "Double",
            Self::MYSQL_TYPE_NULL => "Null",
            Self::MYSQL_TYPE_TIMESTAMP => "Timestamp",
            Self::MYSQL_TYPE_LONGLONG => "LongLong",
            Self::MYSQL_TYPE_INT24 => "Int24",
            Self::MYSQL_TYPE_DATE => "Date",
            Self::MYSQL_TYPE_TIME => "Time",
            Self::MYSQL_TYPE_DATETIME => "DateTime",
            Self::MYSQL_TYPE_YEAR => "Year",
            Self::MYSQL_TYPE_NEWDATE => "NewDate",
            Self::MYSQL_TYPE_VARCHAR => "VarChar",
            Self::MYSQL_TYPE_BIT => "Bit",
            Self::MYSQL_TYPE_TIMESTAMP2 => "Timestamp2",
            Self::MYSQL_TYPE_DATETIME2 => "DateTime2",
            Self::MYSQL_TYPE_TIME2 => "Time2",
            Self::MYSQL_TYPE_TYPED_ARRAY => "TypedArray",
            Self::MYSQL_TYPE_JSON => "JSON",
            Self::MYSQL_TYPE_NEWDECIMAL => "NewDecimal",
            Self::MYSQL_TYPE_ENUM => "Enum",
            Self::MYSQL_TYPE_SET => "Set",
            Self::MYSQL_TYPE_TINY_BLOB => "TinyBLOB",
            Self::MYSQL_TYPE_MEDIUM_BLOB => "MediumBLOB",
            Self::MYSQL_TYPE_LONG_BLOB => "LongBLOB",
            Self::MYSQL_TYPE_BLOB => "BLOB",
            Self::MYSQL_TYPE_VAR_STRING => "VarString",
            Self::MYSQL_TYPE_STRING => "String",
            Self::MYSQL_TYPE_GEOMETRY => "Geometry",
        }
    }

    /// Types whose binary row value is a length-encoded string
    pub fn is_string_family(self) -> bool {
        matches!(
            self,
            Self::MYSQL_TYPE_STRING
                | Self::MYSQL_TYPE_VAR_STRING
                | Self::MYSQL_TYPE_VARCHAR
                | Self::MYSQL_TYPE_BLOB
                | Self::MYSQL_TYPE_TINY_BLOB
                | Self::MYSQL_TYPE_MEDIUM_BLOB
                | Self::MYSQL_TYPE_LONG_BLOB
                | Self::MYSQL_TYPE_JSON
        )
    }
}
