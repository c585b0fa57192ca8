use crate::constant::{ColumnFlags, ColumnType};

#[test]
fn test_column_type_from_u8_round_trip() {
    for code in 0u8..=0xff {
        if let Some(column_type) = ColumnType::from_u8(code) {
            assert_eq!(column_type as u8, code, "discriminant mismatch for 0x{code:02X}");
        }
    }
}

#[test]
fn test_column_type_unknown_codes() {
    // 0x15..=0xf4 is unassigned
    assert_eq!(ColumnType::from_u8(0x15), None);
    assert_eq!(ColumnType::from_u8(0x80), None);
    assert_eq!(ColumnType::from_u8(0xf4), None);
}

#[test]
fn test_string_family() {
    for column_type in [
        ColumnType::MYSQL_TYPE_STRING,
        ColumnType::MYSQL_TYPE_VAR_STRING,
        ColumnType::MYSQL_TYPE_VARCHAR,
        ColumnType::MYSQL_TYPE_BLOB,
        ColumnType::MYSQL_TYPE_TINY_BLOB,
        ColumnType::MYSQL_TYPE_MEDIUM_BLOB,
        ColumnType::MYSQL_TYPE_LONG_BLOB,
        ColumnType::MYSQL_TYPE_JSON,
    ] {
        assert!(column_type.is_string_family(), "{column_type:?}");
    }
    assert!(!ColumnType::MYSQL_TYPE_NEWDECIMAL.is_string_family());
    assert!(!ColumnType::MYSQL_TYPE_ENUM.is_string_family());
    assert!(!ColumnType::MYSQL_TYPE_LONG.is_string_family());
}

#[test]
fn test_column_flags_from_wire() {
    // NOT_NULL | PRI_KEY | AUTO_INCREMENT | PART_KEY, as sent by a real server
    let flags = ColumnFlags::from_bits(0x4203).expect("all bits are known");
    assert!(flags.contains(ColumnFlags::NOT_NULL_FLAG));
    assert!(flags.contains(ColumnFlags::AUTO_INCREMENT_FLAG));
    assert!(flags.contains(ColumnFlags::PART_KEY_FLAG));
    assert!(!flags.contains(ColumnFlags::UNSIGNED_FLAG));
}
