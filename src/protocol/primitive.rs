use crate::error::{Error, Result};
use zerocopy::FromBytes;
use zerocopy::byteorder::little_endian::{U16 as U16LE, U32 as U32LE, U64 as U64LE};

/// Read 1-byte integer
pub fn read_int_1(data: &[u8]) -> Result<(u8, &[u8])> {
    match data.split_first() {
        Some((&value, rest)) => Ok((value, rest)),
        None => Err(Error::UnexpectedEof),
    }
}

/// Read 2-byte little-endian integer
pub fn read_int_2(data: &[u8]) -> Result<(u16, &[u8])> {
    let (value, rest) = U16LE::ref_from_prefix(data)?;
    Ok((value.get(), rest))
}

/// Read 3-byte little-endian integer
pub fn read_int_3(data: &[u8]) -> Result<(u32, &[u8])> {
    match data {
        [b0, b1, b2, rest @ ..] => Ok((u32::from_le_bytes([*b0, *b1, *b2, 0]), rest)),
        _ => Err(Error::UnexpectedEof),
    }
}

/// Read 4-byte little-endian integer
pub fn read_int_4(data: &[u8]) -> Result<(u32, &[u8])> {
    let (value, rest) = U32LE::ref_from_prefix(data)?;
    Ok((value.get(), rest))
}

/// Read 8-byte little-endian integer
pub fn read_int_8(data: &[u8]) -> Result<(u64, &[u8])> {
    let (value, rest) = U64LE::ref_from_prefix(data)?;
    Ok((value.get(), rest))
}

/// Read length-encoded integer
///
/// `0xFB` (NULL in the text protocol) and `0xFF` (ERR header) never start a length prefix
/// inside a binary row and are rejected.
pub fn read_int_lenenc(data: &[u8]) -> Result<(u64, &[u8])> {
    let (first, rest) = read_int_1(data)?;
    match first {
        0xFC => {
            let (val, rest) = read_int_2(rest)?;
            Ok((u64::from(val), rest))
        }
        0xFD => {
            let (val, rest) = read_int_3(rest)?;
            Ok((u64::from(val), rest))
        }
        0xFE => read_int_8(rest),
        0xFB | 0xFF => Err(Error::InvalidLengthPrefix(first)),
        val => Ok((u64::from(val), rest)),
    }
}

/// Read fixed-length string
pub fn read_string_fix(data: &[u8], len: usize) -> Result<(&[u8], &[u8])> {
    if data.len() < len {
        return Err(Error::UnexpectedEof);
    }
    Ok(data.split_at(len))
}

/// Read length-encoded string
pub fn read_string_lenenc(data: &[u8]) -> Result<(&[u8], &[u8])> {
    let (len, rest) = read_int_lenenc(data)?;
    let len = usize::try_from(len).map_err(|_| Error::UnexpectedEof)?;
    read_string_fix(rest, len)
}

/// Write 1-byte integer
pub fn write_int_1(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Write 2-byte little-endian integer
pub fn write_int_2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write 3-byte little-endian integer
pub fn write_int_3(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes()[..3]);
}

/// Write 4-byte little-endian integer
pub fn write_int_4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write 8-byte little-endian integer
pub fn write_int_8(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write length-encoded integer
pub fn write_int_lenenc(out: &mut Vec<u8>, value: u64) {
    if value < 251 {
        out.push(value as u8);
    } else if value < (1 << 16) {
        out.push(0xfc);
        write_int_2(out, value as u16);
    } else if value < (1 << 24) {
        out.push(0xfd);
        write_int_3(out, value as u32);
    } else {
        out.push(0xfe);
        write_int_8(out, value);
    }
}

/// Write length-encoded string
pub fn write_string_lenenc(out: &mut Vec<u8>, s: &str) {
    write_bytes_lenenc(out, s.as_bytes());
}

/// Write length-encoded bytes
pub fn write_bytes_lenenc(out: &mut Vec<u8>, data: &[u8]) {
    write_int_lenenc(out, data.len() as u64);
    out.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xAA];
        assert_eq!(read_int_1(&data).unwrap(), (0x01, &data[1..]));
        assert_eq!(read_int_2(&data).unwrap(), (0x0201, &data[2..]));
        assert_eq!(read_int_3(&data).unwrap(), (0x030201, &data[3..]));
        assert_eq!(read_int_4(&data).unwrap(), (0x04030201, &data[4..]));
        assert_eq!(read_int_8(&data).unwrap(), (0x0807060504030201, &data[8..]));
    }

    #[test]
    fn test_read_fixed_width_short_buffer() {
        assert!(matches!(read_int_1(&[]), Err(Error::UnexpectedEof)));
        assert!(matches!(read_int_2(&[0x01]), Err(Error::UnexpectedEof)));
        assert!(matches!(read_int_3(&[0x01, 0x02]), Err(Error::UnexpectedEof)));
        assert!(matches!(read_int_4(&[0x01, 0x02, 0x03]), Err(Error::UnexpectedEof)));
        assert!(matches!(read_int_8(&[0x00; 7]), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_lenenc_int_widths() {
        let cases: [(u64, usize); 6] = [
            (0, 1),
            (250, 1),
            (251, 3),
            (0xFFFF, 3),
            (0x10000, 4),
            (1 << 24, 9),
        ];
        for (value, width) in cases {
            let mut out = Vec::new();
            write_int_lenenc(&mut out, value);
            assert_eq!(out.len(), width, "width of {value}");
            let (decoded, rest) = read_int_lenenc(&out).unwrap();
            assert_eq!(decoded, value);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn test_lenenc_int_rejects_null_and_err_markers() {
        assert!(matches!(
            read_int_lenenc(&[0xFB]),
            Err(Error::InvalidLengthPrefix(0xFB))
        ));
        assert!(matches!(
            read_int_lenenc(&[0xFF]),
            Err(Error::InvalidLengthPrefix(0xFF))
        ));
    }

    #[test]
    fn test_lenenc_string() {
        let mut out = Vec::new();
        write_string_lenenc(&mut out, "hello");
        assert_eq!(out, b"\x05hello");

        let (value, rest) = read_string_lenenc(&[0x03, b'a', b'b', b'c', 0x99]).unwrap();
        assert_eq!(value, b"abc");
        assert_eq!(rest, &[0x99]);
    }

    #[test]
    fn test_lenenc_string_truncated_payload() {
        assert!(matches!(
            read_string_lenenc(&[0x05, b'h', b'i']),
            Err(Error::UnexpectedEof)
        ));
    }
}
