use crate::constant::RESULT_SET_NULL_BITMAP_OFFSET;

/// Number of NULL bitmap bytes in a binary row with `num_columns` columns
pub fn null_bitmap_len(num_columns: usize) -> usize {
    (num_columns + RESULT_SET_NULL_BITMAP_OFFSET).div_ceil(8)
}

/// Byte index and bit mask of column `idx`
#[inline]
fn locate(idx: usize) -> (usize, u8) {
    let bit_pos = idx + RESULT_SET_NULL_BITMAP_OFFSET;
    (bit_pos >> 3, 1 << (bit_pos & 7))
}

/// Check if the column at the given index is NULL
///
/// Indexes past the end of the bitmap read as not NULL.
pub fn is_null(bitmap: &[u8], idx: usize) -> bool {
    let (byte_pos, mask) = locate(idx);
    bitmap.get(byte_pos).is_some_and(|byte| byte & mask != 0)
}

/// Mark the column at the given index as NULL
///
/// Returns `false` (and leaves the bitmap untouched) if the bitmap is too short.
pub fn set_null(bitmap: &mut [u8], idx: usize) -> bool {
    let (byte_pos, mask) = locate(idx);
    match bitmap.get_mut(byte_pos) {
        Some(byte) => {
            *byte |= mask;
            true
        }
        None => false,
    }
}

/// NULL bitmap of a binary resultset row
///
/// In MySQL binary protocol, NULL values are indicated by a bitmap where each bit
/// represents whether a column is NULL (1 = NULL, 0 = not NULL).
/// Result set rows reserve the first 2 bits, so column 0 lives at bit 2 of byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullBitmap<'a> {
    bitmap: &'a [u8],
}

impl<'a> NullBitmap<'a> {
    pub fn for_result_set(bitmap: &'a [u8]) -> Self {
        Self { bitmap }
    }

    pub fn is_null(&self, idx: usize) -> bool {
        is_null(self.bitmap, idx)
    }

    /// Indexes of NULL columns among the first `num_columns`
    pub fn null_columns(&self, num_columns: usize) -> impl Iterator<Item = usize> + '_ {
        (0..num_columns).filter(|&idx| self.is_null(idx))
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_bitmap_len() {
        assert_eq!(null_bitmap_len(0), 1);
        assert_eq!(null_bitmap_len(1), 1);
        assert_eq!(null_bitmap_len(6), 1);
        assert_eq!(null_bitmap_len(7), 2);
        assert_eq!(null_bitmap_len(14), 2);
        assert_eq!(null_bitmap_len(15), 3);
        for n in 0..64 {
            assert_eq!(null_bitmap_len(n), (n + 7 + 2) / 8);
        }
    }

    #[test]
    fn test_single_column_uses_bit_two() {
        assert!(is_null(&[0b0000_0100], 0));
        assert!(!is_null(&[0b0000_0001], 0));
        assert!(!is_null(&[0b0000_0010], 0));
    }

    #[test]
    fn test_null_bitmap_result_set() {
        // Bit 2 (column 0) and bit 12 (column 10) are set
        let bitmap = [0b0000_0100, 0b0001_0000];
        let null_bitmap = NullBitmap::for_result_set(&bitmap);

        assert!(null_bitmap.is_null(0));
        assert!(!null_bitmap.is_null(1));
        assert!(!null_bitmap.is_null(2));
        assert!(null_bitmap.is_null(10));
        assert_eq!(null_bitmap.null_columns(14).collect::<Vec<_>>(), vec![0, 10]);
    }

    #[test]
    fn test_out_of_range_is_not_null() {
        assert!(!is_null(&[0xFF], 6));
        assert!(!is_null(&[], 0));
    }

    #[test]
    fn test_set_null_pairs_with_is_null() {
        let mut bitmap = vec![0u8; null_bitmap_len(9)];
        assert!(set_null(&mut bitmap, 0));
        assert!(set_null(&mut bitmap, 5));
        assert!(set_null(&mut bitmap, 8));
        assert_eq!(bitmap, vec![0b1000_0100, 0b0000_0100]);
        for idx in 0..9 {
            assert_eq!(is_null(&bitmap, idx), matches!(idx, 0 | 5 | 8), "column {idx}");
        }
        assert!(!set_null(&mut bitmap, 14));
    }
}
