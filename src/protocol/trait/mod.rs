use crate::error::Result;

/// Trait for decoding a single row packet from raw bytes
///
/// Implementations carry whatever metadata they need (column definitions, options)
/// and decode rows into their own structures.
pub trait RowDecoder {
    /// The output type produced by decoding a row
    type Output;

    /// Decode a single row packet from the front of `packet`
    ///
    /// # Returns
    /// * `Ok((Self::Output, consumed))` - Decoded row and the number of bytes it occupied
    /// * `Err(Error)` - Decoding failed
    fn decode_row(&self, packet: &[u8]) -> Result<(Self::Output, usize)>;
}

/// Trait for encoding a single row into its wire format
pub trait RowEncoder {
    /// The row type accepted by the encoder
    type Input;

    /// Append the encoded row packet to `out`
    fn encode_row(&self, row: &Self::Input, out: &mut Vec<u8>) -> Result<()>;
}
