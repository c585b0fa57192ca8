use tracing::debug;

use crate::col::ColumnDefinition;
use crate::constant::{PACKET_HEADER_LEN, ROW_MARKER};
use crate::error::{Error, Result};
use crate::opts::CodecOpts;
use crate::protocol::r#trait::{RowDecoder, RowEncoder};
use crate::protocol::row::{BinaryRow, decode_row_with, encode_row_into};
use crate::value::Value;

/// Binary row codec bound to the column definitions of one result set
#[derive(Debug, Clone, Default)]
pub struct BinaryRowCodec {
    columns: Vec<ColumnDefinition>,
    opts: CodecOpts,
}

impl BinaryRowCodec {
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self::with_opts(columns, CodecOpts::default())
    }

    pub fn with_opts(columns: Vec<ColumnDefinition>, opts: CodecOpts) -> Self {
        Self { columns, opts }
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn opts(&self) -> &CodecOpts {
        &self.opts
    }

    /// Build a row from one optional value per column
    pub fn build_row(&self, sequence_id: u8, values: Vec<Option<Value>>) -> Result<BinaryRow> {
        BinaryRow::from_values(sequence_id, &self.columns, values, &self.opts)
    }

    /// Decode consecutive row packets from the front of `data`
    ///
    /// Stops at the end of the buffer or at the first packet whose payload does not start
    /// with the row marker (EOF `0xFE`, ERR `0xFF`, or a truncated header).
    /// Returns the rows and the number of bytes they occupied; the terminating packet is
    /// left unconsumed.
    pub fn decode_rows(&self, data: &[u8]) -> Result<(Vec<BinaryRow>, usize)> {
        let mut rows = Vec::new();
        let mut offset = 0;

        while data.get(offset + PACKET_HEADER_LEN) == Some(&ROW_MARKER) {
            let (row, consumed) = self.decode_row(&data[offset..]).map_err(|e| shift(e, offset))?;
            rows.push(row);
            offset += consumed;
        }

        debug!(rows = rows.len(), consumed = offset, "decoded row stream");
        Ok((rows, offset))
    }

    /// Encode rows back to back into `out`
    pub fn encode_rows<'r, I>(&self, rows: I, out: &mut Vec<u8>) -> Result<()>
    where
        I: IntoIterator<Item = &'r BinaryRow>,
    {
        for row in rows {
            self.encode_row(row, out)?;
        }
        Ok(())
    }
}

/// Rebase a decode offset from a packet onto the whole stream
fn shift(err: Error, base: usize) -> Error {
    match err {
        Error::Decode {
            offset,
            stage,
            source,
        } => Error::Decode {
            offset: base + offset,
            stage,
            source,
        },
        other => other,
    }
}

impl RowDecoder for BinaryRowCodec {
    type Output = BinaryRow;

    fn decode_row(&self, packet: &[u8]) -> Result<(BinaryRow, usize)> {
        decode_row_with(packet, &self.columns, &self.opts)
    }
}

impl RowEncoder for BinaryRowCodec {
    type Input = BinaryRow;

    fn encode_row(&self, row: &BinaryRow, out: &mut Vec<u8>) -> Result<()> {
        encode_row_into(row, &self.columns, &self.opts, out)
    }
}
