use tracing::{debug, trace, warn};
use zerocopy::IntoBytes;

use crate::col::ColumnDefinition;
use crate::constant::{ColumnType, PACKET_HEADER_LEN, ROW_MARKER};
use crate::error::{Error, Result, RowStage};
use crate::opts::CodecOpts;
use crate::protocol::null_bitmap::{NullBitmap, is_null, null_bitmap_len, set_null};
use crate::protocol::packet::{MAX_PAYLOAD_LENGTH, PacketHeader, RowHeader};
use crate::protocol::value::{decode_value, encode_value};
use crate::value::Value;

/// A column value of a binary row together with the column it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub name: String,
    pub column_type: ColumnType,
    /// `None` for SQL NULL
    pub value: Option<Value>,
}

impl ColumnEntry {
    pub fn new(col: &ColumnDefinition, value: Option<Value>) -> Self {
        Self {
            name: col.name.clone(),
            column_type: col.column_type,
            value,
        }
    }
}

/// A binary resultset row packet
///
/// Either decoded from captured bytes or built by a caller before encoding.
/// The NULL bitmap is the one captured on the wire; the encoder writes it back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRow {
    pub(crate) header: RowHeader,
    pub(crate) null_bitmap: Vec<u8>,
    pub(crate) values: Vec<ColumnEntry>,
}

impl BinaryRow {
    /// Reassemble a row from stored parts (e.g. a recorded mock)
    pub fn from_parts(header: RowHeader, null_bitmap: Vec<u8>, values: Vec<ColumnEntry>) -> Self {
        Self {
            header,
            null_bitmap,
            values,
        }
    }

    /// Build a row to replay from one optional value per column
    ///
    /// The NULL bitmap is derived from the `None` entries and the header's payload length
    /// is set to the encoded body size.
    pub fn from_values(
        sequence_id: u8,
        columns: &[ColumnDefinition],
        values: Vec<Option<Value>>,
        opts: &CodecOpts,
    ) -> Result<Self> {
        if values.len() != columns.len() {
            return Err(Error::ColumnCountMismatch {
                expected: columns.len(),
                actual: values.len(),
            });
        }

        let mut null_bitmap = vec![0u8; null_bitmap_len(columns.len())];
        let mut entries = Vec::with_capacity(columns.len());
        for (idx, (col, value)) in columns.iter().zip(values).enumerate() {
            if value.is_none() {
                set_null(&mut null_bitmap, idx);
            }
            entries.push(ColumnEntry::new(col, value));
        }

        let mut row = Self::from_parts(RowHeader::new(0, sequence_id), null_bitmap, entries);
        let mut out = Vec::new();
        encode_row_into(&row, columns, opts, &mut out)?;
        let payload_length = u32::try_from(out.len() - PACKET_HEADER_LEN)
            .ok()
            .filter(|len| *len <= MAX_PAYLOAD_LENGTH)
            .ok_or_else(|| Error::MalformedRowPacket.encoding(RowStage::Header))?;
        row.header.payload_length = payload_length;
        Ok(row)
    }

    pub fn header(&self) -> RowHeader {
        self.header
    }

    pub fn null_bitmap(&self) -> NullBitmap<'_> {
        NullBitmap::for_result_set(&self.null_bitmap)
    }

    pub fn is_null(&self, idx: usize) -> bool {
        is_null(&self.null_bitmap, idx)
    }

    pub fn values(&self) -> &[ColumnEntry] {
        &self.values
    }

    /// Value of column `idx`, `None` for NULL or out of range
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx).and_then(|entry| entry.value.as_ref())
    }

    pub fn num_columns(&self) -> usize {
        self.values.len()
    }

    pub fn into_values(self) -> Vec<ColumnEntry> {
        self.values
    }
}

/// Decode a binary resultset row packet (header included)
///
/// Returns the row and the number of bytes it occupied in `data`.
/// On failure the error carries the offset reached so far (see [`Error::offset`]).
pub fn decode_row(data: &[u8], columns: &[ColumnDefinition]) -> Result<(BinaryRow, usize)> {
    decode_row_with(data, columns, &CodecOpts::default())
}

#[tracing::instrument(skip_all)]
pub fn decode_row_with(
    data: &[u8],
    columns: &[ColumnDefinition],
    opts: &CodecOpts,
) -> Result<(BinaryRow, usize)> {
    let (header, rest) =
        PacketHeader::from_bytes(data).map_err(|e| e.decoding(0, RowStage::Header))?;
    let header = RowHeader::from(header);
    let mut offset = PACKET_HEADER_LEN;

    if rest.first() != Some(&ROW_MARKER) {
        return Err(Error::MalformedRowPacket.decoding(offset, RowStage::RowMarker));
    }
    offset += 1;

    let bitmap_len = null_bitmap_len(columns.len());
    let null_bitmap = data
        .get(offset..offset + bitmap_len)
        .ok_or_else(|| Error::MalformedRowPacket.decoding(offset, RowStage::NullBitmap))?
        .to_vec();
    offset += bitmap_len;

    let mut values = Vec::with_capacity(columns.len());
    for (idx, col) in columns.iter().enumerate() {
        // NULL columns occupy no bytes
        if is_null(&null_bitmap, idx) {
            values.push(ColumnEntry::new(col, None));
            continue;
        }

        let remaining = data.get(offset..).unwrap_or_default();
        let (value, len) = decode_value(col, remaining).map_err(|e| {
            e.decoding(
                offset,
                RowStage::Column {
                    index: idx,
                    name: col.name.clone(),
                },
            )
        })?;
        trace!(column = idx, name = %col.name, len, "decoded column");
        values.push(ColumnEntry::new(col, Some(value)));
        offset += len;
    }

    if opts.check_payload_length {
        let body_len = offset - PACKET_HEADER_LEN;
        if body_len != header.payload_length as usize {
            warn!(
                payload_length = header.payload_length,
                body_len, "row payload length does not match decoded body"
            );
        }
    }
    debug!(
        columns = columns.len(),
        sequence_id = header.sequence_id,
        consumed = offset,
        "decoded binary row"
    );

    Ok((
        BinaryRow {
            header,
            null_bitmap,
            values,
        },
        offset,
    ))
}

/// Encode a binary resultset row packet (header included)
pub fn encode_row(row: &BinaryRow, columns: &[ColumnDefinition]) -> Result<Vec<u8>> {
    encode_row_with(row, columns, &CodecOpts::default())
}

pub fn encode_row_with(
    row: &BinaryRow,
    columns: &[ColumnDefinition],
    opts: &CodecOpts,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_row_into(row, columns, opts, &mut out)?;
    Ok(out)
}

/// Append the encoded row to `out`
///
/// On error, `out` may hold a partially written packet.
#[tracing::instrument(skip_all)]
pub fn encode_row_into(
    row: &BinaryRow,
    columns: &[ColumnDefinition],
    opts: &CodecOpts,
    out: &mut Vec<u8>,
) -> Result<()> {
    let header = PacketHeader::try_from(row.header).map_err(|e| e.encoding(RowStage::Header))?;
    out.extend_from_slice(header.as_bytes());
    out.push(ROW_MARKER);

    if row.null_bitmap.len() != null_bitmap_len(columns.len()) {
        return Err(Error::MalformedRowPacket.encoding(RowStage::NullBitmap));
    }
    out.extend_from_slice(&row.null_bitmap);

    for (idx, col) in columns.iter().enumerate() {
        if is_null(&row.null_bitmap, idx) {
            continue;
        }
        let stage = || RowStage::Column {
            index: idx,
            name: col.name.clone(),
        };
        let value = row.get(idx).ok_or_else(|| Error::MissingValue.encoding(stage()))?;
        encode_value(col, value, opts, out).map_err(|e| e.encoding(stage()))?;
    }

    debug!(
        columns = columns.len(),
        sequence_id = row.header.sequence_id,
        "encoded binary row"
    );
    Ok(())
}
