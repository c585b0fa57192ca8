use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{Error, Result};

/// Largest payload a single packet header can announce
pub const MAX_PAYLOAD_LENGTH: u32 = 0x00FF_FFFF;

/// MySQL packet header (zero-copy)
///
/// Layout matches MySQL wire protocol:
/// - length: 3 bytes (little-endian, payload length)
/// - sequence_id: 1 byte
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes, Unaligned)]
pub struct PacketHeader {
    pub length: [u8; 3],
    pub sequence_id: u8,
}

impl PacketHeader {
    pub fn from_bytes(data: &[u8]) -> Result<(&Self, &[u8])> {
        Self::ref_from_prefix(data).map_err(|_| Error::MalformedRowPacket)
    }

    pub fn length(&self) -> u32 {
        u32::from_le_bytes([self.length[0], self.length[1], self.length[2], 0])
    }
}

/// Decoded packet header of a row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RowHeader {
    /// Declared payload length (24-bit), excluding the header itself
    pub payload_length: u32,
    pub sequence_id: u8,
}

impl RowHeader {
    pub fn new(payload_length: u32, sequence_id: u8) -> Self {
        Self {
            payload_length,
            sequence_id,
        }
    }
}

impl From<&PacketHeader> for RowHeader {
    fn from(header: &PacketHeader) -> Self {
        Self::new(header.length(), header.sequence_id)
    }
}

impl TryFrom<RowHeader> for PacketHeader {
    type Error = Error;

    fn try_from(header: RowHeader) -> Result<Self> {
        if header.payload_length > MAX_PAYLOAD_LENGTH {
            return Err(Error::MalformedRowPacket);
        }
        let len = header.payload_length.to_le_bytes();
        Ok(Self {
            length: [len[0], len[1], len[2]],
            sequence_id: header.sequence_id,
        })
    }
}
