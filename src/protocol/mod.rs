pub mod codec;
pub mod null_bitmap;
pub mod packet;
pub mod primitive;
mod row;
pub mod temporal;
pub mod r#trait;
pub mod value;

pub use codec::BinaryRowCodec;
pub use null_bitmap::{NullBitmap, is_null};
pub use packet::RowHeader;
pub use row::{
    BinaryRow, ColumnEntry, decode_row, decode_row_with, encode_row, encode_row_into,
    encode_row_with,
};
pub use r#trait::{RowDecoder, RowEncoder};
