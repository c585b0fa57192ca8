pub mod col;
pub mod constant;
pub mod error;
mod opts;
pub mod protocol;
pub mod value;

pub use col::ColumnDefinition;
pub use opts::{CodecOpts, FractionalSeconds};
pub use protocol::{BinaryRow, BinaryRowCodec, ColumnEntry, decode_row, encode_row, is_null};
pub use value::Value;

#[cfg(test)]
mod constant_test;
