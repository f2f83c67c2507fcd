//! Per-glyph encoding: nibble packing and optional compression

pub mod compress;
pub mod pack;

pub use compress::{compress, decompress, Compression};
pub use pack::{pack_nibbles, packed_len, quantize, unpack_nibbles};
