//! 4-bit greyscale packing
//!
//! Each 8-bit sample keeps its high nibble. Two horizontally adjacent
//! samples share a byte: the even column goes in the low nibble, the odd
//! column in the high nibble. Packing restarts on every row, so a row of
//! odd width ends with a half-filled byte.

/// Bytes needed for a packed `width x height` bitmap.
pub fn packed_len(width: usize, height: usize) -> usize {
    width.div_ceil(2) * height
}

/// Drop the low nibble of a sample.
pub fn quantize(sample: u8) -> u8 {
    sample & 0xF0
}

/// Pack a row-major 8-bit bitmap into 4 bits per pixel.
pub fn pack_nibbles(bitmap: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }

    let mut packed = Vec::with_capacity(packed_len(width, height));
    for row in bitmap.chunks_exact(width).take(height) {
        for pair in row.chunks(2) {
            let low = pair[0] >> 4;
            let high = pair.get(1).map_or(0, |&v| v & 0xF0);
            packed.push(low | high);
        }
    }
    packed
}

/// Expand packed rows back to one byte per pixel.
///
/// Every sample comes back quantized, with its low nibble cleared.
pub fn unpack_nibbles(packed: &[u8], width: usize, height: usize) -> Vec<u8> {
    let row_len = width.div_ceil(2);
    if row_len == 0 {
        return Vec::new();
    }

    let mut bitmap = Vec::with_capacity(width * height);
    for row in packed.chunks_exact(row_len).take(height) {
        for x in 0..width {
            let byte = row[x / 2];
            let sample = if x % 2 == 0 { byte << 4 } else { byte & 0xF0 };
            bitmap.push(sample);
        }
    }
    bitmap
}
