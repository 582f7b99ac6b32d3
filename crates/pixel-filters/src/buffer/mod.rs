//! Pixel buffer type and BGRA channel offsets.
//!
//! Decoders hand the engine a [`PixelBuffer`]; filters borrow it read-only
//! and return a new packed buffer.

mod pixel_buffer;

use rayon::prelude::*;

pub use pixel_buffer::{PixelBuffer, ALPHA, BLUE, BYTES_PER_PIXEL, GREEN, RED};

/// Clamp and round a computed channel value into a byte.
#[inline]
pub(crate) fn clamp_byte(value: f64) -> u8 {
    // NaN casts to 0
    value.round().clamp(0.0, 255.0) as u8
}

/// Apply a per-pixel transform to every pixel, producing a packed buffer.
///
/// Output rows are disjoint, so they are filled in parallel while the
/// source is only read.
pub(crate) fn map_pixels<F>(source: &PixelBuffer, transform: F) -> PixelBuffer
where
    F: Fn([u8; 4]) -> [u8; 4] + Sync,
{
    let mut output = PixelBuffer::new(source.width(), source.height());
    let row_len = output.row_len();
    if row_len == 0 || output.height() == 0 {
        return output;
    }

    output
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = source.row(y);
            for (px_out, px_in) in row_out
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(row_in.chunks_exact(BYTES_PER_PIXEL))
            {
                let result = transform([px_in[0], px_in[1], px_in[2], px_in[3]]);
                px_out.copy_from_slice(&result);
            }
        });
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_pixels_reads_padded_rows() {
        let data = vec![
            1, 2, 3, 4, 0, 0, 0, 0, //
            5, 6, 7, 8, 0, 0, 0, 0,
        ];
        let source = PixelBuffer::from_raw(1, 2, 8, data).unwrap();
        let out = map_pixels(&source, |[b, g, r, a]| [r, g, b, a]);
        assert_eq!(out.stride(), 4);
        assert_eq!(out.data(), &[3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_clamp_byte_saturates() {
        assert_eq!(clamp_byte(-3.2), 0);
        assert_eq!(clamp_byte(300.0), 255);
        assert_eq!(clamp_byte(127.5), 128);
        assert_eq!(clamp_byte(f64::NAN), 0);
    }
}
