//! PixelBuffer: the canonical in-memory image every filter reads and writes.
//!
//! [`PixelBuffer`] owns a row-major byte buffer of BGRA pixels. Rows are
//! `stride` bytes long and may carry trailing padding; buffers produced by
//! filters are always packed (`stride == width * 4`).

use crate::error::FilterError;

/// Bytes per BGRA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Byte offset of the blue channel within a pixel.
pub const BLUE: usize = 0;
/// Byte offset of the green channel within a pixel.
pub const GREEN: usize = 1;
/// Byte offset of the red channel within a pixel.
pub const RED: usize = 2;
/// Byte offset of the alpha channel within a pixel.
pub const ALPHA: usize = 3;

/// A row-major BGRA8 image.
///
/// # Layout
///
/// - 4 bytes per pixel, channel order `[B, G, R, A]`
/// - `stride` bytes per row, `stride >= width * 4`
/// - `data.len() == stride * height`
///
/// The layout invariant is checked once, in [`from_raw()`](Self::from_raw);
/// afterwards every accessor can rely on it.
///
/// # Example
///
/// ```
/// use pixel_filters::PixelBuffer;
///
/// // 2x1 image with 4 bytes of row padding
/// let data = vec![
///     10, 20, 30, 255, 40, 50, 60, 255, 0, 0, 0, 0,
/// ];
/// let buffer = PixelBuffer::from_raw(2, 1, 12, data).unwrap();
///
/// assert_eq!(buffer.pixel(1, 0).unwrap(), [40, 50, 60, 255]);
/// assert!(buffer.pixel(2, 0).is_err());
///
/// let packed = buffer.to_packed();
/// assert_eq!(packed.stride(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a packed, fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a packed buffer with every pixel set to `bgra`.
    pub fn filled(width: u32, height: u32, bgra: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        for _ in 0..pixels {
            data.extend_from_slice(&bgra);
        }
        Self {
            width,
            height,
            stride: width as usize * BYTES_PER_PIXEL,
            data,
        }
    }

    /// Wrap decoder output, validating the stride and length invariants.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidStride`] if `stride < width * 4`
    /// - [`FilterError::BufferSize`] if `data.len() != stride * height`,
    ///   or if that product does not fit in `usize`
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, FilterError> {
        let min = (width as usize).saturating_mul(BYTES_PER_PIXEL);
        if stride < min {
            return Err(FilterError::InvalidStride { stride, min });
        }
        let expected = stride.checked_mul(height as usize).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(FilterError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Wrap tightly packed BGRA rows (`stride == width * 4`).
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FilterError> {
        let stride = (width as usize).saturating_mul(BYTES_PER_PIXEL);
        Self::from_raw(width, height, stride, data)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row length in bytes, including padding.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw bytes, `stride * height` long.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether rows carry no padding.
    #[inline]
    pub fn is_packed(&self) -> bool {
        self.stride == self.row_len()
    }

    /// Read the BGRA pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4], FilterError> {
        self.check_bounds(x, y)?;
        let i = self.offset(x as usize, y as usize);
        Ok([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite the BGRA pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, bgra: [u8; 4]) -> Result<(), FilterError> {
        self.check_bounds(x, y)?;
        let i = self.offset(x as usize, y as usize);
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&bgra);
        Ok(())
    }

    /// Bulk-load packed BGRA rows into this buffer, honouring its stride.
    ///
    /// `src` must hold exactly `width * height * 4` bytes.
    pub fn copy_from_packed(&mut self, src: &[u8]) -> Result<(), FilterError> {
        let row_len = self.row_len();
        let expected = row_len * self.height as usize;
        if src.len() != expected {
            return Err(FilterError::BufferSize {
                expected,
                actual: src.len(),
            });
        }
        if row_len == 0 {
            return Ok(());
        }
        for (y, src_row) in src.chunks_exact(row_len).enumerate() {
            let start = y * self.stride;
            self.data[start..start + row_len].copy_from_slice(src_row);
        }
        Ok(())
    }

    /// Export the pixels as packed BGRA rows, dropping any padding.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        if self.is_packed() {
            return self.data.clone();
        }
        let row_len = self.row_len();
        let mut out = Vec::with_capacity(row_len * self.height as usize);
        for y in 0..self.height as usize {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    /// Copy into a packed buffer (`stride == width * 4`).
    ///
    /// Filters start from this copy, so pixels a filter does not write
    /// keep their source values.
    pub fn to_packed(&self) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            stride: self.row_len(),
            data: self.to_packed_bytes(),
        }
    }

    /// Bytes of one row without padding.
    #[inline]
    pub(crate) fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Pixel bytes of row `y`. Callers iterate `0..height`.
    #[inline]
    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_len()]
    }

    /// Byte offset of pixel `(x, y)`. Callers iterate within bounds.
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * BYTES_PER_PIXEL
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), FilterError> {
        if x >= self.width || y >= self.height {
            return Err(FilterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
