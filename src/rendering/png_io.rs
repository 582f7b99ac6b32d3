//! PNG decoding into BGRA pixel buffers and encoding back.
//!
//! Decoding expands palettes, low-bit grayscale and `tRNS` transparency,
//! and strips 16-bit samples to 8 bits, so every PNG lands in the
//! [`PixelBuffer`] layout. Images without an alpha channel get alpha 255.

use std::io::Cursor;
use std::path::Path;

use pixel_filters::PixelBuffer;

use crate::error::AppError;

/// Decode PNG bytes into a packed BGRA buffer.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| AppError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let pixels = info.width as usize * info.height as usize;
    let mut bgra = Vec::with_capacity(pixels * 4);
    match info.color_type {
        png::ColorType::Rgba => {
            for px in data.chunks_exact(4) {
                bgra.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        }
        png::ColorType::Rgb => {
            for px in data.chunks_exact(3) {
                bgra.extend_from_slice(&[px[2], px[1], px[0], 255]);
            }
        }
        png::ColorType::GrayscaleAlpha => {
            for px in data.chunks_exact(2) {
                bgra.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
        }
        png::ColorType::Grayscale => {
            for &v in data {
                bgra.extend_from_slice(&[v, v, v, 255]);
            }
        }
        png::ColorType::Indexed => {
            return Err(AppError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    }

    Ok(PixelBuffer::from_packed(info.width, info.height, bgra)?)
}

/// Encode a buffer as an 8-bit RGBA PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, AppError> {
    let rgba: Vec<u8> = buffer
        .to_packed_bytes()
        .chunks_exact(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgba)
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress PNG bytes with oxipng, keeping the input if that fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<PixelBuffer, AppError> {
    let bytes = std::fs::read(path)?;
    let image = decode_png(&bytes)?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Encode and write a PNG file, returning the number of bytes written.
pub fn write_png(path: &Path, image: &PixelBuffer, optimize: bool) -> Result<usize, AppError> {
    let mut png_bytes = encode_png(image)?;
    if optimize {
        png_bytes = optimize_png(png_bytes);
    }
    std::fs::write(path, &png_bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = png_bytes.len(),
        "Wrote image"
    );
    Ok(png_bytes.len())
}
