//! Test images and chain files.

use std::path::PathBuf;

use pixel_filters::PixelBuffer;
use tempfile::TempDir;

/// Horizontal red ramp over a vertical blue ramp, fully opaque.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(2).saturating_sub(1)) as u8;
            let b = (y * 255 / height.max(2).saturating_sub(1)) as u8;
            image.set_pixel(x, y, [b, 128, r, 255]).unwrap();
        }
    }
    image
}

/// Checkerboard of two colors with varying alpha.
pub fn checkerboard(width: u32, height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let px = if (x + y) % 2 == 0 {
                [200, 40, 10, 255]
            } else {
                [15, 90, 240, 128]
            };
            image.set_pixel(x, y, px).unwrap();
        }
    }
    image
}

/// Write `content` to `name` inside `dir` and return its path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// A three-filter chain used across tests.
pub const THREE_FILTER_CHAIN: &str = r#"
filters:
  - type: brightness
    amount: 25
  - type: convolution
    preset: sharpen
  - type: gamma
    gamma: 0.8
"#;
