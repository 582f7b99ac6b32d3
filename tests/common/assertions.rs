//! Assertion helpers for tests.

use pixel_filters::PixelBuffer;
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert two buffers hold the same pixels, ignoring stride padding.
pub fn assert_same_pixels(actual: &PixelBuffer, expected: &PixelBuffer) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "dimensions differ"
    );
    assert_eq!(actual.to_packed_bytes(), expected.to_packed_bytes());
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.len() > PNG_SIGNATURE.len() && bytes[..8] == PNG_SIGNATURE,
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..bytes.len().min(8)]
    );
}
