//! PNG decode/encode round trips through the filter engine.

mod common;

use common::{assert_png, assert_same_pixels, fixtures};
use pixel_filters::{FilterChain, Invert, PixelBuffer};
use pixfilt::rendering::{decode_png, encode_png, optimize_png, read_png, write_png};
use tempfile::TempDir;

#[test]
fn test_encode_then_decode_preserves_pixels() {
    let image = fixtures::checkerboard(7, 5);
    let png = encode_png(&image).unwrap();
    assert_png(&png);

    let decoded = decode_png(&png).unwrap();
    assert_same_pixels(&decoded, &image);
}

#[test]
fn test_padded_buffer_encodes_without_padding() {
    let mut data = Vec::new();
    for row in 0..2u8 {
        data.extend_from_slice(&[row, 1, 2, 255, row, 3, 4, 255]);
        data.extend_from_slice(&[0xEE; 8]);
    }
    let padded = PixelBuffer::from_raw(2, 2, 16, data).unwrap();

    let decoded = decode_png(&encode_png(&padded).unwrap()).unwrap();
    assert!(decoded.is_packed());
    assert_same_pixels(&decoded, &padded);
}

#[test]
fn test_optimized_png_decodes_to_same_pixels() {
    let image = fixtures::gradient(32, 16);
    let png = encode_png(&image).unwrap();
    let optimized = optimize_png(png);
    assert_png(&optimized);
    assert_same_pixels(&decode_png(&optimized).unwrap(), &image);
}

#[test]
fn test_file_round_trip_through_chain() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");

    let image = fixtures::gradient(12, 9);
    write_png(&input, &image, false).unwrap();

    let loaded = read_png(&input).unwrap();
    let mut chain = FilterChain::new();
    chain.push(Invert);
    chain.push(Invert);
    let filtered = chain.apply(Some(&loaded)).unwrap();

    let bytes = write_png(&output, &filtered, true).unwrap();
    assert_eq!(bytes as u64, std::fs::metadata(&output).unwrap().len());

    // gradient is opaque, so a double invert is exact
    assert_same_pixels(&read_png(&output).unwrap(), &image);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = read_png(&dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(err, pixfilt::error::AppError::Io(_)));
}
