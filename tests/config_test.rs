//! Chain file loading from disk.

mod common;

use common::{assert_same_pixels, fixtures};
use pixel_filters::{Brightness, Convolution, ConvolutionKernel, Gamma, ImageFilter};
use pixfilt::error::AppError;
use pixfilt::models::{ChainConfig, DEFAULT_CHAIN_YAML};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_load_yaml_chain() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = fixtures::write_file(&dir, "chain.yaml", fixtures::THREE_FILTER_CHAIN);

    let config = ChainConfig::load(&path).unwrap();
    let labels: Vec<String> = config
        .build_filters()
        .unwrap()
        .iter()
        .map(ImageFilter::label)
        .collect();
    assert_eq!(labels, vec!["Brightness +25", "sharpen", "Gamma 0.8 (c=1)"]);
}

#[test]
fn test_load_json_chain() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = fixtures::write_file(
        &dir,
        "chain.json",
        r#"{"grayscale": true, "filters": [{"type": "invert"}]}"#,
    );

    let config = ChainConfig::load(&path).unwrap();
    assert!(config.grayscale);
    assert_eq!(config.filters.len(), 1);
}

#[test]
fn test_json_extension_is_not_parsed_as_yaml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // valid YAML, invalid JSON
    let path = fixtures::write_file(&dir, "chain.json", "filters: []\n");
    assert!(matches!(ChainConfig::load(&path), Err(AppError::Config(_))));
}

#[test]
fn test_parse_error_names_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = fixtures::write_file(&dir, "broken.yaml", "filters:\n  - type: sepia\n");
    match ChainConfig::load(&path) {
        Err(AppError::Config(msg)) => assert!(msg.contains("broken.yaml"), "{msg}"),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_loaded_chain_matches_direct_filters() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = fixtures::write_file(&dir, "chain.yaml", fixtures::THREE_FILTER_CHAIN);
    let chain = ChainConfig::load(&path)
        .unwrap()
        .build_filters()
        .unwrap()
        .into_iter()
        .collect::<pixel_filters::FilterChain>();

    let image = fixtures::gradient(10, 10);
    let via_config = chain.apply(Some(&image)).unwrap();

    let direct = Gamma::new(0.8, 1.0).apply(
        &Convolution::from_kernel(ConvolutionKernel::Sharpen).apply(&Brightness::new(25).apply(&image)),
    );
    assert_same_pixels(&via_config, &direct);
}

#[test]
fn test_default_chain_file_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = fixtures::write_file(&dir, "chain.yaml", DEFAULT_CHAIN_YAML);
    let config = ChainConfig::load(&path).unwrap();
    assert!(!config.grayscale);
    assert_eq!(config.build_filters().unwrap().len(), 2);
}
