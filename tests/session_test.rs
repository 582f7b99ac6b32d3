//! Editing session behaviour: select, remove, redo, grayscale base.

mod common;

use common::{assert_same_pixels, fixtures};
use pixel_filters::{
    Convolution, ConvolutionKernel, Filter, FilterChain, FilterError, Gamma, ImageFilter, Invert,
};
use pixfilt::presets::Preset;
use pixfilt::services::EditorSession;
use pretty_assertions::assert_eq;

fn loaded_session() -> EditorSession {
    let mut session = EditorSession::new();
    session.load(fixtures::gradient(9, 7)).unwrap();
    session
}

#[test]
fn test_removing_middle_filter_reapplies_from_original() {
    let mut session = loaded_session();
    session.select(Filter::brightness(30)).unwrap();
    session.select(Convolution::from_kernel(ConvolutionKernel::EdgeDetection)).unwrap();
    session.select(Gamma::default()).unwrap();

    let after_remove = session.remove(1).unwrap().clone();

    let original = session.original().unwrap().clone();
    let expected = Gamma::default().apply(&Filter::brightness(30).apply(&original));
    assert_same_pixels(&after_remove, &expected);
}

#[test]
fn test_redo_restores_in_removal_order() {
    let mut session = loaded_session();
    for preset in [Preset::Invert, Preset::Blur, Preset::Contrast] {
        session.select(preset.filter()).unwrap();
    }

    session.remove(2).unwrap(); // contrast
    session.remove(0).unwrap(); // invert
    assert_eq!(session.chain().labels(), vec!["blur"]);
    assert_eq!(session.redo_len(), 2);

    let redone = session.redo().unwrap().clone();
    assert_eq!(session.chain().labels(), vec!["blur", "Contrast +30%", "Invert"]);
    assert_eq!(session.redo_len(), 0);

    let expected: FilterChain = [Preset::Blur, Preset::Contrast, Preset::Invert]
        .into_iter()
        .map(Preset::filter)
        .collect();
    assert_same_pixels(&redone, &expected.apply(session.original()).unwrap());
}

#[test]
fn test_removing_everything_renders_original() {
    let mut session = loaded_session();
    session.select(Invert).unwrap();
    let out = session.remove(0).unwrap().clone();
    assert_same_pixels(&out, &fixtures::gradient(9, 7));
}

#[test]
fn test_grayscale_toggle_rerenders() {
    let mut session = loaded_session();
    session.select(Invert).unwrap();
    let color = session.rendered().unwrap().clone();

    session.set_grayscale(true).unwrap();
    let gray = session.rendered().unwrap().clone();
    let px = gray.pixel(3, 3).unwrap();
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);

    session.set_grayscale(false).unwrap();
    assert_same_pixels(session.rendered().unwrap(), &color);
}

#[test]
fn test_no_image_loaded() {
    let mut session = EditorSession::new();
    assert_eq!(
        session.set_grayscale(true).unwrap_err(),
        FilterError::NullSource
    );
    assert!(session.rendered().is_none());
}
