use approx::assert_abs_diff_eq;
use ndarray::{s, Array3};

use aplred_core::frame::Frame;
use aplred_core::metric::{apl, apl_of};

fn make_frame(h: usize, w: usize, c: usize, fill: u8) -> Frame {
    Frame::new(Array3::from_elem((h, w, c), fill))
}

fn make_ramp_frame(h: usize, w: usize) -> Frame {
    let mut data = Array3::<u8>::zeros((h, w, 1));
    for y in 0..h {
        for x in 0..w {
            data[[y, x, 0]] = (((y * w + x) * 255) / (h * w)) as u8;
        }
    }
    Frame::new(data)
}

#[test]
fn test_apl_black_is_zero() {
    assert_abs_diff_eq!(apl(&make_frame(8, 8, 1, 0)), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(apl(&make_frame(8, 8, 3, 0)), 0.0, epsilon = 1e-9);
}

#[test]
fn test_apl_white_is_hundred() {
    assert_abs_diff_eq!(apl(&make_frame(8, 8, 1, 255)), 100.0, epsilon = 1e-9);
    // BT.709 weights sum to 1, so uniform white is 100% in color too.
    assert_abs_diff_eq!(apl(&make_frame(8, 8, 3, 255)), 100.0, epsilon = 1e-6);
}

#[test]
fn test_apl_mono_is_mean_over_range() {
    // 51 / 255 = 20%
    assert_abs_diff_eq!(apl(&make_frame(4, 4, 1, 51)), 20.0, epsilon = 1e-9);
}

#[test]
fn test_apl_uses_bt709_weights() {
    let mut data = Array3::<u8>::zeros((2, 2, 3));
    data.slice_mut(s![.., .., 0]).fill(255); // pure red
    let frame = Frame::new(data);
    assert_abs_diff_eq!(apl(&frame), 21.26, epsilon = 1e-6);

    let mut data = Array3::<u8>::zeros((2, 2, 3));
    data.slice_mut(s![.., .., 1]).fill(255); // pure green
    let frame = Frame::new(data);
    assert_abs_diff_eq!(apl(&frame), 71.52, epsilon = 1e-6);

    let mut data = Array3::<u8>::zeros((2, 2, 3));
    data.slice_mut(s![.., .., 2]).fill(255); // pure blue
    let frame = Frame::new(data);
    assert_abs_diff_eq!(apl(&frame), 7.22, epsilon = 1e-6);
}

#[test]
fn test_apl_always_in_bounds() {
    let ramp = make_ramp_frame(16, 16);
    let value = apl(&ramp);
    assert!((0.0..=100.0).contains(&value), "APL out of bounds: {value}");
}

#[test]
fn test_apl_of_region_matches_full_frame_semantics() {
    // A sub-region view is scored exactly like a standalone frame of the
    // same contents.
    let mut data = Array3::<u8>::zeros((8, 8, 1));
    data.slice_mut(s![0..4, 0..4, ..]).fill(200);
    let frame = Frame::new(data);

    let region = frame.data.slice(s![0..4, 0..4, ..]);
    let standalone = make_frame(4, 4, 1, 200);
    assert_abs_diff_eq!(apl_of(region), apl(&standalone), epsilon = 1e-9);

    let dark_region = frame.data.slice(s![4..8, 4..8, ..]);
    assert_abs_diff_eq!(apl_of(dark_region), 0.0, epsilon = 1e-9);
}

#[test]
fn test_apl_empty_region_is_zero() {
    let frame = make_frame(8, 8, 1, 200);
    let empty = frame.data.slice(s![0..0, .., ..]);
    assert_abs_diff_eq!(apl_of(empty), 0.0, epsilon = 1e-9);
}
