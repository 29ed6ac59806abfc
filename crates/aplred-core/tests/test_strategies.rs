use ndarray::Array3;

use aplred_core::frame::Frame;
use aplred_core::metric::apl;
use aplred_core::strategy::border::darken_borders;
use aplred_core::strategy::highlight::compress_highlights;
use aplred_core::strategy::Strategy;

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

// ---------------------------------------------------------------------------
// compress_highlights
// ---------------------------------------------------------------------------

#[test]
fn test_highlight_compression_one_is_identity() {
    let ramp = make_ramp_frame(16, 16);
    for threshold_pct in [0.0, 25.0, 90.0, 100.0] {
        let out = compress_highlights(&ramp, threshold_pct, 1.0);
        assert_eq!(ramp.data, out.data, "threshold {threshold_pct} not identity");
    }
}

#[test]
fn test_highlight_compression_zero_clamps_to_threshold() {
    // threshold_pct=40 -> threshold = 102.0 exactly
    let ramp = make_ramp_frame(16, 16);
    let out = compress_highlights(&ramp, 40.0, 0.0);
    for (before, after) in ramp.data.iter().zip(out.data.iter()) {
        if *before as f32 > 102.0 {
            assert_eq!(*after, 102, "above-threshold sample not clamped");
        } else {
            assert_eq!(*after, *before, "below-threshold sample changed");
        }
    }
}

#[test]
fn test_highlight_below_threshold_unchanged() {
    // Scenario: uniform 200, threshold 90% (229.5) -> untouched.
    let frame = make_frame(8, 8, 3, 200);
    let out = compress_highlights(&frame, 90.0, 0.5);
    assert_eq!(frame.data, out.data);
}

#[test]
fn test_highlight_compresses_above_threshold() {
    // Scenario: uniform 240, threshold 78% (198.9), compression 0.5:
    // 198.9 + (240 - 198.9) * 0.5 = 219.45 -> 219 after quantization.
    let frame = make_frame(8, 8, 1, 240);
    let out = compress_highlights(&frame, 78.0, 0.5);
    for v in out.data.iter() {
        assert_eq!(*v, 219);
    }
}

#[test]
fn test_highlight_preserves_shape() {
    let frame = make_frame(7, 13, 3, 250);
    let out = compress_highlights(&frame, 50.0, 0.3);
    assert_eq!(frame.data.dim(), out.data.dim());
}

// ---------------------------------------------------------------------------
// darken_borders
// ---------------------------------------------------------------------------

#[test]
fn test_border_darkening_one_is_identity() {
    let frame = make_frame(20, 20, 1, 180);
    let out = darken_borders(&frame, 25.0, 1.0);
    assert_eq!(frame.data, out.data);
}

#[test]
fn test_border_zero_width_is_identity() {
    let frame = make_frame(20, 20, 3, 180);
    let out = darken_borders(&frame, 0.0, 0.5);
    assert_eq!(frame.data, out.data);
}

#[test]
fn test_border_tiny_frame_skips_ramp() {
    // 3x3 at 10% -> border width 0; must not divide by zero or change pixels.
    let frame = make_frame(3, 3, 1, 200);
    let out = darken_borders(&frame, 10.0, 0.5);
    assert_eq!(frame.data, out.data);
}

#[test]
fn test_border_vignette_ramp_values() {
    // 100x100 white, border 10%, darkening 0.5.
    let frame = make_frame(100, 100, 1, 255);
    let out = darken_borders(&frame, 10.0, 0.5);

    // Outermost edge, away from corners: 255 * 0.5 = 127.5 -> 127.
    assert_eq!(out.data[[0, 50, 0]], 127);
    assert_eq!(out.data[[99, 50, 0]], 127);
    assert_eq!(out.data[[50, 0, 0]], 127);
    assert_eq!(out.data[[50, 99, 0]], 127);

    // Innermost border row: 255 * (0.5 + 0.5 * 9/10) = 242.25 -> 242.
    assert_eq!(out.data[[9, 50, 0]], 242);
    assert_eq!(out.data[[90, 50, 0]], 242);

    // Interior untouched.
    assert_eq!(out.data[[10, 50, 0]], 255);
    assert_eq!(out.data[[50, 50, 0]], 255);
    assert_eq!(out.data[[89, 89, 0]], 255);

    // Corners compose both ramps: 255 * 0.5 * 0.5 = 63.75 -> 63.
    assert_eq!(out.data[[0, 0, 0]], 63);
    assert_eq!(out.data[[99, 99, 0]], 63);
}

#[test]
fn test_border_applies_same_factor_to_all_channels() {
    let mut data = Array3::<u8>::zeros((40, 40, 3));
    data.fill(200);
    let frame = Frame::new(data);
    let out = darken_borders(&frame, 10.0, 0.5);
    for y in 0..40 {
        for x in 0..40 {
            let r = out.data[[y, x, 0]];
            assert_eq!(r, out.data[[y, x, 1]]);
            assert_eq!(r, out.data[[y, x, 2]]);
        }
    }
}

#[test]
fn test_border_never_brightens() {
    let ramp = make_ramp_frame(32, 32);
    let out = darken_borders(&ramp, 20.0, 0.6);
    for (before, after) in ramp.data.iter().zip(out.data.iter()) {
        assert!(after <= before);
    }
}

// ---------------------------------------------------------------------------
// Strategy dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_all_strategies_no_op_on_black() {
    let strategies = [
        Strategy::Highlight {
            threshold_pct: 90.0,
            compression: 0.5,
        },
        Strategy::Border {
            border_pct: 10.0,
            darkening: 0.5,
        },
        Strategy::Zone {
            target_apl: 25.0,
            zone_size: 16,
        },
    ];
    for channels in [1, 3] {
        let black = make_frame(32, 32, channels, 0);
        for strategy in &strategies {
            let out = strategy.apply(&black);
            assert_eq!(
                black.data,
                out.data,
                "{} changed an all-black frame",
                strategy.name()
            );
            assert_eq!(apl(&out), 0.0);
        }
    }
}

#[test]
fn test_all_strategies_preserve_shape() {
    let strategies = [
        Strategy::Highlight {
            threshold_pct: 50.0,
            compression: 0.2,
        },
        Strategy::Border {
            border_pct: 15.0,
            darkening: 0.7,
        },
        Strategy::Zone {
            target_apl: 10.0,
            zone_size: 8,
        },
    ];
    for channels in [1, 3] {
        let frame = make_frame(30, 50, channels, 230);
        for strategy in &strategies {
            let out = strategy.apply(&frame);
            assert_eq!(frame.data.dim(), out.data.dim(), "{}", strategy.name());
        }
    }
}
