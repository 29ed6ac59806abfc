use crate::frame::Frame;

/// Multiplicative attenuation factors along one axis: a linear ramp from
/// `darkening` at the outermost pixel up to 1.0 at the border/interior
/// boundary, mirrored at the far edge. Overlapping ramps (border wider than
/// half the axis) compose by multiplication.
fn edge_ramp(len: usize, border: usize, darkening: f32) -> Vec<f32> {
    let mut factors = vec![1.0f32; len];
    if border == 0 {
        return factors;
    }
    for i in 0..border.min(len) {
        let f = darkening + (1.0 - darkening) * (i as f32 / border as f32);
        factors[i] *= f;
        factors[len - 1 - i] *= f;
    }
    factors
}

/// Darken the frame borders with a vignette-like falloff.
///
/// `border_pct` sets the ramp width as a percentage of each dimension
/// (independently for rows and columns); `darkening` is the multiplier at
/// the outermost edge (1.0 = no change). Row and column ramps compose at the
/// corners, so corner pixels end up darker than either edge alone.
pub fn darken_borders(frame: &Frame, border_pct: f32, darkening: f32) -> Frame {
    let (h, w, c) = frame.data.dim();
    let border_h = (h as f32 * border_pct / 100.0).floor() as usize;
    let border_w = (w as f32 * border_pct / 100.0).floor() as usize;

    let row_factors = edge_ramp(h, border_h, darkening);
    let col_factors = edge_ramp(w, border_w, darkening);

    let mut data = frame.data.clone();
    for y in 0..h {
        for x in 0..w {
            let m = row_factors[y] * col_factors[x];
            if m < 1.0 {
                for ch in 0..c {
                    let v = data[[y, x, ch]] as f32 * m;
                    data[[y, x, ch]] = v.clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    frame.with_data(data)
}
