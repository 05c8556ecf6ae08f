use ap_core::error::PlayerError;
use ap_core::frame::LuminanceGrid;

/// Fitted dimensions preserving the source aspect ratio inside the target.
///
/// Rounding overshoot is clamped so the result never exceeds the target.
#[must_use]
pub fn fit_dims(src_w: u16, src_h: u16, dst_w: u16, dst_h: u16) -> (u16, u16) {
    let src_aspect = f64::from(src_w) / f64::from(src_h);
    let dst_aspect = f64::from(dst_w) / f64::from(dst_h);
    let (new_w, new_h) = if src_aspect > dst_aspect {
        // Fit width, letterbox top/bottom.
        (
            f64::from(dst_w),
            (f64::from(dst_w) / src_aspect).round().max(1.0),
        )
    } else {
        // Fit height, letterbox left/right.
        (
            (f64::from(dst_h) * src_aspect).round().max(1.0),
            f64::from(dst_h),
        )
    };
    ((new_w as u16).min(dst_w).max(1), (new_h as u16).min(dst_h).max(1))
}

/// Aspect-preserving resize of `src` into an exactly `dst_w × dst_h` grid.
///
/// The resampled region is centered; uncovered border cells are zero
/// brightness. Area averaging is used when shrinking, bilinear interpolation
/// when growing; a smoothness choice, not a correctness one. A source whose
/// dimensions already equal the target is returned as-is, which makes
/// re-scaling an already-padded frame a no-op.
///
/// # Errors
/// Returns `InvalidFrame` for a zero-area source or target.
///
/// # Example
/// ```
/// use ap_core::frame::LuminanceGrid;
/// use ap_ascii::scale_to;
/// let src = LuminanceGrid::new(16, 16);
/// let out = scale_to(&src, 4, 2).unwrap();
/// assert_eq!((out.width, out.height), (4, 2));
/// ```
pub fn scale_to(src: &LuminanceGrid, dst_w: u16, dst_h: u16) -> Result<LuminanceGrid, PlayerError> {
    if src.width == 0 || src.height == 0 || dst_w == 0 || dst_h == 0 {
        return Err(PlayerError::InvalidFrame {
            width: u32::from(src.width),
            height: u32::from(src.height),
        });
    }
    if src.width == dst_w && src.height == dst_h {
        return Ok(src.clone());
    }

    let (new_w, new_h) = fit_dims(src.width, src.height, dst_w, dst_h);
    let resampled = if new_w <= src.width && new_h <= src.height {
        area_average(src, new_w, new_h)
    } else {
        bilinear(src, new_w, new_h)
    };

    let mut out = LuminanceGrid::new(dst_w, dst_h);
    let pad_left = (dst_w - new_w) / 2;
    let pad_top = (dst_h - new_h) / 2;
    for y in 0..new_h {
        for x in 0..new_w {
            out.set(x + pad_left, y + pad_top, resampled.get(x, y));
        }
    }
    Ok(out)
}

/// Shrink by averaging every source cell covered by each output cell.
fn area_average(src: &LuminanceGrid, new_w: u16, new_h: u16) -> LuminanceGrid {
    let mut out = LuminanceGrid::new(new_w, new_h);
    let cell_w = f64::from(src.width) / f64::from(new_w);
    let cell_h = f64::from(src.height) / f64::from(new_h);
    for cy in 0..new_h {
        for cx in 0..new_w {
            let x0 = (f64::from(cx) * cell_w) as u16;
            let x1 = ((f64::from(cx) + 1.0) * cell_w) as u16;
            let y0 = (f64::from(cy) * cell_h) as u16;
            let y1 = ((f64::from(cy) + 1.0) * cell_h) as u16;
            let x1 = x1.clamp(x0 + 1, src.width);
            let y1 = y1.clamp(y0 + 1, src.height);

            let mut sum = 0.0f64;
            for y in y0..y1 {
                for x in x0..x1 {
                    sum += f64::from(src.get(x, y));
                }
            }
            let count = f64::from(x1 - x0) * f64::from(y1 - y0);
            out.set(cx, cy, (sum / count) as f32);
        }
    }
    out
}

/// Grow by sampling linearly between the four nearest source cells.
fn bilinear(src: &LuminanceGrid, new_w: u16, new_h: u16) -> LuminanceGrid {
    let mut out = LuminanceGrid::new(new_w, new_h);
    let sx = f64::from(src.width) / f64::from(new_w);
    let sy = f64::from(src.height) / f64::from(new_h);
    for cy in 0..new_h {
        for cx in 0..new_w {
            let fx = ((f64::from(cx) + 0.5) * sx - 0.5).clamp(0.0, f64::from(src.width - 1));
            let fy = ((f64::from(cy) + 0.5) * sy - 0.5).clamp(0.0, f64::from(src.height - 1));
            let x0 = fx as u16;
            let y0 = fy as u16;
            let x1 = (x0 + 1).min(src.width - 1);
            let y1 = (y0 + 1).min(src.height - 1);
            let tx = (fx - f64::from(x0)) as f32;
            let ty = (fy - f64::from(y0)) as f32;

            let top = src.get(x0, y0) * (1.0 - tx) + src.get(x1, y0) * tx;
            let bottom = src.get(x0, y1) * (1.0 - tx) + src.get(x1, y1) * tx;
            out.set(cx, cy, top * (1.0 - ty) + bottom * ty);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u16, h: u16, value: f32) -> LuminanceGrid {
        let mut g = LuminanceGrid::new(w, h);
        g.values.fill(value);
        g
    }

    #[test]
    fn output_dims_always_match_target() {
        let sources = [(1u16, 1u16), (3, 7), (640, 360), (360, 640), (100, 100)];
        let targets = [(1u16, 1u16), (4, 2), (100, 30), (150, 45), (7, 13)];
        for &(sw, sh) in &sources {
            for &(dw, dh) in &targets {
                let out = scale_to(&solid(sw, sh, 0.5), dw, dh).unwrap();
                assert_eq!((out.width, out.height), (dw, dh), "src {sw}x{sh} dst {dw}x{dh}");
            }
        }
    }

    #[test]
    fn fit_preserves_aspect_within_one_cell() {
        let cases = [(640u16, 360u16), (360, 640), (1, 100), (100, 1), (853, 480)];
        for &(sw, sh) in &cases {
            let (nw, nh) = fit_dims(sw, sh, 120, 40);
            assert!(nw <= 120 && nh <= 40);
            let aspect = f64::from(sw) / f64::from(sh);
            let err = if nw == 120 {
                f64::from(nh) - f64::from(nw) / aspect
            } else {
                f64::from(nw) - f64::from(nh) * aspect
            };
            assert!(err.abs() <= 1.0, "{sw}x{sh}: fit {nw}x{nh}, err {err}");
        }
    }

    #[test]
    fn padding_is_centered_and_dark() {
        // Square source into a wide grid: letterbox columns on both sides.
        let out = scale_to(&solid(2, 2, 1.0), 6, 2).unwrap();
        for y in 0..2 {
            for x in [0u16, 1, 4, 5] {
                assert_eq!(out.get(x, y), 0.0, "pad cell ({x},{y})");
            }
            for x in [2u16, 3] {
                assert!(out.get(x, y) > 0.9, "content cell ({x},{y})");
            }
        }
    }

    #[test]
    fn rescaling_padded_output_is_identity() {
        let once = scale_to(&solid(16, 9, 0.7), 100, 30).unwrap();
        let twice = scale_to(&once, 100, 30).unwrap();
        assert!(once == twice);
    }

    #[test]
    fn zero_area_source_is_invalid() {
        let src = LuminanceGrid {
            values: Vec::new(),
            width: 0,
            height: 4,
        };
        assert!(matches!(
            scale_to(&src, 4, 2),
            Err(PlayerError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn uniform_brightness_survives_resampling() {
        let out = scale_to(&solid(64, 64, 0.5), 4, 2).unwrap();
        // Content region keeps the source value exactly; pads are zero.
        let mut content = 0;
        for v in &out.values {
            if *v != 0.0 {
                assert!((v - 0.5).abs() < 1e-5);
                content += 1;
            }
        }
        assert!(content > 0);
    }

    #[test]
    fn upscale_path_is_exercised() {
        let out = scale_to(&solid(2, 2, 0.25), 40, 40).unwrap();
        assert!((out.get(20, 20) - 0.25).abs() < 1e-5);
    }
}
