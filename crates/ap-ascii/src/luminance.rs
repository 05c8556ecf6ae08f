use ap_core::frame::{FrameBuffer, LuminanceGrid};

/// Convert a decoded RGB frame to a normalized brightness grid.
///
/// Per pixel: BT.709 grayscale, then the linear contrast adjustment
/// `alpha × l + beta` clamped to the 0..255 domain, then normalization and
/// gamma correction `v^gamma`.
///
/// # Example
/// ```
/// use ap_core::frame::FrameBuffer;
/// use ap_ascii::luminance_grid;
/// let mut fb = FrameBuffer::new(1, 1);
/// fb.data.copy_from_slice(&[255, 255, 255]);
/// let grid = luminance_grid(&fb, 1.0, 0.0, 1.0);
/// assert_eq!(grid.get(0, 0), 1.0);
/// ```
#[must_use]
pub fn luminance_grid(frame: &FrameBuffer, alpha: f32, beta: f32, gamma: f32) -> LuminanceGrid {
    let w = frame.width.min(u32::from(u16::MAX)) as u16;
    let h = frame.height.min(u32::from(u16::MAX)) as u16;
    let mut grid = LuminanceGrid::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let l = f32::from(frame.luminance(u32::from(x), u32::from(y)));
            let adjusted = (alpha * l + beta).clamp(0.0, 255.0);
            grid.set(x, y, (adjusted / 255.0).powf(gamma));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, value: u8) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        fb.data.fill(value);
        fb
    }

    #[test]
    fn neutral_settings_normalize_linearly() {
        let grid = luminance_grid(&solid(2, 2, 128), 1.0, 0.0, 1.0);
        let expected = 128.0 / 255.0;
        for y in 0..2 {
            for x in 0..2 {
                assert!((grid.get(x, y) - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn contrast_saturates_at_white() {
        // alpha 1.2, beta 10 pushes a bright pixel past 255; must clamp.
        let grid = luminance_grid(&solid(1, 1, 250), 1.2, 10.0, 1.0);
        assert_eq!(grid.get(0, 0), 1.0);
    }

    #[test]
    fn gamma_lifts_midtones() {
        // gamma 0.8 < 1 brightens values below white.
        let flat = luminance_grid(&solid(1, 1, 128), 1.0, 0.0, 1.0);
        let lifted = luminance_grid(&solid(1, 1, 128), 1.0, 0.0, 0.8);
        assert!(lifted.get(0, 0) > flat.get(0, 0));
    }

    #[test]
    fn black_stays_black() {
        let grid = luminance_grid(&solid(3, 1, 0), 1.2, 0.0, 0.8);
        assert_eq!(grid.get(0, 0), 0.0);
    }
}
