use ap_core::frame::{GlyphFrame, LuminanceGrid};
use ap_core::ramp::GlyphRamp;

/// Map a brightness grid to a fully populated glyph frame.
///
/// The frame is created pre-filled with the ramp's darkest glyph and every
/// cell is then written, so no cell is ever left unset; letterbox zeros
/// land on the darkest glyph by the ramp's own mapping.
///
/// # Example
/// ```
/// use ap_core::frame::LuminanceGrid;
/// use ap_core::ramp::GlyphRamp;
/// use ap_ascii::glyph_frame;
/// let ramp = GlyphRamp::new(" .:-=+*#%@");
/// let grid = LuminanceGrid::new(4, 2);
/// let gf = glyph_frame(&grid, &ramp);
/// assert!(gf.cells.iter().all(|&c| c == ' '));
/// ```
#[must_use]
pub fn glyph_frame(grid: &LuminanceGrid, ramp: &GlyphRamp) -> GlyphFrame {
    let mut frame = GlyphFrame::new(grid.width, grid.height, ramp.darkest());
    for y in 0..grid.height {
        for x in 0..grid.width {
            frame.set(x, y, ramp.glyph(grid.get(x, y)));
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use ap_core::ramp::RAMP_COMPACT;

    #[test]
    fn uniform_mid_gray_yields_mid_ramp_grid() {
        let ramp = GlyphRamp::new(RAMP_COMPACT);
        let mut grid = LuminanceGrid::new(4, 2);
        grid.values.fill(0.5);
        let gf = glyph_frame(&grid, &ramp);
        assert_eq!((gf.width, gf.height), (4, 2));
        assert!(gf.cells.iter().all(|&c| c == '+'));
    }

    #[test]
    fn zero_brightness_maps_to_darkest() {
        let ramp = GlyphRamp::new(RAMP_COMPACT);
        let gf = glyph_frame(&LuminanceGrid::new(3, 3), &ramp);
        assert!(gf.cells.iter().all(|&c| c == ramp.darkest()));
    }
}
