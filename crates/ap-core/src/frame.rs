/// Decoded pixel buffer for one instant of the stream.
///
/// Stores RGB24 row-major, 3 bytes per pixel, as produced by the decoder
/// pipe. Ephemeral: consumed by the scaler and discarded after the tick.
///
/// # Example
/// ```
/// use ap_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 300);
/// ```
pub struct FrameBuffer {
    /// Pixels RGB, row-major, 3 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Create a zeroed buffer with the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 3) as usize],
            width,
            height,
        }
    }

    /// Byte length of one decoded frame at these dimensions.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        (self.width * self.height * 3) as usize
    }

    /// Pixel at (x, y) → (r, g, b).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 3) as usize;
        if idx + 2 >= self.data.len() {
            return (0, 0, 0);
        }
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Perceptual BT.709 luminance of pixel (x, y), in [0, 255].
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(1, 1);
    /// fb.data.copy_from_slice(&[255, 255, 255]);
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b) = self.pixel(x, y);
        ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
    }
}

/// Grid of normalized brightness values in [0, 1], row-major.
///
/// Produced from a `FrameBuffer` after grayscale conversion, contrast
/// adjustment, and gamma correction. Owned by a single render tick.
#[derive(Clone, PartialEq)]
pub struct LuminanceGrid {
    /// Brightness values in [0, 1], row-major.
    pub values: Vec<f32>,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl LuminanceGrid {
    /// Create a zeroed grid.
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::LuminanceGrid;
    /// let g = LuminanceGrid::new(4, 2);
    /// assert_eq!(g.values.len(), 8);
    /// ```
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            values: vec![0.0; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Brightness at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> f32 {
        self.values[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// Set brightness at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, value: f32) {
        self.values[usize::from(y) * usize::from(self.width) + usize::from(x)] = value;
    }
}

/// Fixed-size character grid matching the terminal target dimensions.
///
/// Invariant: every cell is written before render; padded letterbox cells
/// carry the darkest glyph of the active ramp.
///
/// # Example
/// ```
/// use ap_core::frame::GlyphFrame;
/// let mut gf = GlyphFrame::new(4, 2, ' ');
/// gf.set(0, 0, '@');
/// assert_eq!(gf.get(0, 0), '@');
/// ```
#[derive(Clone, PartialEq)]
pub struct GlyphFrame {
    /// Flat array of glyphs, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

impl GlyphFrame {
    /// Create a grid filled with `fill`.
    #[must_use]
    pub fn new(width: u16, height: u16, fill: char) -> Self {
        Self {
            cells: vec![fill; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Glyph at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> char {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// Set the glyph at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)] = ch;
    }

    /// Append the full grid to `out`, one newline-terminated row at a time.
    ///
    /// `out` is a reusable scratch buffer; callers clear it between ticks.
    pub fn write_to(&self, out: &mut String) {
        out.reserve(usize::from(self.width).saturating_add(1) * usize::from(self.height));
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.get(x, y));
            }
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_extremes() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.data[3] = 255;
        fb.data[4] = 255;
        fb.data[5] = 255;
        assert_eq!(fb.luminance(0, 0), 0);
        assert_eq!(fb.luminance(1, 0), 255);
    }

    #[test]
    fn glyph_frame_rows_are_newline_terminated() {
        let gf = GlyphFrame::new(3, 2, '.');
        let mut out = String::new();
        gf.write_to(&mut out);
        assert_eq!(out, "...\n...\n");
    }

    #[test]
    fn grid_set_get_roundtrip() {
        let mut g = LuminanceGrid::new(3, 3);
        g.set(2, 1, 0.5);
        assert_eq!(g.get(2, 1), 0.5);
        assert_eq!(g.get(0, 0), 0.0);
    }
}
