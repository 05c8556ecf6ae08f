/// 10 characters, the classic compact ramp.
pub const RAMP_COMPACT: &str = " .:-=+*#%@";

/// 70 characters, the extended Paul Bourke set.
pub const RAMP_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Unicode block elements, pseudo-pixels.
pub const RAMP_BLOCKS: &str = " ░▒▓█";

/// Ordered glyph ramp mapping normalized brightness to a character.
///
/// The ramp runs darkest → brightest. Lookup is
/// `clamp(round(b × (K−1)), 0, K−1)`; inputs are clamped, so mapping
/// never fails.
///
/// # Example
/// ```
/// use ap_core::ramp::GlyphRamp;
/// let ramp = GlyphRamp::new(" .:#@");
/// assert_eq!(ramp.glyph(0.0), ' ');
/// assert_eq!(ramp.glyph(1.0), '@');
/// ```
#[derive(Clone)]
pub struct GlyphRamp {
    chars: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a string ordered darkest → brightest.
    ///
    /// A ramp needs at least two glyphs to encode brightness; shorter
    /// input falls back to a minimal two-glyph ramp.
    #[must_use]
    pub fn new(ramp: &str) -> Self {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.len() < 2 {
            return Self {
                chars: vec![' ', '@'],
            };
        }
        Self { chars }
    }

    /// Number of glyphs in the ramp.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// `true` is unreachable: construction guarantees at least two glyphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Darkest glyph, used to fill letterbox padding.
    #[must_use]
    pub fn darkest(&self) -> char {
        self.chars[0]
    }

    /// Ramp index for a brightness value, clamped to [0, K−1].
    #[inline(always)]
    #[must_use]
    pub fn index(&self, brightness: f32) -> usize {
        let k = self.chars.len() - 1;
        let idx = (brightness.clamp(0.0, 1.0) * k as f32).round() as usize;
        idx.min(k)
    }

    /// Glyph for a brightness value in [0, 1]. Out-of-range input is clamped.
    ///
    /// # Example
    /// ```
    /// use ap_core::ramp::GlyphRamp;
    /// let ramp = GlyphRamp::new(" .:#@");
    /// assert_eq!(ramp.glyph(0.5), ':');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, brightness: f32) -> char {
        self.chars[self.index(brightness)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_extremes() {
        let ramp = GlyphRamp::new(RAMP_COMPACT);
        assert_eq!(ramp.glyph(0.0), ' ');
        assert_eq!(ramp.glyph(1.0), '@');
    }

    #[test]
    fn clamps_out_of_range() {
        let ramp = GlyphRamp::new(" .:#@");
        assert_eq!(ramp.glyph(-3.0), ' ');
        assert_eq!(ramp.glyph(7.5), '@');
        assert_eq!(ramp.glyph(f32::NAN.clamp(0.0, 1.0)), ' ');
    }

    #[test]
    fn monotonic_over_brightness() {
        let ramp = GlyphRamp::new(RAMP_COMPACT);
        let mut prev = 0usize;
        for step in 0..=1000 {
            let b = step as f32 / 1000.0;
            let idx = ramp.index(b);
            assert!(idx >= prev, "ramp index not monotonic at b={b}");
            prev = idx;
        }
    }

    #[test]
    fn mid_gray_hits_mid_ramp() {
        // 10-glyph ramp: round(0.5 × 9) = 5 → '+'.
        let ramp = GlyphRamp::new(RAMP_COMPACT);
        assert_eq!(ramp.glyph(0.5), '+');
    }

    #[test]
    fn degenerate_ramp_falls_back() {
        let ramp = GlyphRamp::new("x");
        assert_eq!(ramp.len(), 2);
        assert_eq!(ramp.darkest(), ' ');
    }
}
