/// Pixel → glyph conversion for asciiplay.
///
/// Pure functions only: luminance extraction (grayscale + contrast + gamma),
/// aspect-preserving scaling with centered letterbox padding, and glyph-frame
/// composition through a brightness ramp. No terminal I/O here.

pub mod luminance;
pub mod render;
pub mod scale;

pub use luminance::luminance_grid;
pub use render::glyph_frame;
pub use scale::scale_to;
