/// Configuration, types, and shared structures for asciiplay.
///
/// This crate contains the error taxonomy, playback configuration, frame
/// and grid buffers, the pacing clock, and the seam traits implemented by
/// the source/render/audio crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod ramp;
pub mod state;
pub mod traits;

pub use clock::FrameClock;
pub use config::PlayerConfig;
pub use error::PlayerError;
pub use frame::{FrameBuffer, GlyphFrame, LuminanceGrid};
pub use ramp::GlyphRamp;
pub use state::{ControlKey, PlaybackState};
