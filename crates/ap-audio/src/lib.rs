/// Companion audio process for asciiplay.
///
/// Audio is a best-effort side channel: the player starts one external
/// playback process when playback begins and guarantees its termination when
/// playback ends, however it ends. Audio failure is reported, never fatal.

pub mod companion;

pub use companion::AudioCompanion;
