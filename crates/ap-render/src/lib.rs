/// Terminal output and input for asciiplay.
///
/// `surface` owns the clear-and-write display sink (full repaint per tick),
/// `status` formats the one-line playback readout, and `input` polls control
/// keys without blocking and without input-mode changes that outlive a poll.

pub mod input;
pub mod status;
pub mod surface;

pub use input::KeyMonitor;
pub use status::format_status;
pub use surface::{TermSurface, discover_grid};
