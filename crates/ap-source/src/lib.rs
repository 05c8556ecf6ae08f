/// Decoded frame acquisition for asciiplay.
///
/// Video decoding goes through ffmpeg subprocesses (`std::process::Command`)
/// rather than linked codec libraries: `ffprobe` supplies dimensions, frame
/// rate, and frame count; `ffmpeg` streams raw RGB24 frames over stdout.
/// Runtime prerequisites: `ffmpeg` and `ffprobe` in PATH.

pub mod video;

pub use video::{VideoInfo, VideoSource};
