use std::path::PathBuf;

use clap::Parser;

use ap_core::ramp::{RAMP_BLOCKS, RAMP_COMPACT, RAMP_STANDARD};

/// asciiplay: real-time terminal ASCII video player.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Video file to play. When omitted, video files in the current
    /// directory are offered interactively.
    pub video: Option<PathBuf>,

    /// Audio track to play alongside the video. Defaults to an audio file
    /// in the current directory whose name matches the video's.
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Play without sound even if a matching audio file exists.
    #[arg(long, default_value_t = false)]
    pub no_audio: bool,

    /// Use the fullscreen grid preset instead of the terminal size.
    #[arg(short, long, default_value_t = false)]
    pub fullscreen: bool,

    /// Glyph ramp: "compact", "standard", "blocks", or a literal
    /// darkest→brightest string.
    #[arg(long)]
    pub ramp: Option<String>,

    /// Override the target grid width in characters.
    #[arg(long)]
    pub width: Option<u16>,

    /// Override the target grid height in characters.
    #[arg(long)]
    pub height: Option<u16>,

    /// TOML configuration file. Default: config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Resolve a `--ramp` argument: named preset or literal ramp string.
#[must_use]
pub fn resolve_ramp(arg: &str) -> String {
    match arg {
        "compact" => RAMP_COMPACT.to_string(),
        "standard" => RAMP_STANDARD.to_string(),
        "blocks" => RAMP_BLOCKS.to_string(),
        literal => literal.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_presets_resolve() {
        assert_eq!(resolve_ramp("compact"), RAMP_COMPACT);
        assert_eq!(resolve_ramp("standard"), RAMP_STANDARD);
        assert_eq!(resolve_ramp("blocks"), RAMP_BLOCKS);
    }

    #[test]
    fn literal_ramp_passes_through() {
        assert_eq!(resolve_ramp(" .#"), " .#");
    }
}
