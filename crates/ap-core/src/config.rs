use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Full playback configuration.
///
/// Serializable to TOML. Every field has a sane default so a missing or
/// partial config file still yields a playable setup.
///
/// # Example
/// ```
/// use ap_core::config::PlayerConfig;
/// let config = PlayerConfig::default();
/// assert_eq!(config.gamma, 0.8);
/// assert_eq!(config.windowed_width, 100);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerConfig {
    // === Rendu ===
    /// Glyph ramp, darkest → brightest. Denser ramps trade throughput
    /// for fidelity.
    pub ramp: String,
    /// Brightness curve exponent applied after normalization.
    pub gamma: f32,
    /// Linear contrast gain applied on the 0..255 domain.
    pub contrast_alpha: f32,
    /// Linear contrast offset applied on the 0..255 domain.
    pub contrast_beta: f32,

    // === Grille ===
    /// Target grid in windowed mode.
    pub windowed_width: u16,
    /// Target grid height in windowed mode.
    pub windowed_height: u16,
    /// Target grid in fullscreen mode.
    pub fullscreen_width: u16,
    /// Target grid height in fullscreen mode.
    pub fullscreen_height: u16,
    /// Upper bound when adopting the discovered terminal width.
    pub max_columns: u16,
    /// Upper bound when adopting the discovered terminal height.
    pub max_rows: u16,

    // === Contrôles ===
    /// Lower speed-multiplier bound.
    pub speed_min: f32,
    /// Upper speed-multiplier bound.
    pub speed_max: f32,
    /// Idle interval between input polls while paused, in milliseconds.
    pub pause_poll_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            ramp: crate::ramp::RAMP_COMPACT.to_string(),
            gamma: 0.8,
            contrast_alpha: 1.2,
            contrast_beta: 10.0,
            windowed_width: 100,
            windowed_height: 30,
            fullscreen_width: 150,
            fullscreen_height: 45,
            max_columns: 120,
            max_rows: 40,
            speed_min: 0.1,
            speed_max: 3.0,
            pause_poll_ms: 100,
        }
    }
}

impl PlayerConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.gamma = self.gamma.clamp(0.1, 4.0);
        self.contrast_alpha = self.contrast_alpha.clamp(0.0, 4.0);
        self.contrast_beta = self.contrast_beta.clamp(-128.0, 128.0);
        self.windowed_width = self.windowed_width.max(1);
        self.windowed_height = self.windowed_height.max(1);
        self.fullscreen_width = self.fullscreen_width.max(1);
        self.fullscreen_height = self.fullscreen_height.max(1);
        self.max_columns = self.max_columns.max(1);
        self.max_rows = self.max_rows.max(1);
        self.speed_min = self.speed_min.clamp(0.01, 1.0);
        self.speed_max = self.speed_max.clamp(self.speed_min, 10.0);
        self.pause_poll_ms = self.pause_poll_ms.clamp(10, 1000);
    }

    /// Target grid for the given display mode, before terminal clamping.
    #[must_use]
    pub fn grid_preset(&self, fullscreen: bool) -> (u16, u16) {
        if fullscreen {
            (self.fullscreen_width, self.fullscreen_height)
        } else {
            (self.windowed_width, self.windowed_height)
        }
    }

    /// Adopt a discovered terminal size, reserving two rows for the status
    /// line and the cursor, capped at the configured maxima.
    #[must_use]
    pub fn clamp_to_terminal(&self, columns: u16, rows: u16) -> (u16, u16) {
        let w = columns.min(self.max_columns).max(1);
        let h = rows.saturating_sub(2).min(self.max_rows).max(1);
        (w, h)
    }
}

/// Intermediate TOML structure, all fields optional for partial override.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    grid: Option<GridSection>,
    controls: Option<ControlsSection>,
}

#[derive(Deserialize)]
struct RenderSection {
    ramp: Option<String>,
    gamma: Option<f32>,
    contrast_alpha: Option<f32>,
    contrast_beta: Option<f32>,
}

#[derive(Deserialize)]
struct GridSection {
    windowed_width: Option<u16>,
    windowed_height: Option<u16>,
    fullscreen_width: Option<u16>,
    fullscreen_height: Option<u16>,
    max_columns: Option<u16>,
    max_rows: Option<u16>,
}

#[derive(Deserialize)]
struct ControlsSection {
    speed_min: Option<f32>,
    speed_max: Option<f32>,
    pause_poll_ms: Option<u64>,
}

/// Load a TOML config file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ap_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PlayerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("TOML parse error in {}", path.display()))?;

    let mut config = PlayerConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.ramp {
            config.ramp = v;
        }
        if let Some(v) = r.gamma {
            config.gamma = v;
        }
        if let Some(v) = r.contrast_alpha {
            config.contrast_alpha = v;
        }
        if let Some(v) = r.contrast_beta {
            config.contrast_beta = v;
        }
    }

    if let Some(g) = file.grid {
        if let Some(v) = g.windowed_width {
            config.windowed_width = v;
        }
        if let Some(v) = g.windowed_height {
            config.windowed_height = v;
        }
        if let Some(v) = g.fullscreen_width {
            config.fullscreen_width = v;
        }
        if let Some(v) = g.fullscreen_height {
            config.fullscreen_height = v;
        }
        if let Some(v) = g.max_columns {
            config.max_columns = v;
        }
        if let Some(v) = g.max_rows {
            config.max_rows = v;
        }
    }

    if let Some(c) = file.controls {
        if let Some(v) = c.speed_min {
            config.speed_min = v;
        }
        if let Some(v) = c.speed_max {
            config.speed_max = v;
        }
        if let Some(v) = c.pause_poll_ms {
            config.pause_poll_ms = v;
        }
    }

    config.clamp_all();
    Ok(config)
}
