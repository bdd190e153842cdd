//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.toolshelf/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::render::Stagger;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// URL or file path of the catalog document.
    pub source: Option<String>,
}

/// Timing overrides, all in milliseconds.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnimationConfig {
    pub transition_ms: Option<u64>,
    pub lock_ms: Option<u64>,
    pub feedback_ms: Option<u64>,
    pub panel_slide_ms: Option<u64>,
    pub reveal_base_ms: Option<u64>,
    pub stagger_step_ms: Option<u64>,
    pub entry_fade_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    /// Redraw interval while an animation is running.
    pub frame_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CATALOG_SOURCE: &str = "tools.json";
pub const DEFAULT_TRANSITION_MS: u64 = 800;
pub const DEFAULT_LOCK_MS: u64 = 800;
pub const DEFAULT_FEEDBACK_MS: u64 = 300;
pub const DEFAULT_PANEL_SLIDE_MS: u64 = 600;
pub const DEFAULT_REVEAL_BASE_MS: u64 = 50;
pub const DEFAULT_STAGGER_STEP_MS: u64 = 100;
pub const DEFAULT_ENTRY_FADE_MS: u64 = 500;
pub const DEFAULT_FRAME_MS: u64 = 33;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Fixed durations of every animated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Home↔Categories slide.
    pub transition: Duration,
    /// How long scroll transitions stay blocked. Never shorter than `transition`.
    pub lock: Duration,
    /// Selection ripple before the tools panel appears.
    pub feedback: Duration,
    pub panel_slide: Duration,
    pub reveal_base: Duration,
    pub stagger_step: Duration,
    /// Fade/offset animation of a single revealed entry.
    pub entry_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(DEFAULT_TRANSITION_MS),
            lock: Duration::from_millis(DEFAULT_LOCK_MS),
            feedback: Duration::from_millis(DEFAULT_FEEDBACK_MS),
            panel_slide: Duration::from_millis(DEFAULT_PANEL_SLIDE_MS),
            reveal_base: Duration::from_millis(DEFAULT_REVEAL_BASE_MS),
            stagger_step: Duration::from_millis(DEFAULT_STAGGER_STEP_MS),
            entry_fade: Duration::from_millis(DEFAULT_ENTRY_FADE_MS),
        }
    }
}

impl Timings {
    pub fn stagger(&self) -> Stagger {
        Stagger {
            base: self.reveal_base,
            step: self.stagger_step,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub catalog_source: String,
    pub timings: Timings,
    pub frame_interval: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.toolshelf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".toolshelf").join("config.toml"))
}

/// Load config from `~/.toolshelf/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShelfConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShelfConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShelfConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ShelfConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<ShelfConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShelfConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Toolshelf Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [catalog]
# source = "tools.json"              # File path or http(s) URL. Or set TOOLSHELF_CATALOG.

# [animation]                        # All values in milliseconds
# transition_ms = 800                # Home <-> Categories slide
# lock_ms = 800                      # Scroll lock, never shorter than transition_ms
# feedback_ms = 300                  # Selection ripple before the tools panel opens
# panel_slide_ms = 600
# reveal_base_ms = 50                # Delay before the first tool appears
# stagger_step_ms = 100              # Extra delay per tool
# entry_fade_ms = 500

# [ui]
# frame_ms = 33                      # Redraw interval while animating
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_catalog` is the `--catalog` flag (None = not specified).
pub fn resolve(config: &ShelfConfig, cli_catalog: Option<&str>) -> ResolvedConfig {
    // Catalog: CLI → env → config → default
    let catalog_source = cli_catalog
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TOOLSHELF_CATALOG").ok())
        .or_else(|| config.catalog.source.clone())
        .unwrap_or_else(|| DEFAULT_CATALOG_SOURCE.to_string());

    let frame_ms = config.ui.frame_ms.unwrap_or(DEFAULT_FRAME_MS).max(1);

    ResolvedConfig {
        catalog_source,
        timings: resolve_timings(&config.animation),
        frame_interval: Duration::from_millis(frame_ms),
    }
}

fn resolve_timings(animation: &AnimationConfig) -> Timings {
    let ms = |value: Option<u64>, default: u64| Duration::from_millis(value.unwrap_or(default));

    let transition = ms(animation.transition_ms, DEFAULT_TRANSITION_MS);
    let mut lock = ms(animation.lock_ms, DEFAULT_LOCK_MS);
    if lock < transition {
        warn!(
            "lock_ms ({}ms) is shorter than transition_ms ({}ms); using transition_ms",
            lock.as_millis(),
            transition.as_millis()
        );
        lock = transition;
    }

    let mut stagger_step = ms(animation.stagger_step_ms, DEFAULT_STAGGER_STEP_MS);
    if stagger_step.is_zero() {
        warn!("stagger_step_ms must be positive; using 1ms");
        stagger_step = Duration::from_millis(1);
    }

    Timings {
        transition,
        lock,
        feedback: ms(animation.feedback_ms, DEFAULT_FEEDBACK_MS),
        panel_slide: ms(animation.panel_slide_ms, DEFAULT_PANEL_SLIDE_MS),
        reveal_base: ms(animation.reveal_base_ms, DEFAULT_REVEAL_BASE_MS),
        stagger_step,
        entry_fade: ms(animation.entry_fade_ms, DEFAULT_ENTRY_FADE_MS),
    }
}
