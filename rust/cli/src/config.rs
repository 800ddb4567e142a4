//! Layered session configuration.
//!
//! Values resolve in order default, file (TOML at `$HILO_CONFIG`), environment
//! (`HILO_PACKS`, `HILO_PENETRATION`, `HILO_ROUNDS`, `HILO_SEED`, `HILO_MODE`),
//! then command-line flags. Each value remembers where it came from so `hilo cfg`
//! can report it.

use clap::ValueEnum;
use hilo_engine::errors::GameError;
use hilo_engine::rules::validate_shoe;
use hilo_engine::session::{DEFAULT_PACKS, DEFAULT_PENETRATION, DEFAULT_ROUNDS, SessionConfig};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HILO_CONFIG";

/// Round budget used in interactive mode when none is configured.
pub const INTERACTIVE_ROUNDS: u64 = 20;

/// Cadence and output of the loop around the engine. Never changes a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Few rounds, screen cleared between rounds, narrative log written
    Interactive,
    /// Many rounds, settlement keys appended to the export file
    Batch,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Interactive => "interactive",
            RunMode::Batch => "batch",
        }
    }

    pub fn default_rounds(&self) -> u64 {
        match self {
            RunMode::Interactive => INTERACTIVE_ROUNDS,
            RunMode::Batch => DEFAULT_ROUNDS,
        }
    }

    fn parse(s: &str) -> Option<RunMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Some(RunMode::Interactive),
            "batch" => Some(RunMode::Batch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub packs: u8,
    pub penetration: usize,
    pub rounds: u64,
    pub seed: Option<u64>,
    pub mode: RunMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packs: DEFAULT_PACKS,
            penetration: DEFAULT_PENETRATION,
            rounds: DEFAULT_ROUNDS,
            seed: None,
            mode: RunMode::Batch,
        }
    }
}

impl Config {
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            packs: self.packs,
            penetration: self.penetration,
            rounds: self.rounds,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub packs: ValueSource,
    pub penetration: ValueSource,
    pub rounds: ValueSource,
    pub seed: ValueSource,
    pub mode: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            packs: ValueSource::Default,
            penetration: ValueSource::Default,
            rounds: ValueSource::Default,
            seed: ValueSource::Default,
            mode: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; `None` keeps the resolved value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub packs: Option<u8>,
    pub penetration: Option<usize>,
    pub rounds: Option<u64>,
    pub seed: Option<u64>,
    pub mode: Option<RunMode>,
}

impl ConfigResolved {
    /// Apply command-line values on top and validate the result.
    pub fn with_overrides(mut self, o: Overrides) -> Result<Self, ConfigError> {
        if let Some(v) = o.packs {
            self.config.packs = v;
            self.sources.packs = ValueSource::Cli;
        }
        if let Some(v) = o.penetration {
            self.config.penetration = v;
            self.sources.penetration = ValueSource::Cli;
        }
        if let Some(v) = o.seed {
            self.config.seed = Some(v);
            self.sources.seed = ValueSource::Cli;
        }
        if let Some(v) = o.mode {
            self.config.mode = v;
            self.sources.mode = ValueSource::Cli;
        }
        if let Some(v) = o.rounds {
            self.config.rounds = v;
            self.sources.rounds = ValueSource::Cli;
        }
        apply_mode_rounds(&mut self.config, &self.sources);
        validate(&self.config)?;
        Ok(self)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(&path)?;
        let f: FileConfig = toml::from_str(&s)?;
        tracing::debug!(path = %path, "loaded config file");
        if let Some(v) = f.packs {
            cfg.packs = v;
            sources.packs = ValueSource::File;
        }
        if let Some(v) = f.penetration {
            cfg.penetration = v;
            sources.penetration = ValueSource::File;
        }
        if let Some(v) = f.rounds {
            cfg.rounds = v;
            sources.rounds = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.mode {
            cfg.mode = v;
            sources.mode = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HILO_PACKS")? {
        cfg.packs = v;
        sources.packs = ValueSource::Env;
    }
    if let Some(v) = env_value("HILO_PENETRATION")? {
        cfg.penetration = v;
        sources.penetration = ValueSource::Env;
    }
    if let Some(v) = env_value("HILO_ROUNDS")? {
        cfg.rounds = v;
        sources.rounds = ValueSource::Env;
    }
    if let Some(v) = env_value("HILO_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Ok(mode) = std::env::var("HILO_MODE")
        && !mode.is_empty()
    {
        cfg.mode = RunMode::parse(&mode)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid HILO_MODE: {}", mode)))?;
        sources.mode = ValueSource::Env;
    }

    apply_mode_rounds(&mut cfg, &sources);
    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, raw))),
        _ => Ok(None),
    }
}

// an unset budget follows the mode
fn apply_mode_rounds(cfg: &mut Config, sources: &ConfigSources) {
    if sources.rounds == ValueSource::Default {
        cfg.rounds = cfg.mode.default_rounds();
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    packs: Option<u8>,
    #[serde(default)]
    penetration: Option<usize>,
    #[serde(default)]
    rounds: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    mode: Option<RunMode>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.rounds == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: rounds must be >= 1".into(),
        ));
    }
    validate_shoe(cfg.packs, cfg.penetration).map_err(|e| match e {
        GameError::InvalidConfig(msg) => {
            ConfigError::Invalid(format!("Invalid configuration: {}", msg))
        }
        other => ConfigError::Invalid(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        CONFIG_ENV,
        "HILO_PACKS",
        "HILO_PENETRATION",
        "HILO_ROUNDS",
        "HILO_SEED",
        "HILO_MODE",
    ];

    fn clear_env() {
        for v in VARS {
            unsafe {
                std::env::remove_var(v);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_without_file_or_env() {
        clear_env();
        let r = load_with_sources().unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources.packs, ValueSource::Default);
        assert_eq!(r.sources.mode, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_beats_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hilo.toml");
        fs::write(&path, "packs = 4\nseed = 9\nmode = \"interactive\"\n").unwrap();
        unsafe {
            std::env::set_var(CONFIG_ENV, &path);
            std::env::set_var("HILO_SEED", "77");
        }
        let r = load_with_sources().unwrap();
        clear_env();

        assert_eq!(r.config.packs, 4);
        assert_eq!(r.sources.packs, ValueSource::File);
        assert_eq!(r.config.seed, Some(77));
        assert_eq!(r.sources.seed, ValueSource::Env);
        assert_eq!(r.config.mode, RunMode::Interactive);
        assert_eq!(r.config.rounds, INTERACTIVE_ROUNDS);
        assert_eq!(r.sources.rounds, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn shoe_that_could_run_dry_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var("HILO_PACKS", "1");
            std::env::set_var("HILO_PENETRATION", "40");
        }
        let r = load_with_sources();
        clear_env();
        assert!(matches!(r, Err(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn garbage_env_value_is_reported() {
        clear_env();
        unsafe {
            std::env::set_var("HILO_ROUNDS", "lots");
        }
        let r = load_with_sources();
        clear_env();
        let msg = r.unwrap_err().to_string();
        assert!(msg.contains("HILO_ROUNDS"), "{}", msg);
    }

    #[test]
    #[serial]
    fn overrides_win_and_revalidate() {
        clear_env();
        let r = load_with_sources()
            .unwrap()
            .with_overrides(Overrides {
                mode: Some(RunMode::Interactive),
                seed: Some(3),
                ..Overrides::default()
            })
            .unwrap();
        assert_eq!(r.config.rounds, INTERACTIVE_ROUNDS);
        assert_eq!(r.sources.seed, ValueSource::Cli);

        let bad = load_with_sources().unwrap().with_overrides(Overrides {
            rounds: Some(0),
            ..Overrides::default()
        });
        assert!(bad.is_err());
    }
}
