use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::Style;

pub const DEFAULT_SMALL_BLIND: u32 = 10;
pub const DEFAULT_BIG_BLIND: u32 = 20;
pub const DEFAULT_STARTING_STACK: u32 = 1000;
pub const DEFAULT_HUMAN: &str = "You";
pub const MAX_SEATS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A named style from the catalogue or an explicit parameter triple.
///
/// ```toml
/// [[opponents]]
/// name = "AI_Tight"
/// style = "tight"
///
/// [[opponents]]
/// name = "Custom"
/// style = { participation = 0.3, aggression = 0.5, bluff = 0.1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleConfig {
    Named(String),
    Custom(Style),
}

impl StyleConfig {
    pub fn resolve(&self) -> Result<Style, ConfigError> {
        let style = match self {
            StyleConfig::Named(name) => Style::named(name)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown style {name:?}")))?,
            StyleConfig::Custom(style) => *style,
        };
        if !style.is_valid() {
            return Err(ConfigError::Invalid(
                "style parameters must lie in [0, 1]".into(),
            ));
        }
        Ok(style)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    pub name: String,
    pub style: StyleConfig,
}

impl OpponentConfig {
    pub fn named(name: &str, style: &str) -> Self {
        Self {
            name: name.to_string(),
            style: StyleConfig::Named(style.to_string()),
        }
    }
}

/// Table settings. Every field is optional in the file; missing ones take
/// the defaults of the standard four-handed trainer table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub seed: Option<u64>,
    /// Name of the human seat; `None` seats opponents only
    pub human: Option<String>,
    pub opponents: Vec<OpponentConfig>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            starting_stack: DEFAULT_STARTING_STACK,
            seed: None,
            human: Some(DEFAULT_HUMAN.to_string()),
            opponents: vec![
                OpponentConfig::named("AI_Tight", "tight"),
                OpponentConfig::named("AI_Loose", "loose"),
                OpponentConfig::named("AI_Aggressive", "aggressive"),
            ],
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        Ok(cfg)
    }

    /// Reads a TOML file, applies `TRAINER_*` environment overrides and
    /// validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(seed) = get("TRAINER_SEED") {
            self.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
            );
        }
        if let Some(stack) = get("TRAINER_STARTING_STACK") {
            self.starting_stack = stack
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid starting_stack".into()))?;
        }
        if let Some(sb) = get("TRAINER_SMALL_BLIND") {
            self.small_blind = sb
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid small_blind".into()))?;
        }
        if let Some(bb) = get("TRAINER_BIG_BLIND") {
            self.big_blind = bb
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid big_blind".into()))?;
        }
        Ok(())
    }

    pub fn seat_count(&self) -> usize {
        self.opponents.len() + usize::from(self.human.is_some())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::Invalid("small_blind must be >0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::Invalid(
                "big_blind must be at least the small_blind".into(),
            ));
        }
        if self.starting_stack < self.big_blind {
            return Err(ConfigError::Invalid(
                "starting_stack must cover the big_blind".into(),
            ));
        }
        let seats = self.seat_count();
        if !(2..=MAX_SEATS).contains(&seats) {
            return Err(ConfigError::Invalid(format!(
                "table needs 2 to {MAX_SEATS} seats, got {seats}"
            )));
        }
        if u64::from(self.starting_stack) * seats as u64 > u64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!(
                "{seats} seats of {} chips exceed the largest pot",
                self.starting_stack
            )));
        }
        for opp in &self.opponents {
            opp.style.resolve()?;
        }
        Ok(())
    }
}
