//! # trainer-ai: Scripted Opponents for the Hold'em Trainer
//!
//! Provides the opponents a trainee plays against. Every opponent runs the
//! same heuristic cascade; a [`Style`] triple decides how often it joins,
//! raises and bluffs.
//!
//! ## Core Components
//!
//! - [`heuristic`] - The decision cascade and [`StyledOpponent`]
//! - [`strength`] - Preflop table and postflop category buckets
//! - [`create_ai`] - Factory for catalogue styles
//! - [`build_table`] - Seats a ready [`Engine`] from a [`TableConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use trainer_ai::build_table;
//! use trainer_engine::config::TableConfig;
//! use trainer_engine::engine::Progress;
//! use trainer_engine::player::Action;
//!
//! let config = TableConfig { seed: Some(42), ..TableConfig::default() };
//! let mut engine = build_table(&config).expect("default table is valid");
//!
//! engine.start_hand().expect("fresh table");
//! let mut progress = engine.drive();
//! while let Ok(Progress::AwaitingHuman { .. }) = progress {
//!     progress = engine.apply_human_action(Action::Fold).and_then(|p| match p {
//!         Progress::StreetComplete { .. } => engine.drive(),
//!         other => Ok(other),
//!     });
//! }
//! if let Ok(Progress::HandComplete(result)) = progress {
//!     println!("{} wins {}", result.winner_name, result.pot);
//! }
//! ```
//!
//! ## Styles
//!
//! - `"tight"` - plays few hands, rarely bluffs
//! - `"loose"` - plays many hands, calls a lot
//! - `"aggressive"` - raises and bluffs often

use thiserror::Error;
use tracing::info;
use trainer_engine::config::{ConfigError, StyleConfig, TableConfig};
use trainer_engine::engine::Engine;
use trainer_engine::errors::GameError;
use trainer_engine::player::Style;
use trainer_engine::seat::{DecisionSource, Seat};

pub mod heuristic;
pub mod strength;

pub use heuristic::StyledOpponent;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("unknown opponent style: {0}")]
    UnknownStyle(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Creates an opponent for a catalogue style.
///
/// # Example
///
/// ```rust
/// use trainer_ai::create_ai;
///
/// let ai = create_ai("tight").unwrap();
/// assert_eq!(ai.label(), "tight");
/// assert!(create_ai("maniac").is_err());
/// ```
pub fn create_ai(style: &str) -> Result<Box<dyn DecisionSource>, TrainerError> {
    let resolved = Style::named(style).ok_or_else(|| TrainerError::UnknownStyle(style.to_string()))?;
    Ok(Box::new(StyledOpponent::new(style.to_ascii_lowercase(), resolved)))
}

/// Seats the configured human first, then the opponents in file order.
pub fn build_table(config: &TableConfig) -> Result<Engine, TrainerError> {
    config.validate()?;

    let mut seats = Vec::with_capacity(config.seat_count());
    if let Some(name) = &config.human {
        seats.push(Seat::human(name.clone()));
    }
    for opp in &config.opponents {
        let style = opp.style.resolve()?;
        let label = match &opp.style {
            StyleConfig::Named(name) => name.to_ascii_lowercase(),
            StyleConfig::Custom(_) => "custom".to_string(),
        };
        seats.push(Seat::scripted(
            opp.name.clone(),
            Box::new(StyledOpponent::new(label, style)),
        ));
    }

    info!(
        seats = seats.len(),
        human = config.human.as_deref().unwrap_or("-"),
        seed = ?config.seed,
        "table seated"
    );
    Ok(Engine::new(config, seats)?)
}
