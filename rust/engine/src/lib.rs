//! # trainer-engine: Hold'em Trainer Game Engine
//!
//! A deterministic multi-way Texas Hold'em engine for a single human
//! practising against scripted opponents. Provides the table state machine,
//! hand evaluation, chip accounting and sealed hand records, with a seeded
//! RNG so every session can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text notation
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`player`] - Actions, styles and the per-player stake ledger
//! - [`pot`] - Pot accumulation and chip conservation
//! - [`game`] - Streets, positions, button rotation and read-only views
//! - [`betting`] - Betting round state machine
//! - [`rules`] - Validation of human actions
//! - [`seat`] - Human and scripted seat controllers
//! - [`engine`] - Hand orchestration
//! - [`history`] - HandRecord construction and JSONL export
//! - [`stats`] - Per-player session statistics
//! - [`config`] - Table configuration from TOML and environment
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use trainer_engine::cards::parse_cards;
//! use trainer_engine::hand::{evaluate, Category};
//!
//! // Evaluate a 7-card poker hand
//! let cards = parse_cards("As Ks Qs Js Ts 9h 8h").unwrap();
//! let score = evaluate(&cards).unwrap();
//! assert_eq!(score.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All deals are reproducible using seeded RNG:
//!
//! ```rust
//! use trainer_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.deal(5).unwrap(), deck2.deal(5).unwrap());
//! ```
//!
//! The engine never installs a `tracing` subscriber; embedding applications
//! decide where hand and action events go.

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod history;
pub mod player;
pub mod pot;
pub mod rules;
pub mod seat;
pub mod stats;
