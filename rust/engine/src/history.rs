use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::hand::{Category, HandScore};
use crate::player::{ActionKind, Player};

/// Records a single action during a hand, with the chips that actually moved.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub player: String,
    /// The betting street when this action occurred
    pub street: Street,
    pub kind: ActionKind,
    /// Chips moved into the pot by this action
    pub amount: u32,
    /// Why the action was taken, shown to the trainee afterwards
    pub rationale: String,
}

/// Community cards visible once a street opened.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StreetRecord {
    pub street: Street,
    pub board: Vec<Card>,
}

/// Per-seat summary of a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub seat: usize,
    pub player: String,
    pub hole: Vec<Card>,
    pub chips_start: u32,
    pub chips_end: u32,
}

/// A hand shown down at the end.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShownHand {
    pub seat: usize,
    pub player: String,
    pub hole: Vec<Card>,
    pub score: HandScore,
}

/// How the pot was awarded.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownResult {
    pub winner: usize,
    pub winner_name: String,
    /// `None` when everybody else folded and no hand was evaluated
    pub winning_category: Option<Category>,
    pub pot: u32,
    /// Every non-folded hand compared at showdown, in seat order
    #[serde(default)]
    pub hands: Vec<ShownHand>,
    /// Optional notes about the outcome (e.g. a tie broken by seat order)
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of a hand. Built while the hand runs and sealed when it
/// ends; the engine never changes a sealed record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    pub hand_number: u32,
    /// Seed of the table the hand was played on
    pub seed: Option<u64>,
    pub dealer: usize,
    pub seats: Vec<SeatRecord>,
    /// Chronological list of all actions, blinds included
    pub actions: Vec<ActionRecord>,
    pub streets: Vec<StreetRecord>,
    pub result: ShowdownResult,
    /// Timestamp when the record was exported (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    pub fn seat_of(&self, player: &str) -> Option<&SeatRecord> {
        self.seats.iter().find(|s| s.player == player)
    }

    pub fn actions_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a ActionRecord> + 'a {
        self.actions.iter().filter(move |a| a.player == player)
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// An open hand record. Only the engine appends to it.
#[derive(Debug, Clone)]
pub(crate) struct RecordBuilder {
    hand_id: String,
    hand_number: u32,
    seed: Option<u64>,
    dealer: usize,
    chips_start: Vec<u32>,
    actions: Vec<ActionRecord>,
    streets: Vec<StreetRecord>,
}

impl RecordBuilder {
    pub(crate) fn open(hand_id: String, hand_number: u32, seed: Option<u64>, dealer: usize, players: &[Player]) -> Self {
        Self {
            hand_id,
            hand_number,
            seed,
            dealer,
            chips_start: players.iter().map(Player::stack).collect(),
            actions: Vec::new(),
            streets: Vec::with_capacity(4),
        }
    }

    pub(crate) fn push_action(&mut self, action: ActionRecord) {
        self.actions.push(action);
    }

    pub(crate) fn open_street(&mut self, street: Street, board: &[Card]) {
        self.streets.push(StreetRecord {
            street,
            board: board.to_vec(),
        });
    }

    pub(crate) fn seal(self, players: &[Player], result: ShowdownResult) -> HandRecord {
        let seats = players
            .iter()
            .zip(self.chips_start)
            .enumerate()
            .map(|(seat, (p, chips_start))| SeatRecord {
                seat,
                player: p.name().to_string(),
                hole: p.hole_cards().to_vec(),
                chips_start,
                chips_end: p.stack(),
            })
            .collect();
        HandRecord {
            hand_id: self.hand_id,
            hand_number: self.hand_number,
            seed: self.seed,
            dealer: self.dealer,
            seats,
            actions: self.actions,
            streets: self.streets,
            result,
            ts: None,
        }
    }
}

/// The sealed records of a session, oldest first.
#[derive(Debug, Clone)]
pub struct HandHistory {
    date: String,
    seq: u32,
    records: Vec<HandRecord>,
}

impl Default for HandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HandHistory {
    pub fn new() -> Self {
        Self::with_date(&Utc::now().format("%Y%m%d").to_string())
    }

    pub fn with_date(date: &str) -> Self {
        Self {
            date: date.to_string(),
            seq: 0,
            records: Vec::new(),
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn push(&mut self, record: HandRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[HandRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&HandRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes every record as one JSON object per line (LF only). Records
    /// without a timestamp get the current time in the written copy.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for record in &self.records {
            let mut rec = record.clone();
            if rec.ts.is_none() {
                rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
            }
            let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}
