//! # Magic: The Gathering Deck Analysis Library
//!
//! decklens is a library that analyzes a Magic: The Gathering deck list. It simulates opening
//! hands and early turns to estimate how consistently a deck plays out, classifies its lands,
//! and detects deckbuilding synergies (tribal, tokens, graveyard, sacrifice, ramp, ...) from the
//! rules text of its cards. The results are plain serializable data, ready to be rendered or
//! embedded in prompts by a front end.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
extern crate regex;
extern crate wasm_bindgen;

#[macro_use]
pub mod card;
#[macro_use]
pub mod deck;
pub mod hand;
pub mod land;
pub mod report;
pub mod simulation;
pub mod synergy;

pub use crate::card::{Card, Color};
pub use crate::deck::{Deck, DeckCard};
pub use crate::land::{classify, LandCategory, LandClassification, ManaBase};
pub use crate::report::{decklens_run, DeckReport, ReportError};
pub use crate::simulation::{
  simulate_early_game, simulate_key_card_draw_rate, simulate_opening_hands, SimulationConfig,
  SimulationError,
};
pub use crate::synergy::{analyze_deck_synergies, SynergyAnalysis};
