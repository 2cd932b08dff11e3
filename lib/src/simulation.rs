//! # Simulation engine and hand statistics
//!
//! A `Simulation` shuffles a deck `run_count` times and keeps the resulting hands, so that
//! several statistics can be computed over the same set of trials. The free functions
//! `simulate_opening_hands`, `simulate_early_game` and `simulate_key_card_draw_rate` each run
//! a fresh simulation.
use crate::card::{Card, Color};
use crate::deck::Deck;
use crate::hand::{Hand, STARTING_HAND_SIZE};
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use thiserror::Error;

/// The default number of simulated hands
pub const DEFAULT_RUN_COUNT: usize = 1000;
/// Cards drawn after the opening hand to reach turn 4 on the draw
pub const KEY_CARD_DRAWS: usize = 3;
/// Opening hands with a land count in this range are keepable
pub const KEEPABLE_LANDS: std::ops::RangeInclusive<usize> = 2..=5;
/// A hand curves out with at least this many lands and this many spells costing 1 to 3
pub const CURVE_OUT_LANDS: usize = 3;
pub const CURVE_OUT_SPELLS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
  #[error("a simulation requires at least one run")]
  NoRuns,
  #[error("cannot simulate hands from an empty deck")]
  EmptyDeck,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
  /// The number of independent shuffles
  pub run_count: usize,
  /// The number of cards drawn after the opening hand
  #[serde(default)]
  pub draw_count: usize,
  /// A fixed seed makes the simulation reproducible
  #[serde(default)]
  pub seed: Option<u64>,
}

impl SimulationConfig {
  pub fn new(run_count: usize) -> Self {
    Self {
      run_count,
      draw_count: 0,
      seed: None,
    }
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  pub fn with_draws(mut self, draw_count: usize) -> Self {
    self.draw_count = draw_count;
    self
  }
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self::new(DEFAULT_RUN_COUNT)
  }
}

#[derive(Debug)]
pub struct Simulation<'a> {
  pub deck: &'a Deck,
  pub hands: Vec<Hand<'a>>,
}

/// Land counts, keepability and color availability of opening hands.
/// All rates are percentages in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHandStats {
  /// Percentage of hands with exactly `i` lands, for `i` in 0..=7
  pub land_distribution: [f64; STARTING_HAND_SIZE + 1],
  pub average_lands: f64,
  pub keepable_hand_rate: f64,
  /// For every color among the deck's nonland cards, the percentage of hands whose
  /// turn 1 lands can produce it
  pub color_requirements: BTreeMap<Color, f64>,
  pub runs: usize,
}

/// Curve statistics for the first three turns, as percentages in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyGameStats {
  pub turn1_playable: f64,
  pub turn2_playable: f64,
  pub turn3_playable: f64,
  pub curve_out_rate: f64,
  pub runs: usize,
}

/// How often a card is seen by a turn, as percentages in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCardStats {
  pub card_name: String,
  pub opening_hand_rate: f64,
  pub turn3_rate: f64,
  pub turn4_rate: f64,
  pub runs: usize,
}

#[inline]
fn percent(successes: usize, runs: usize) -> f64 {
  (successes as f64 / runs as f64) * 100.0
}

/// Returns true if the card is a nonland card costing exactly `cmc`
#[inline]
fn is_spell_with_cmc(card: &Card, cmc: usize) -> bool {
  !card.is_land() && (card.cmc - cmc as f32).abs() < f32::EPSILON
}

impl<'a> Simulation<'a> {
  pub fn from_config(deck: &'a Deck, config: &SimulationConfig) -> Result<Self, SimulationError> {
    if config.run_count == 0 {
      return Err(SimulationError::NoRuns);
    }
    let cards = deck.flatten();
    if cards.is_empty() {
      return Err(SimulationError::EmptyDeck);
    }
    if cards.len() < STARTING_HAND_SIZE + config.draw_count {
      warn!(
        "Deck has {} cards, fewer than the {} cards each run draws",
        cards.len(),
        STARTING_HAND_SIZE + config.draw_count
      );
    }
    let mut rng = match config.seed {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_entropy(),
    };
    debug!(
      "Simulating {} hands of {} cards from a {} card deck",
      config.run_count,
      STARTING_HAND_SIZE + config.draw_count,
      cards.len()
    );
    let mut indices = Vec::with_capacity(cards.len());
    let hands = (0..config.run_count)
      .map(|_| Hand::from_shuffle(&mut rng, &cards, &mut indices, config.draw_count))
      .collect();
    Ok(Self { deck, hands })
  }

  /// Returns the number of simulated hands
  pub fn runs(&self) -> usize {
    self.hands.len()
  }

  pub fn opening_hand_stats(&self) -> OpeningHandStats {
    let runs = self.runs();
    // Colors required by the nonland cards of the deck, colorless excluded
    let required: Vec<Color> = self
      .deck
      .iter()
      .filter(|cc| !cc.card.is_land())
      .flat_map(|cc| cc.card.colors.iter().copied())
      .filter(|color| color.is_colored())
      .collect::<std::collections::BTreeSet<_>>()
      .into_iter()
      .collect();
    let mut land_buckets = [0usize; STARTING_HAND_SIZE + 1];
    let mut total_lands = 0;
    let mut keepable = 0;
    let mut color_hits: BTreeMap<Color, usize> = required.iter().map(|c| (*c, 0)).collect();
    for hand in &self.hands {
      let lands = hand.opening_land_count();
      land_buckets[std::cmp::min(lands, STARTING_HAND_SIZE)] += 1;
      total_lands += lands;
      if KEEPABLE_LANDS.contains(&lands) {
        keepable += 1;
      }
      if !required.is_empty() {
        let available = hand.turn1_colors();
        for (color, hits) in color_hits.iter_mut() {
          if available.contains(color) {
            *hits += 1;
          }
        }
      }
    }
    let mut land_distribution = [0.0; STARTING_HAND_SIZE + 1];
    for (pct, count) in land_distribution.iter_mut().zip(land_buckets.iter()) {
      *pct = percent(*count, runs);
    }
    OpeningHandStats {
      land_distribution,
      average_lands: total_lands as f64 / runs as f64,
      keepable_hand_rate: percent(keepable, runs),
      color_requirements: color_hits
        .into_iter()
        .map(|(color, hits)| (color, percent(hits, runs)))
        .collect(),
      runs,
    }
  }

  pub fn early_game_stats(&self) -> EarlyGameStats {
    let runs = self.runs();
    let mut playable = [0usize; 3];
    let mut curve_outs = 0;
    for hand in &self.hands {
      let opening = hand.opening();
      let lands = hand.opening_land_count();
      for (turn, count) in playable.iter_mut().enumerate() {
        let turn = turn + 1;
        if lands >= turn && opening.iter().any(|card| is_spell_with_cmc(card, turn)) {
          *count += 1;
        }
      }
      let cheap_spells = opening
        .iter()
        .filter(|card| !card.is_land() && card.cmc >= 1.0 && card.cmc <= 3.0)
        .count();
      if lands >= CURVE_OUT_LANDS && cheap_spells >= CURVE_OUT_SPELLS {
        curve_outs += 1;
      }
    }
    EarlyGameStats {
      turn1_playable: percent(playable[0], runs),
      turn2_playable: percent(playable[1], runs),
      turn3_playable: percent(playable[2], runs),
      curve_out_rate: percent(curve_outs, runs),
      runs,
    }
  }

  /// Returns how often the card named exactly `card_name` is seen in the opening hand,
  /// by turn 3 (two draws) and by turn 4 (three draws)
  ///
  /// The simulation must have been configured with at least `KEY_CARD_DRAWS` draws for the
  /// turn 3 and turn 4 rates to include drawn cards.
  pub fn key_card_stats(&self, card_name: &str) -> KeyCardStats {
    let runs = self.runs();
    let mut in_opening = 0;
    let mut by_turn3 = 0;
    let mut by_turn4 = 0;
    let is_key = |card: &&Card| card.name == card_name;
    for hand in &self.hands {
      // The opening hand is a prefix of the draws, so each rate includes the previous one
      if hand.any_in_opening_with_draws(0, is_key) {
        in_opening += 1;
      }
      if hand.any_in_opening_with_draws(2, is_key) {
        by_turn3 += 1;
      }
      if hand.any_in_opening_with_draws(3, is_key) {
        by_turn4 += 1;
      }
    }
    if self.deck.card_from_name(card_name).is_none() {
      debug!("Key card \"{}\" is not in the deck", card_name);
    }
    KeyCardStats {
      card_name: card_name.to_string(),
      opening_hand_rate: percent(in_opening, runs),
      turn3_rate: percent(by_turn3, runs),
      turn4_rate: percent(by_turn4, runs),
      runs,
    }
  }
}

/// Simulates `config.run_count` opening hands of 7 cards
pub fn simulate_opening_hands(
  deck: &Deck,
  config: &SimulationConfig,
) -> Result<OpeningHandStats, SimulationError> {
  let config = config.with_draws(0);
  Ok(Simulation::from_config(deck, &config)?.opening_hand_stats())
}

/// Simulates `config.run_count` opening hands of 7 cards and checks whether they can cast
/// a spell on each of the first three turns
pub fn simulate_early_game(
  deck: &Deck,
  config: &SimulationConfig,
) -> Result<EarlyGameStats, SimulationError> {
  let config = config.with_draws(0);
  Ok(Simulation::from_config(deck, &config)?.early_game_stats())
}

/// Simulates `config.run_count` shuffles and measures how often `card_name` is seen early
pub fn simulate_key_card_draw_rate(
  deck: &Deck,
  card_name: &str,
  config: &SimulationConfig,
) -> Result<KeyCardStats, SimulationError> {
  let config = config.with_draws(KEY_CARD_DRAWS);
  Ok(Simulation::from_config(deck, &config)?.key_card_stats(card_name))
}
