//! # Deck reports
//!
//! `DeckReport` bundles the simulation statistics, mana base and synergy analysis of one deck.
//! `decklens_run` exposes it to a web front end through wasm-bindgen.
use crate::deck::{Deck, DeckCard};
use crate::land::ManaBase;
use crate::simulation::{
  EarlyGameStats, KeyCardStats, OpeningHandStats, Simulation, SimulationConfig, SimulationError,
  DEFAULT_RUN_COUNT, KEY_CARD_DRAWS,
};
use crate::synergy::{analyze_deck_synergies, SynergyAnalysis};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("error simulating hands: {0}")]
  Simulation(#[from] SimulationError),
  #[error("error deserializing report input: {0}")]
  Input(#[from] serde_json::Error),
}

/// DeckReport is every statistic decklens computes for one deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckReport {
  pub deck_size: usize,
  pub land_count: usize,
  pub average_cmc: f64,
  pub mana_base: ManaBase,
  pub opening_hand: OpeningHandStats,
  pub early_game: EarlyGameStats,
  pub key_cards: Vec<KeyCardStats>,
  pub synergies: SynergyAnalysis,
}

impl DeckReport {
  /// Returns the report for `deck`. All statistics share the same simulated hands
  pub fn from_deck(
    deck: &Deck,
    config: &SimulationConfig,
    key_cards: &[String],
  ) -> Result<Self, ReportError> {
    let sim = Simulation::from_config(deck, &config.with_draws(KEY_CARD_DRAWS))?;
    Ok(Self {
      deck_size: deck.len(),
      land_count: deck.land_count(),
      average_cmc: deck.average_cmc(),
      mana_base: ManaBase::from_deck(deck),
      opening_hand: sim.opening_hand_stats(),
      early_game: sim.early_game_stats(),
      key_cards: key_cards
        .iter()
        .map(|name| sim.key_card_stats(name))
        .collect(),
      synergies: analyze_deck_synergies(&deck.cards),
    })
  }
}

fn default_runs() -> usize {
  DEFAULT_RUN_COUNT
}

/// Input format expected from the web front end
#[derive(Debug, Serialize, Deserialize)]
struct Input {
  /// The deck list, one entry per distinct card
  pub cards: Vec<DeckCard>,
  /// The number of runs to perform
  #[serde(default = "default_runs")]
  pub runs: usize,
  #[serde(default)]
  pub seed: Option<u64>,
  /// Names of the cards to compute draw rates for
  #[serde(default)]
  pub key_cards: Vec<String>,
}

/// Builds a deck report given input
/// Returns the serialized `DeckReport`, or an error message string if the input is invalid
/// # Example
///
///  ```js
///  const input = {cards: [...], runs: 1000, key_cards: ["Lightning Bolt"]};
///  const report = require('decklens').decklens_run(input);
///  console.log(report.synergies.overall_score);
///  ```
#[wasm_bindgen]
pub fn decklens_run(input: &JsValue) -> JsValue {
  let input: Input = match input.into_serde() {
    Err(e) => {
      return JsValue::from_str(&format!("Error deserializing report inputs: {}", e));
    }
    Ok(v) => v,
  };
  let report = match run_impl(input) {
    Err(e) => {
      return JsValue::from_str(&format!("Error building report for input: {}", e));
    }
    Ok(v) => v,
  };
  match JsValue::from_serde(&report) {
    Ok(v) => v,
    Err(e) => JsValue::from_str(&format!("Error serializing report: {}", e)),
  }
}

fn run_impl(input: Input) -> Result<DeckReport, ReportError> {
  let deck = Deck::from_entries(input.cards);
  let mut config = SimulationConfig::new(input.runs);
  config.seed = input.seed;
  DeckReport::from_deck(&deck, &config, &input.key_cards)
}

/// Returns the report for a JSON encoded input, as accepted by `decklens_run`
pub fn report_from_json(input: &str) -> Result<DeckReport, ReportError> {
  let input: Input = serde_json::from_str(input)?;
  run_impl(input)
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use crate::report::*;

  fn mountain() -> Card {
    let mut card = card!("Mountain", "Basic Land — Mountain", "({T}: Add {R}.)");
    card.produced_mana = [Color::Red].iter().copied().collect();
    card
  }

  fn bolt() -> Card {
    let mut card = card!(
      "Lightning Bolt",
      "Instant",
      "Lightning Bolt deals 3 damage to any target."
    );
    card.cmc = 1.0;
    card.colors = [Color::Red].iter().copied().collect();
    card
  }

  #[test]
  fn report_bundles_every_statistic() {
    let deck = deck![20 => mountain(), 40 => bolt()];
    let config = SimulationConfig::new(500).with_seed(11);
    let key_cards = vec!["Lightning Bolt".to_string(), "Black Lotus".to_string()];
    let report = DeckReport::from_deck(&deck, &config, &key_cards).unwrap();
    assert_eq!(report.deck_size, 60);
    assert_eq!(report.land_count, 20);
    assert!((report.average_cmc - 1.0).abs() < 1e-9);
    assert_eq!(report.mana_base.total, 20);
    assert_eq!(report.opening_hand.runs, 500);
    assert_eq!(report.early_game.runs, 500);
    assert_eq!(report.key_cards.len(), 2);
    assert!(report.key_cards[0].opening_hand_rate > 90.0);
    assert_eq!(report.key_cards[1].turn4_rate, 0.0);
    assert_eq!(report.synergies.overall_score, 5.0);
  }

  #[test]
  fn report_rejects_empty_deck() {
    let result = DeckReport::from_deck(&Deck::new(), &SimulationConfig::default(), &[]);
    match result {
      Err(ReportError::Simulation(SimulationError::EmptyDeck)) => {}
      other => panic!("unexpected result {:?}", other),
    }
  }

  #[test]
  fn report_from_json_input() {
    let input = r#"{
      "cards": [
        {"card": {"name": "Mountain", "type_line": "Basic Land — Mountain", "produced_mana": ["R"]}, "count": 20},
        {"card": {"name": "Lightning Bolt", "type_line": "Instant", "cmc": 1.0}, "count": 40}
      ],
      "runs": 100,
      "seed": 3,
      "key_cards": ["Lightning Bolt"]
    }"#;
    let report = report_from_json(input).unwrap();
    assert_eq!(report.deck_size, 60);
    assert_eq!(report.opening_hand.runs, 100);
    assert_eq!(report.key_cards[0].card_name, "Lightning Bolt");
    assert_eq!(
      report.opening_hand.color_requirements.keys().count(),
      0,
      "colorless spells have no color requirements"
    );
  }

  #[test]
  fn report_from_json_defaults_runs() {
    let input = r#"{"cards": [{"card": {"name": "Mountain", "type_line": "Basic Land — Mountain"}, "count": 7}]}"#;
    let report = report_from_json(input).unwrap();
    assert_eq!(report.opening_hand.runs, DEFAULT_RUN_COUNT);
  }

  #[test]
  fn report_from_json_rejects_negative_counts() {
    let input = r#"{"cards": [{"card": {"name": "Mountain"}, "count": -1}]}"#;
    match report_from_json(input) {
      Err(ReportError::Input(_)) => {}
      other => panic!("unexpected result {:?}", other),
    }
  }
}
