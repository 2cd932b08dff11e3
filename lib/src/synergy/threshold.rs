//! # Threshold mechanics
//!
//! Mechanics such as metalcraft or delirium switch on once some count reaches a threshold.
//! Each rule measures how close the deck gets to the threshold and lists the cards that care.
use crate::card::Card;
use crate::deck::DeckCard;
use crate::synergy::graveyard::is_graveyard_filler;
use crate::synergy::rules::pattern;
use crate::synergy::{Detector, Scored};
use regex::Regex;
use std::collections::BTreeSet;

/// How likely a deck is to reach a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
  Low,
  Medium,
  High,
}

impl Likelihood {
  /// Returns the likelihood of reaching `required` given the deck supplies `current`
  pub fn from_ratio(current: usize, required: usize) -> Self {
    if required == 0 || current >= required {
      Self::High
    } else if current * 2 >= required {
      Self::Medium
    } else {
      Self::Low
    }
  }

  fn base_score(self) -> u8 {
    match self {
      Self::Low => 3,
      Self::Medium => 5,
      Self::High => 7,
    }
  }
}

struct ThresholdRule {
  mechanic: &'static str,
  payoff: Regex,
  required: usize,
  measure: fn(&[DeckCard]) -> usize,
}

fn quantity<P: Fn(&Card) -> bool>(cards: &[DeckCard], p: P) -> usize {
  cards.iter().filter(|cc| p(&cc.card)).map(|cc| cc.count).sum()
}

fn artifacts(cards: &[DeckCard]) -> usize {
  quantity(cards, Card::is_artifact)
}

fn card_types(cards: &[DeckCard]) -> usize {
  cards
    .iter()
    .flat_map(|cc| cc.card.card_types())
    .collect::<BTreeSet<_>>()
    .len()
}

fn basic_land_types(cards: &[DeckCard]) -> usize {
  cards
    .iter()
    .filter(|cc| cc.card.is_land())
    .flat_map(|cc| cc.card.basic_land_types())
    .collect::<BTreeSet<_>>()
    .len()
}

fn graveyard_cards(cards: &[DeckCard]) -> usize {
  quantity(cards, |c| c.is_instant_or_sorcery() || is_graveyard_filler(c))
}

/// Permanents only reach the graveyard in numbers when something fills it
fn permanent_graveyard_cards(cards: &[DeckCard]) -> usize {
  if !cards.iter().any(|cc| is_graveyard_filler(&cc.card)) {
    return 0;
  }
  quantity(cards, Card::is_permanent)
}

lazy_static! {
  static ref THRESHOLD_RULES: Vec<ThresholdRule> = vec![
    ThresholdRule {
      mechanic: "metalcraft",
      payoff: pattern(r"\bmetalcraft\b|three or more artifacts"),
      required: 3,
      measure: artifacts,
    },
    ThresholdRule {
      mechanic: "delirium",
      payoff: pattern(r"\bdelirium\b|four or more card types"),
      required: 4,
      measure: card_types,
    },
    ThresholdRule {
      mechanic: "domain",
      payoff: pattern(r"\bdomain\b|basic land types? among lands you control"),
      required: 5,
      measure: basic_land_types,
    },
    ThresholdRule {
      mechanic: "threshold",
      payoff: pattern(r"\bthreshold\b|seven or more cards are in your graveyard"),
      required: 7,
      measure: graveyard_cards,
    },
    ThresholdRule {
      mechanic: "descend",
      payoff: pattern(r"\bdescend (4|8)\b|permanent cards in your graveyard"),
      required: 8,
      measure: permanent_graveyard_cards,
    },
  ];
}

/// ThresholdSynergy is a threshold mechanic with payoffs in the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSynergy {
  pub mechanic: String,
  pub current: usize,
  pub required: usize,
  pub achievement_likelihood: Likelihood,
  pub payoffs: Vec<String>,
  pub score: u8,
}

impl Scored for ThresholdSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdDetector;

impl Detector for ThresholdDetector {
  type Synergy = ThresholdSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<ThresholdSynergy> {
    let mut result = Vec::new();
    for rule in THRESHOLD_RULES.iter() {
      let mut payoffs: Vec<String> = Vec::new();
      for cc in cards {
        if rule.payoff.is_match(&cc.card.rules_text()) && !payoffs.contains(&cc.card.name) {
          payoffs.push(cc.card.name.clone());
        }
      }
      if payoffs.is_empty() {
        continue;
      }
      let current = (rule.measure)(cards);
      let likelihood = Likelihood::from_ratio(current, rule.required);
      let bonus = std::cmp::min(3, payoffs.len() - 1) as u8;
      result.push(ThresholdSynergy {
        mechanic: rule.mechanic.to_string(),
        current,
        required: rule.required,
        achievement_likelihood: likelihood,
        payoffs,
        score: std::cmp::min(10, likelihood.base_score() + bonus),
      });
    }
    result
  }
}

/// Returns the threshold mechanics the deck has payoffs for
pub fn detect_threshold_synergies(cards: &[DeckCard]) -> Vec<ThresholdSynergy> {
  ThresholdDetector.detect(cards)
}

#[cfg(test)]
mod tests {
  use crate::synergy::threshold::*;

  #[test]
  fn likelihood_from_ratio() {
    assert_eq!(Likelihood::from_ratio(3, 3), Likelihood::High);
    assert_eq!(Likelihood::from_ratio(2, 4), Likelihood::Medium);
    assert_eq!(Likelihood::from_ratio(1, 4), Likelihood::Low);
  }

  #[test]
  fn metalcraft_with_enough_artifacts() {
    let deck = deck![
      4 => card!("Ornithopter", "Artifact Creature — Thopter"),
      4 => card!(
        "Carapace Forger",
        "Creature — Elf Artisan",
        "Metalcraft — Carapace Forger gets +2/+2 as long as you control three or more artifacts."
      ),
      4 => card!(
        "Galvanic Blast",
        "Instant",
        "Galvanic Blast deals 2 damage to any target.\nMetalcraft — Galvanic Blast deals 4 damage instead if you control three or more artifacts."
      ),
    ];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies.len(), 1);
    let metalcraft = &synergies[0];
    assert_eq!(metalcraft.mechanic, "metalcraft");
    assert_eq!(metalcraft.current, 4);
    assert_eq!(metalcraft.achievement_likelihood, Likelihood::High);
    assert_eq!(metalcraft.payoffs.len(), 2);
    assert_eq!(metalcraft.score, 8);
  }

  #[test]
  fn domain_counts_basic_land_types() {
    let deck = deck![
      4 => card!("Tribal Flames", "Sorcery", "Domain — Tribal Flames deals X damage to any target, where X is the number of basic land types among lands you control."),
      4 => card!("Stomping Ground", "Land — Mountain Forest"),
      4 => card!("Island", "Basic Land — Island"),
    ];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies[0].mechanic, "domain");
    assert_eq!(synergies[0].current, 3);
    assert_eq!(synergies[0].achievement_likelihood, Likelihood::Medium);
    assert_eq!(synergies[0].score, 5);
  }

  #[test]
  fn delirium_counts_card_types() {
    let deck = deck![
      4 => card!(
        "Traverse the Ulvenwald",
        "Sorcery",
        "Search your library for a basic land card.\nDelirium — If there are four or more card types among cards in your graveyard, instead search your library for a creature or land card."
      ),
      4 => card!("Grizzly Bears", "Creature — Bear"),
      4 => card!("Mind Stone", "Artifact"),
      8 => card!("Forest", "Basic Land — Forest"),
    ];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies.len(), 1);
    assert_eq!(synergies[0].mechanic, "delirium");
    assert_eq!(synergies[0].current, 4);
    assert_eq!(synergies[0].achievement_likelihood, Likelihood::High);
    assert_eq!(synergies[0].score, 7);
  }

  #[test]
  fn threshold_counts_spells_and_fillers() {
    let deck = deck![
      4 => card!(
        "Nimble Mongoose",
        "Creature — Mongoose",
        "Shroud\nThreshold — Nimble Mongoose gets +2/+2 as long as seven or more cards are in your graveyard."
      ),
      4 => card!("Lightning Bolt", "Instant", "Lightning Bolt deals 3 damage to any target."),
      2 => card!("Merfolk Looter", "Creature — Merfolk Rogue", "{T}: Draw a card, then discard a card."),
    ];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies[0].mechanic, "threshold");
    assert_eq!(synergies[0].current, 6);
    assert_eq!(synergies[0].required, 7);
    assert_eq!(synergies[0].achievement_likelihood, Likelihood::Medium);
    assert_eq!(synergies[0].score, 5);
  }

  fn descend_payoff() -> crate::card::Card {
    card!(
      "Descended Spirit",
      "Creature — Spirit",
      "Descend 8 — As long as there are eight or more permanent cards in your graveyard, Descended Spirit gets +3/+3."
    )
  }

  #[test]
  fn descend_counts_permanents_once_the_graveyard_is_filled() {
    let scour = card!("Thought Scour", "Instant", "Target player mills two cards.\nDraw a card.");
    let deck = deck![
      8 => scour.clone(),
      4 => descend_payoff(),
      30 => card!("Grizzly Bears", "Creature — Bear"),
    ];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies[0].mechanic, "descend");
    assert_eq!(synergies[0].current, 34);
    assert_eq!(synergies[0].achievement_likelihood, Likelihood::High);

    // Instant fillers are not permanents themselves
    let deck = deck![8 => scour, 4 => descend_payoff()];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies[0].current, 4);
    assert_eq!(synergies[0].achievement_likelihood, Likelihood::Medium);

    // Nothing puts permanents in the graveyard
    let deck = deck![4 => descend_payoff(), 30 => card!("Grizzly Bears", "Creature — Bear")];
    let synergies = detect_threshold_synergies(&deck.cards);
    assert_eq!(synergies[0].current, 0);
    assert_eq!(synergies[0].achievement_likelihood, Likelihood::Low);
    assert_eq!(synergies[0].score, 3);
  }

  #[test]
  fn no_payoffs_no_synergy() {
    let deck = deck![20 => card!("Ornithopter", "Artifact Creature — Thopter")];
    assert!(detect_threshold_synergies(&deck.cards).is_empty());
  }
}
