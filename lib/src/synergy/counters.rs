//! # +1/+1 counter synergy
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

lazy_static! {
  // Proliferate comes first: a card that both places counters and proliferates is a proliferator
  static ref COUNTER_ROLES: RoleTable = RoleTable::new(vec![
    Role::new("proliferators", &[r"\bproliferate\b"]),
    Role::new(
      "counters",
      &[
        r"\+1/\+1 counters?",
        r"\b(adapt|evolve|bolster|outlast|mentor|modular|graft)\b",
      ],
    ),
  ]);
}

/// CounterSynergy lists the cards that place +1/+1 counters and the cards that proliferate them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSynergy {
  pub counter_cards: Vec<String>,
  pub proliferators: Vec<String>,
  pub score: u8,
}

impl Scored for CounterSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CounterDetector;

impl Detector for CounterDetector {
  type Synergy = CounterSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<CounterSynergy> {
    let roles = COUNTER_ROLES.assign(cards);
    let counter_cards = roles.names("counters");
    let proliferators = roles.names("proliferators");
    if counter_cards.is_empty() && proliferators.is_empty() {
      return Vec::new();
    }
    let score = match (counter_cards.len(), proliferators.len()) {
      (c, p) if c >= 6 && p >= 2 => 9,
      (c, p) if c >= 4 && p >= 1 => 7,
      (c, _) if c >= 4 => 6,
      (c, _) if c >= 2 => 4,
      _ => 2,
    };
    vec![CounterSynergy {
      counter_cards,
      proliferators,
      score,
    }]
  }
}

pub fn detect_counter_synergy(cards: &[DeckCard]) -> Option<CounterSynergy> {
  CounterDetector.detect(cards).pop()
}
