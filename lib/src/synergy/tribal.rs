//! # Tribal synergy
use crate::deck::DeckCard;
use crate::synergy::{Detector, Scored};
use std::collections::BTreeMap;

/// The minimum number of creature copies sharing a subtype to count as a tribe
pub const TRIBAL_MIN_COUNT: usize = 8;

/// TribalSynergy is a creature subtype shared by many creatures in the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TribalSynergy {
  pub creature_type: String,
  /// The number of creature copies with the subtype
  pub count: usize,
  pub cards: Vec<String>,
  pub score: u8,
}

impl Scored for TribalSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

fn score_for_count(count: usize) -> u8 {
  if count >= 16 {
    10
  } else if count >= 12 {
    8
  } else {
    6
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TribalDetector;

impl Detector for TribalDetector {
  type Synergy = TribalSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<TribalSynergy> {
    let mut tribes: BTreeMap<String, (usize, Vec<String>)> = BTreeMap::new();
    for cc in cards.iter().filter(|cc| cc.card.is_creature()) {
      for subtype in cc.card.creature_subtypes() {
        let (count, names) = tribes.entry(subtype).or_insert((0, Vec::new()));
        *count += cc.count;
        if !names.contains(&cc.card.name) {
          names.push(cc.card.name.clone());
        }
      }
    }
    let mut result: Vec<_> = tribes
      .into_iter()
      .filter(|(_, (count, _))| *count >= TRIBAL_MIN_COUNT)
      .map(|(creature_type, (count, cards))| TribalSynergy {
        creature_type,
        count,
        cards,
        score: score_for_count(count),
      })
      .collect();
    // Ties keep alphabetical order
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
  }
}

/// Returns every tribe in `cards`, largest first
pub fn detect_tribal_synergies(cards: &[DeckCard]) -> Vec<TribalSynergy> {
  TribalDetector.detect(cards)
}
