//! # Keyword clusters
use crate::deck::DeckCard;
use crate::synergy::{Detector, Scored};
use std::collections::BTreeMap;

/// Keywords worth counting across a deck
pub const CLUSTER_KEYWORDS: [&str; 13] = [
  "Flying",
  "First strike",
  "Double strike",
  "Deathtouch",
  "Lifelink",
  "Vigilance",
  "Trample",
  "Haste",
  "Menace",
  "Reach",
  "Hexproof",
  "Indestructible",
  "Flash",
];

/// The minimum number of copies sharing a keyword to form a cluster
pub const KEYWORD_CLUSTER_MIN_COUNT: usize = 4;

/// The display score of every keyword cluster
pub const KEYWORD_CLUSTER_SCORE: u8 = 5;

/// KeywordCluster is a keyword ability shared by many cards in the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCluster {
  pub keyword: String,
  pub count: usize,
  pub cards: Vec<String>,
}

impl Scored for KeywordCluster {
  fn score(&self) -> u8 {
    KEYWORD_CLUSTER_SCORE
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordDetector;

impl Detector for KeywordDetector {
  type Synergy = KeywordCluster;

  fn detect(&self, cards: &[DeckCard]) -> Vec<KeywordCluster> {
    let mut clusters: BTreeMap<&'static str, (usize, Vec<String>)> = BTreeMap::new();
    for cc in cards {
      for keyword in CLUSTER_KEYWORDS.iter().filter(|k| cc.card.has_keyword(k)) {
        let (count, names) = clusters.entry(*keyword).or_insert((0, Vec::new()));
        *count += cc.count;
        if !names.contains(&cc.card.name) {
          names.push(cc.card.name.clone());
        }
      }
    }
    let mut result: Vec<_> = clusters
      .into_iter()
      .filter(|(_, (count, _))| *count >= KEYWORD_CLUSTER_MIN_COUNT)
      .map(|(keyword, (count, cards))| KeywordCluster {
        keyword: keyword.to_string(),
        count,
        cards,
      })
      .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
  }
}

/// Returns every keyword cluster in `cards`, largest first
pub fn detect_keyword_clusters(cards: &[DeckCard]) -> Vec<KeywordCluster> {
  KeywordDetector.detect(cards)
}
