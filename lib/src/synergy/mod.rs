//! # Synergy detection
//!
//! Each detector looks for one deckbuilding archetype in the rules text of a deck's cards and
//! scores how strongly the deck supports it on a 1 to 10 scale. `analyze_deck_synergies` runs
//! every detector and averages the active categories into one overall score.
use crate::deck::DeckCard;

pub mod attack;
pub mod counters;
pub mod feedback;
pub mod graveyard;
pub mod keywords;
pub mod ramp;
pub mod rules;
pub mod sacrifice;
pub mod spellslinger;
pub mod threshold;
pub mod tokens;
pub mod tribal;

pub use attack::*;
pub use counters::*;
pub use feedback::*;
pub use graveyard::*;
pub use keywords::*;
pub use ramp::*;
pub use sacrifice::*;
pub use spellslinger::*;
pub use threshold::*;
pub use tokens::*;
pub use tribal::*;

/// The overall score of a deck without any detected synergy
pub const NO_SYNERGY_SCORE: f64 = 5.0;

/// The highest overall score
pub const MAX_SCORE: f64 = 10.0;

/// The overall score bonus for a single keyword cluster
pub const SINGLE_KEYWORD_CLUSTER_BONUS: u8 = 3;

/// The overall score bonus for two or more keyword clusters
pub const MULTIPLE_KEYWORD_CLUSTER_BONUS: u8 = 5;

/// Scored is implemented by every detector result
pub trait Scored {
  /// Returns the strength of the synergy, from 1 to 10
  fn score(&self) -> u8;
}

/// Detector finds one kind of synergy in a deck
pub trait Detector {
  type Synergy: Scored;

  /// Returns the synergies found in `cards`. Detectors reporting a single synergy return at
  /// most one element
  fn detect(&self, cards: &[DeckCard]) -> Vec<Self::Synergy>;
}

/// SynergyAnalysis is the result of every detector for one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyAnalysis {
  pub tribal: Vec<TribalSynergy>,
  pub tokens: Option<TokenSynergy>,
  pub graveyard: Option<GraveyardSynergy>,
  pub counters: Option<CounterSynergy>,
  pub keyword_clusters: Vec<KeywordCluster>,
  pub feedback_loops: Vec<FeedbackLoop>,
  pub thresholds: Vec<ThresholdSynergy>,
  pub sacrifice: Option<SacrificeSynergy>,
  pub ramp: Option<RampSynergy>,
  pub spellslinger: Option<SpellslingerSynergy>,
  pub attack_triggers: Option<AttackTriggerSynergy>,
  /// The average score of the active categories, from 1 to 10 with one decimal
  pub overall_score: f64,
}

impl SynergyAnalysis {
  /// Returns the categories that contribute to the overall score, along with their score
  pub fn category_scores(&self) -> Vec<(&'static str, u8)> {
    let mut result = Vec::new();
    if let Some(best) = self.tribal.iter().map(Scored::score).max() {
      result.push(("tribal", best));
    }
    let singles: [(&'static str, Option<u8>); 7] = [
      ("tokens", self.tokens.as_ref().map(Scored::score)),
      ("graveyard", self.graveyard.as_ref().map(Scored::score)),
      ("counters", self.counters.as_ref().map(Scored::score)),
      ("sacrifice", self.sacrifice.as_ref().map(Scored::score)),
      ("ramp", self.ramp.as_ref().map(Scored::score)),
      ("spellslinger", self.spellslinger.as_ref().map(Scored::score)),
      ("attack_triggers", self.attack_triggers.as_ref().map(Scored::score)),
    ];
    for (category, score) in singles.iter() {
      if let Some(score) = score {
        result.push((*category, *score));
      }
    }
    match self.keyword_clusters.len() {
      0 => {}
      1 => result.push(("keyword_clusters", SINGLE_KEYWORD_CLUSTER_BONUS)),
      _ => result.push(("keyword_clusters", MULTIPLE_KEYWORD_CLUSTER_BONUS)),
    }
    result
  }

  /// Returns the categories that contribute to the overall score
  pub fn active_categories(&self) -> Vec<&'static str> {
    self.category_scores().into_iter().map(|(c, _)| c).collect()
  }

  fn compute_overall_score(&self) -> f64 {
    let scores = self.category_scores();
    if scores.is_empty() {
      return NO_SYNERGY_SCORE;
    }
    let sum: f64 = scores.iter().map(|(_, s)| f64::from(*s)).sum();
    let average = (sum / scores.len() as f64).min(MAX_SCORE);
    (average * 10.0).round() / 10.0
  }
}

/// Returns the synergies of the deck made of `cards`
pub fn analyze_deck_synergies(cards: &[DeckCard]) -> SynergyAnalysis {
  let mut analysis = SynergyAnalysis {
    tribal: TribalDetector.detect(cards),
    tokens: detect_token_synergy(cards),
    graveyard: detect_graveyard_synergy(cards),
    counters: detect_counter_synergy(cards),
    keyword_clusters: KeywordDetector.detect(cards),
    feedback_loops: FeedbackLoopDetector.detect(cards),
    thresholds: ThresholdDetector.detect(cards),
    sacrifice: detect_sacrifice_synergy(cards),
    ramp: detect_ramp_synergy(cards),
    spellslinger: detect_spellslinger_synergy(cards),
    attack_triggers: detect_attack_trigger_synergy(cards),
    overall_score: NO_SYNERGY_SCORE,
  };
  analysis.overall_score = analysis.compute_overall_score();
  debug!(
    "Synergy analysis of {} cards: {:?} => {}",
    cards.len(),
    analysis.active_categories(),
    analysis.overall_score
  );
  analysis
}
