//! # Land classification
//!
//! Classifies land cards by whether they can be played for mana on the turn they enter.
//! The rules are text patterns over the oracle text and printed text. They are evaluated
//! in a fixed order and the first match wins, since several patterns are substrings of
//! one another (a shock land also "enters tapped").
use crate::card::{Card, Color};
use crate::deck::Deck;
use regex::Regex;
use std::collections::BTreeMap;

/// LandCategory describes when the mana of a land is available
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandCategory {
  /// Enters untapped and taps for any of its colors
  Untapped,
  /// Enters untapped if some condition holds (pay life, control other lands, ...)
  Conditional,
  /// Always enters tapped
  Tapped,
  /// Produces no mana, or mana with a spending restriction
  Restricted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandClassification {
  pub category: LandCategory,
  /// A human readable explanation, for diagnostics only
  pub reason: String,
}

impl LandCategory {
  /// Returns true if a land of this category can plausibly be the untapped first land drop
  #[inline]
  pub fn is_available_on_turn1(self) -> bool {
    self == Self::Untapped || self == Self::Conditional
  }
}

impl LandClassification {
  fn new(category: LandCategory, reason: &str) -> Self {
    Self {
      category,
      reason: reason.to_string(),
    }
  }
}

lazy_static! {
  static ref SHOCK_LAND: Regex =
    Regex::new(r"unless you pay 2 life|you may pay 2 life|2点のライフを支払(わない|ってもよい)")
      .expect("Failed to compile SHOCK_LAND regex");
  static ref FAST_LAND: Regex = Regex::new(
    r"unless you control (two or fewer|two or more|three or more) other lands|他の土地を(2|3|２|３)つ(以下|以上)"
  )
  .expect("Failed to compile FAST_LAND regex");
  static ref PAIN_DAMAGE: Regex = Regex::new(r"deals 1 damage to you|あなたに1点のダメージを与える")
    .expect("Failed to compile PAIN_DAMAGE regex");
  static ref ADDS_MANA: Regex =
    Regex::new(r"\badd\b|加える").expect("Failed to compile ADDS_MANA regex");
  static ref CHECK_LAND: Regex = Regex::new(
    r"unless you control an? (plains|island|swamp|mountain|forest)|(平地|島|沼|山|森)[^。]*コントロールしていない(限り|かぎり)"
  )
  .expect("Failed to compile CHECK_LAND regex");
  static ref TAPPED_LAND: Regex =
    Regex::new(r"enters the battlefield tapped|enters tapped|タップ状態で戦場に出る")
      .expect("Failed to compile TAPPED_LAND regex");
  static ref RESTRICTED_MANA: Regex = Regex::new(r"spend this mana only|のみ使用|のみ使える")
    .expect("Failed to compile RESTRICTED_MANA regex");
}

/// Classifies a card into a `LandCategory`
///
/// Non-land cards classify as `Untapped` so that callers never need to special case them.
pub fn classify(card: &Card) -> LandClassification {
  use LandCategory::*;
  let type_line = card.type_line.to_lowercase();
  if !type_line.contains("land") {
    return LandClassification::new(Untapped, "Not a land");
  }
  if type_line.contains("basic") {
    return LandClassification::new(Untapped, "Basic land");
  }
  let text = format!("{}\n{}", card.oracle_text, card.printed_text).to_lowercase();
  if SHOCK_LAND.is_match(&text) {
    return LandClassification::new(Conditional, "Enters untapped if you pay 2 life");
  }
  if FAST_LAND.is_match(&text) {
    return LandClassification::new(Conditional, "Enters untapped depending on other lands");
  }
  if PAIN_DAMAGE.is_match(&text) && ADDS_MANA.is_match(&text) {
    return LandClassification::new(Conditional, "Taps for colored mana at the cost of life");
  }
  if CHECK_LAND.is_match(&text) {
    return LandClassification::new(Conditional, "Enters untapped if you control a basic type");
  }
  if TAPPED_LAND.is_match(&text) {
    return LandClassification::new(Tapped, "Enters tapped");
  }
  if RESTRICTED_MANA.is_match(&text) {
    return LandClassification::new(Restricted, "Mana can only be spent on some spells");
  }
  if card.produced_mana.is_empty() {
    return LandClassification::new(Restricted, "Produces no mana");
  }
  LandClassification::new(Untapped, "No tapped or restriction condition")
}

/// Returns true if `card` can be played untapped as the first land drop
///
/// Conditional lands count as available even when their condition may not be met on turn 1.
pub fn is_available_on_turn1(card: &Card) -> bool {
  classify(card).category.is_available_on_turn1()
}

/// ManaBase summarizes the lands of a deck
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ManaBase {
  /// Total number of land copies
  pub total: usize,
  /// Number of land copies in each category
  pub categories: BTreeMap<LandCategory, usize>,
  /// Number of land copies that can produce each color
  pub sources: BTreeMap<Color, usize>,
  /// Number of land copies available on turn 1 that can produce each color
  pub turn1_sources: BTreeMap<Color, usize>,
}

impl ManaBase {
  pub fn from_deck(deck: &Deck) -> Self {
    let mut mana_base = Self::default();
    for cc in deck.iter().filter(|cc| cc.card.is_land()) {
      let category = classify(&cc.card).category;
      mana_base.total += cc.count;
      *mana_base.categories.entry(category).or_insert(0) += cc.count;
      for color in &cc.card.produced_mana {
        *mana_base.sources.entry(*color).or_insert(0) += cc.count;
        if category.is_available_on_turn1() {
          *mana_base.turn1_sources.entry(*color).or_insert(0) += cc.count;
        }
      }
    }
    mana_base
  }

  /// Returns the number of land copies in `category`
  pub fn count(&self, category: LandCategory) -> usize {
    self.categories.get(&category).copied().unwrap_or(0)
  }
}
