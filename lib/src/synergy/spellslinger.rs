//! # Spellslinger
use crate::card::Card;
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

/// The minimum number of instant and sorcery copies for a spellslinger deck
pub const SPELLSLINGER_MIN_SPELLS: usize = 8;

lazy_static! {
  static ref SPELLSLINGER_ROLES: RoleTable = RoleTable::new(vec![
    Role::new(
      "copiers",
      &[r"\bcopy (target|that|it|the next|each)\b[^.]*\b(instant|sorcery|spell)\b"],
    ),
    Role::new(
      "recursion",
      &[
        r"\bflashback\b",
        r"\breturn [^.]*\b(instant|sorcery) card[^.]*from your graveyard",
        r"\b(instant|sorcery) cards? in your graveyard\b[^.]*\b(flashback|cast)\b",
      ],
    ),
    Role::new(
      "card_advantage",
      &[r"whenever you cast [^,]*\b(instant|sorcery|noncreature) spell[^,]*, (you may )?(draw|scry|look at|investigate)"],
    ),
    Role::new(
      "cost_reduction",
      &[r"\b(instant|sorcery|noncreature)( and sorcery| or sorcery)? spells? you cast costs? \{\d+\} less"],
    ),
    Role::new(
      "cast_triggers",
      &[
        r"whenever you cast (an?|your (first|second)) [^,]*\b(instant|sorcery|noncreature) spell",
        r"\bprowess\b",
        r"\bmagecraft\b",
      ],
    )
    .keyword("Prowess"),
  ]);
}

const ENABLER_ROLES: [&str; 5] = [
  "copiers",
  "recursion",
  "card_advantage",
  "cost_reduction",
  "cast_triggers",
];

/// SpellslingerSynergy is a deck of instants and sorceries backed by cards that reward casting them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellslingerSynergy {
  /// The number of instant and sorcery copies
  pub spell_count: usize,
  pub copiers: Vec<String>,
  pub recursion: Vec<String>,
  pub card_advantage: Vec<String>,
  pub cost_reduction: Vec<String>,
  pub cast_triggers: Vec<String>,
  pub score: u8,
}

impl Scored for SpellslingerSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SpellslingerDetector;

impl Detector for SpellslingerDetector {
  type Synergy = SpellslingerSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<SpellslingerSynergy> {
    let spells: usize = cards
      .iter()
      .filter(|cc| Card::is_instant_or_sorcery(&cc.card))
      .map(|cc| cc.count)
      .sum();
    if spells < SPELLSLINGER_MIN_SPELLS {
      return Vec::new();
    }
    let roles = SPELLSLINGER_ROLES.assign(cards);
    let enablers: usize = ENABLER_ROLES.iter().map(|r| roles.len(r)).sum();
    if enablers == 0 {
      return Vec::new();
    }
    let diversity = roles.active_roles();
    let score = if enablers >= 6 && spells >= 16 && diversity >= 3 {
      9
    } else if enablers >= 4 && spells >= 12 {
      8
    } else if enablers >= 2 {
      6
    } else {
      5
    };
    vec![SpellslingerSynergy {
      spell_count: spells,
      copiers: roles.names("copiers"),
      recursion: roles.names("recursion"),
      card_advantage: roles.names("card_advantage"),
      cost_reduction: roles.names("cost_reduction"),
      cast_triggers: roles.names("cast_triggers"),
      score,
    }]
  }
}

pub fn detect_spellslinger_synergy(cards: &[DeckCard]) -> Option<SpellslingerSynergy> {
  SpellslingerDetector.detect(cards).pop()
}
