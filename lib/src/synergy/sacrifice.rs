//! # Sacrifice synergy
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

lazy_static! {
  static ref SACRIFICE_ROLES: RoleTable = RoleTable::new(vec![
    Role::new(
      "outlets",
      &[r"\bsacrifice (a|another|an) (creature|artifact|permanent|nonland permanent)[^:.]*:"],
    ),
    Role::new(
      "payoffs",
      &[
        r"whenever [^.,]*\b(a|another|one or more) (nontoken )?(creatures?|permanents?|artifacts?) (you control )?(die|dies|is put into a graveyard)",
        r"whenever you sacrifice",
        r"whenever [^.,]* dies, (each|target) opponent",
      ],
    ),
    Role::new(
      "fodder",
      &[
        r"\bcreate[^.]*\bcreature tokens?\b",
        r"\b(persist|undying)\b",
        r"when [^.,]* dies, (return|create|you may return)",
        r"return [^.]* from your graveyard to the battlefield",
      ],
    ),
  ]);
}

/// SacrificeSynergy is a sacrifice engine made of outlets, fodder and death payoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SacrificeSynergy {
  pub outlets: Vec<String>,
  pub fodder: Vec<String>,
  pub payoffs: Vec<String>,
  pub score: u8,
}

impl Scored for SacrificeSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SacrificeDetector;

impl Detector for SacrificeDetector {
  type Synergy = SacrificeSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<SacrificeSynergy> {
    let roles = SACRIFICE_ROLES.assign(cards);
    let present = roles.active_roles();
    if present < 2 {
      return Vec::new();
    }
    let outlets = roles.names("outlets");
    let fodder = roles.names("fodder");
    let payoffs = roles.names("payoffs");
    let score = if present == 3 {
      match *[outlets.len(), fodder.len(), payoffs.len()].iter().min().unwrap_or(&0) {
        d if d >= 3 => 9,
        2 => 8,
        _ => 7,
      }
    } else if outlets.len() + fodder.len() + payoffs.len() >= 6 {
      6
    } else {
      5
    };
    vec![SacrificeSynergy {
      outlets,
      fodder,
      payoffs,
      score,
    }]
  }
}

pub fn detect_sacrifice_synergy(cards: &[DeckCard]) -> Option<SacrificeSynergy> {
  SacrificeDetector.detect(cards).pop()
}
