//! # Graveyard synergy
use crate::card::Card;
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

lazy_static! {
  static ref GRAVEYARD_ROLES: RoleTable = RoleTable::new(vec![
    Role::new(
      "fillers",
      &[
        r"\bmills?\b",
        r"put the top [^.]*cards? of your library into your graveyard",
        r"\bdiscards?\b",
        r"\bdredge\b",
        r"\bsurveil\b",
      ],
    ),
    Role::new(
      "payoffs",
      &[
        r"\bflashback\b",
        r"\bdelve\b",
        r"\bescape\b",
        r"\bembalm\b",
        r"\beternalize\b",
        r"\bunearth\b",
        r"return [^.]*from your graveyard",
        r"\bthreshold\b",
        r"\bdelirium\b",
      ],
    ),
  ]);
}

/// Returns true if the card puts cards into its owner's graveyard
pub fn is_graveyard_filler(card: &Card) -> bool {
  GRAVEYARD_ROLES.classify(card) == Some("fillers")
}

/// GraveyardSynergy pairs cards that fill the graveyard with cards that use it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraveyardSynergy {
  pub fillers: Vec<String>,
  pub payoffs: Vec<String>,
  pub score: u8,
}

impl Scored for GraveyardSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GraveyardDetector;

impl Detector for GraveyardDetector {
  type Synergy = GraveyardSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<GraveyardSynergy> {
    let roles = GRAVEYARD_ROLES.assign(cards);
    let fillers = roles.names("fillers");
    let payoffs = roles.names("payoffs");
    if fillers.is_empty() && payoffs.is_empty() {
      return Vec::new();
    }
    let depth = std::cmp::min(fillers.len(), payoffs.len());
    let score = match depth {
      d if d >= 4 => 9,
      3 => 7,
      2 => 5,
      _ => 3,
    };
    vec![GraveyardSynergy {
      fillers,
      payoffs,
      score,
    }]
  }
}

pub fn detect_graveyard_synergy(cards: &[DeckCard]) -> Option<GraveyardSynergy> {
  GraveyardDetector.detect(cards).pop()
}

#[cfg(test)]
mod tests {
  use crate::synergy::graveyard::*;

  #[test]
  fn fillers_and_payoffs() {
    let deck = deck![
      4 => card!("Thought Scour", "Instant", "Target player mills two cards. Draw a card."),
      4 => card!("Stitcher's Supplier", "Creature — Zombie", "When Stitcher's Supplier enters the battlefield or dies, mill three cards."),
      4 => card!("Faithless Looting", "Sorcery", "Draw two cards, then discard two cards."),
      4 => card!("Gurmag Angler", "Creature — Zombie Fish", "Delve"),
      4 => card!("Gravecrawler", "Creature — Zombie", "You may cast Gravecrawler from your graveyard as long as you control a Zombie."),
      4 => card!("Unburial Rites", "Sorcery", "Return target creature card from your graveyard to the battlefield.\nFlashback {3}{W}"),
    ];
    let synergy = detect_graveyard_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.fillers.len(), 3);
    assert_eq!(synergy.payoffs, vec!["Gurmag Angler", "Unburial Rites"]);
    assert_eq!(synergy.score, 5);
  }

  #[test]
  fn single_role_scores_low() {
    let deck = deck![4 => card!("Mind Rot", "Sorcery", "Target player discards two cards.")];
    let synergy = detect_graveyard_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.score, 3);
    assert!(is_graveyard_filler(&deck.cards[0].card));
  }

  #[test]
  fn deep_graveyard_deck() {
    let mut cards = Vec::new();
    for i in 0..4 {
      cards.push(card!(format!("Miller {}", i), "Sorcery", "Mill four cards."));
      cards.push(card!(format!("Eater {}", i), "Creature — Horror", "Delve"));
    }
    let deck = crate::deck::Deck::from_cards(cards);
    assert_eq!(detect_graveyard_synergy(&deck.cards).unwrap().score, 9);
  }
}
