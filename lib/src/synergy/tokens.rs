//! # Token synergy
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

lazy_static! {
  static ref TOKEN_ROLES: RoleTable = RoleTable::new(vec![
    Role::new(
      "producers",
      &[
        r"\bcreate\b[^.]*\btokens?\b",
        r"\btokens?\b[^.]*onto the battlefield",
        r"\btokens?\b[^.]*\bcop(y|ies)\b",
      ],
    ),
    Role::new(
      "payoffs",
      &[
        r"whenever (a|another|one or more) (nontoken )?(creatures?|tokens?)\b[^.,]*\benters?\b",
        r"\bsacrifice (a|another) creature\b",
        r"\btokens? you control\b",
        r"for each [^.]*\btoken\b",
      ],
    ),
  ]);
}

/// TokenSynergy pairs token producers with cards that reward many creatures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSynergy {
  pub producers: Vec<String>,
  pub payoffs: Vec<String>,
  pub score: u8,
}

impl Scored for TokenSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokenDetector;

impl Detector for TokenDetector {
  type Synergy = TokenSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<TokenSynergy> {
    let roles = TOKEN_ROLES.assign(cards);
    let producers = roles.names("producers");
    let payoffs = roles.names("payoffs");
    if producers.is_empty() && payoffs.is_empty() {
      return Vec::new();
    }
    let score = match (producers.len(), payoffs.len()) {
      (p, q) if p >= 3 && q >= 2 => 8,
      (p, q) if p >= 2 && q >= 1 => 6,
      _ => 4,
    };
    vec![TokenSynergy {
      producers,
      payoffs,
      score,
    }]
  }
}

pub fn detect_token_synergy(cards: &[DeckCard]) -> Option<TokenSynergy> {
  TokenDetector.detect(cards).pop()
}

#[cfg(test)]
mod tests {
  use crate::synergy::tokens::*;

  #[test]
  fn lone_producer() {
    let deck = deck![
      4 => card!("Raise the Alarm", "Instant", "Create two 1/1 white Soldier creature tokens."),
    ];
    let synergy = detect_token_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.producers, vec!["Raise the Alarm"]);
    assert!(synergy.payoffs.is_empty());
    assert_eq!(synergy.score, 4);
  }

  #[test]
  fn producers_and_payoffs() {
    let deck = deck![
      4 => card!("Raise the Alarm", "Instant", "Create two 1/1 white Soldier creature tokens."),
      4 => card!("Lingering Souls", "Sorcery", "Create two 1/1 white Spirit creature tokens with flying."),
      4 => card!("Secure the Wastes", "Instant", "Create X 1/1 white Warrior creature tokens."),
      2 => card!("Intangible Virtue", "Enchantment", "Creature tokens you control get +1/+1 and have vigilance."),
      2 => card!(
        "Soul Warden",
        "Creature — Human Cleric",
        "Whenever another creature enters the battlefield, you gain 1 life."
      ),
    ];
    let synergy = detect_token_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.producers.len(), 3);
    assert_eq!(synergy.payoffs.len(), 2);
    assert_eq!(synergy.score, 8);
  }

  #[test]
  fn no_tokens() {
    let deck = deck![4 => card!("Grizzly Bears", "Creature — Bear")];
    assert_eq!(detect_token_synergy(&deck.cards), None);
  }
}
