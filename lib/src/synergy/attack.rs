//! # Attack triggers
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

/// The minimum number of creature copies for an attacking deck
pub const ATTACK_MIN_CREATURES: usize = 10;

lazy_static! {
  static ref ATTACK_ROLES: RoleTable = RoleTable::new(vec![
    Role::new("extra_combat", &[r"\badditional combat phase\b"]),
    Role::new(
      "attack_triggers",
      &[r"\bwhenever [^,.]*\battacks?\b", r"\bbattle cry\b"],
    )
    .keyword("Battle cry"),
    Role::new("raid", &[r"\braid\b", r"\bif you attacked (this turn|with)\b"]),
    Role::new(
      "enablers",
      &[
        r"\bcreatures you control (have|gain|get [^.]* and gain) [^.]*\b(haste|vigilance|menace|trample|flying)\b",
        r"\bgains? (haste|vigilance|menace|trample|flying)\b",
      ],
    )
    .keyword("Haste")
    .keyword("Vigilance")
    .keyword("Menace")
    .keyword("Trample")
    .keyword("Flying"),
  ]);
}

/// AttackTriggerSynergy is a creature deck with abilities that trigger on attacking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTriggerSynergy {
  /// The number of creature copies
  pub creature_count: usize,
  pub extra_combat: Vec<String>,
  pub attack_triggers: Vec<String>,
  pub raid: Vec<String>,
  pub enablers: Vec<String>,
  pub score: u8,
}

impl Scored for AttackTriggerSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AttackTriggerDetector;

impl Detector for AttackTriggerDetector {
  type Synergy = AttackTriggerSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<AttackTriggerSynergy> {
    let creatures: usize = cards
      .iter()
      .filter(|cc| cc.card.is_creature())
      .map(|cc| cc.count)
      .sum();
    if creatures < ATTACK_MIN_CREATURES {
      return Vec::new();
    }
    let roles = ATTACK_ROLES.assign(cards);
    // Extra combats strengthen attack triggers but are not triggers themselves
    let direct = roles.len("attack_triggers") + roles.len("raid");
    if direct == 0 {
      return Vec::new();
    }
    let triggers = direct + roles.len("extra_combat");
    let enablers = roles.len("enablers");
    let score = if triggers >= 6 && enablers >= 6 && creatures >= 20 {
      9
    } else if triggers >= 4 && enablers >= 3 && creatures >= 16 {
      8
    } else if triggers >= 2 && enablers >= 2 {
      6
    } else {
      4
    };
    vec![AttackTriggerSynergy {
      creature_count: creatures,
      extra_combat: roles.names("extra_combat"),
      attack_triggers: roles.names("attack_triggers"),
      raid: roles.names("raid"),
      enablers: roles.names("enablers"),
      score,
    }]
  }
}

pub fn detect_attack_trigger_synergy(cards: &[DeckCard]) -> Option<AttackTriggerSynergy> {
  AttackTriggerDetector.detect(cards).pop()
}

#[cfg(test)]
mod tests {
  use crate::card::Card;
  use crate::synergy::attack::*;

  fn with_keyword(mut card: Card, keyword: &str) -> Card {
    card.keywords.push(keyword.to_string());
    card
  }

  #[test]
  fn attackers_with_triggers() {
    let deck = deck![
      4 => card!("Goblin Rabblemaster", "Creature — Goblin Warrior", "Other Goblin creatures you control attack each combat if able.\nAt the beginning of combat on your turn, create a 1/1 red Goblin creature token with haste.\nWhenever Goblin Rabblemaster attacks, it gets +1/+0 until end of turn for each other attacking Goblin."),
      4 => with_keyword(card!("Hero of Bladehold", "Creature — Human Knight", "Battle cry\nWhenever Hero of Bladehold attacks, create two 1/1 white Soldier creature tokens that are tapped and attacking."), "Battle cry"),
      4 => card!("Mardu Heart-Piercer", "Creature — Human Archer", "Raid — When Mardu Heart-Piercer enters the battlefield, if you attacked this turn, Mardu Heart-Piercer deals 2 damage to any target."),
      4 => with_keyword(card!("Goblin Guide", "Creature — Goblin Scout", "Haste"), "Haste"),
      4 => with_keyword(card!("Serra Angel", "Creature — Angel", "Flying, vigilance"), "Flying"),
    ];
    let synergy = detect_attack_trigger_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.creature_count, 20);
    assert_eq!(
      synergy.attack_triggers,
      vec!["Goblin Rabblemaster", "Hero of Bladehold"]
    );
    assert_eq!(synergy.raid, vec!["Mardu Heart-Piercer"]);
    assert_eq!(synergy.enablers, vec!["Goblin Guide", "Serra Angel"]);
    assert_eq!(synergy.score, 6);
  }

  fn creatures(prefix: &str, n: usize, count: usize, attacks: bool) -> Vec<DeckCard> {
    (0..n)
      .map(|i| {
        let name = format!("{} {}", prefix, i);
        let card = if attacks {
          card!(&name, "Creature — Human Warrior", format!("Whenever {} attacks, you gain 1 life.", name))
        } else {
          with_keyword(card!(&name, "Creature — Goblin", "Haste"), "Haste")
        };
        DeckCard { card, count }
      })
      .collect()
  }

  #[test]
  fn wide_attacking_deck_scores_nine() {
    let mut cards = creatures("Raider", 6, 2, true);
    cards.extend(creatures("Runner", 6, 2, false));
    let deck = crate::deck::Deck::from_entries(cards);
    let synergy = detect_attack_trigger_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.creature_count, 24);
    assert_eq!(synergy.attack_triggers.len(), 6);
    assert_eq!(synergy.enablers.len(), 6);
    assert_eq!(synergy.score, 9);
  }

  #[test]
  fn solid_attacking_deck_scores_eight() {
    let mut cards = creatures("Raider", 4, 2, true);
    cards.extend(creatures("Runner", 3, 3, false));
    let deck = crate::deck::Deck::from_entries(cards);
    let synergy = detect_attack_trigger_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.creature_count, 17);
    assert_eq!(synergy.score, 8);
  }

  #[test]
  fn extra_combat_alone_is_not_a_trigger() {
    let relentless = card!(
      "Relentless Assault",
      "Sorcery",
      "Untap all creatures that attacked this turn. After this main phase, there is an additional combat phase followed by an additional main phase."
    );
    let mut cards = creatures("Runner", 5, 4, false);
    cards.push(DeckCard { card: relentless, count: 4 });
    let deck = crate::deck::Deck::from_entries(cards.clone());
    assert_eq!(detect_attack_trigger_synergy(&deck.cards), None);

    cards.extend(creatures("Raider", 1, 4, true));
    let deck = crate::deck::Deck::from_entries(cards);
    let synergy = detect_attack_trigger_synergy(&deck.cards).unwrap();
    assert_eq!(synergy.extra_combat, vec!["Relentless Assault"]);
    assert_eq!(synergy.attack_triggers, vec!["Raider 0"]);
  }

  #[test]
  fn too_few_creatures() {
    let deck = deck![
      4 => card!("Goblin Rabblemaster", "Creature — Goblin Warrior", "Whenever Goblin Rabblemaster attacks, it gets +1/+0 until end of turn."),
    ];
    assert_eq!(detect_attack_trigger_synergy(&deck.cards), None);
  }

  #[test]
  fn creatures_without_triggers() {
    let deck = deck![20 => with_keyword(card!("Goblin Guide", "Creature — Goblin Scout", "Haste"), "Haste")];
    assert_eq!(detect_attack_trigger_synergy(&deck.cards), None);
  }
}
