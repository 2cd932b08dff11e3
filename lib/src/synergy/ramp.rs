//! # Ramp
use crate::card::Card;
use crate::deck::DeckCard;
use crate::synergy::rules::{Role, RoleTable};
use crate::synergy::{Detector, Scored};

/// The converted mana cost from which a nonland card is a ramp payoff
pub const RAMP_PAYOFF_CMC: f32 = 5.0;

const MANA_ABILITY: &str = r"\{t\}(, [^:]*)?: add\b";

lazy_static! {
  static ref RAMP_ROLES: RoleTable = RoleTable::new(vec![
    Role::new("mana_creatures", &[MANA_ABILITY]).only(|c| c.is_creature() && !c.is_land()),
    Role::new("mana_artifacts", &[MANA_ABILITY]).only(|c| c.is_artifact() && !c.is_land()),
    Role::new(
      "land_ramp",
      &[
        r"search your library for [^.]*\blands?\b[^.]*onto the battlefield",
        r"put a land card from your hand onto the battlefield",
      ],
    )
    .only(|c| !c.is_land()),
    Role::new(
      "extra_land_drops",
      &[r"play (an|two) additional lands?", r"play any number of lands"],
    )
    .only(|c| !c.is_land()),
    Role::new(
      "cost_reduction",
      &[
        r"\baffinity for\b",
        r"\bconvoke\b",
        r"\bimprovise\b",
        r"costs? \{\d+\} less to cast for each",
      ],
    )
    .only(|c| !c.is_land()),
    Role::new("payoffs", &[]).card(is_ramp_payoff),
  ]);
}

const ACCELERATOR_ROLES: [&str; 5] = [
  "mana_creatures",
  "mana_artifacts",
  "land_ramp",
  "extra_land_drops",
  "cost_reduction",
];

fn is_ramp_payoff(card: &Card) -> bool {
  !card.is_land() && card.cmc >= RAMP_PAYOFF_CMC
}

/// RampSynergy pairs mana acceleration with expensive cards to accelerate into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampSynergy {
  pub mana_creatures: Vec<String>,
  pub mana_artifacts: Vec<String>,
  pub land_ramp: Vec<String>,
  pub extra_land_drops: Vec<String>,
  pub cost_reduction: Vec<String>,
  pub payoffs: Vec<String>,
  /// The number of accelerator copies
  pub accelerator_count: usize,
  /// The number of payoff copies
  pub payoff_count: usize,
  pub score: u8,
}

impl Scored for RampSynergy {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RampDetector;

impl Detector for RampDetector {
  type Synergy = RampSynergy;

  fn detect(&self, cards: &[DeckCard]) -> Vec<RampSynergy> {
    let roles = RAMP_ROLES.assign(cards);
    let accelerators: usize = ACCELERATOR_ROLES.iter().map(|r| roles.quantity(r)).sum();
    let payoffs = roles.quantity("payoffs");
    if accelerators == 0 || payoffs == 0 {
      return Vec::new();
    }
    let score = if accelerators >= 5 && payoffs >= 8 {
      if accelerators >= 8 {
        9
      } else {
        8
      }
    } else if accelerators >= 3 && payoffs >= 4 {
      6
    } else {
      4
    };
    vec![RampSynergy {
      mana_creatures: roles.names("mana_creatures"),
      mana_artifacts: roles.names("mana_artifacts"),
      land_ramp: roles.names("land_ramp"),
      extra_land_drops: roles.names("extra_land_drops"),
      cost_reduction: roles.names("cost_reduction"),
      payoffs: roles.names("payoffs"),
      accelerator_count: accelerators,
      payoff_count: payoffs,
      score,
    }]
  }
}

pub fn detect_ramp_synergy(cards: &[DeckCard]) -> Option<RampSynergy> {
  RampDetector.detect(cards).pop()
}
