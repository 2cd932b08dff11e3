//! # Internal card representation
//!
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// The basic land types, in WUBRG order
pub const BASIC_LAND_TYPES: [&str; 5] = ["plains", "island", "swamp", "mountain", "forest"];

/// The card types a card can have, as they appear in a type line
pub const CARD_TYPES: [&str; 9] = [
  "artifact",
  "battle",
  "creature",
  "enchantment",
  "instant",
  "kindred",
  "land",
  "planeswalker",
  "sorcery",
];

// NOTE: PartialEq and Eq are implemented below
/// Card represents a Magic: The Gathering card, as resolved from a card database
/// like [Scryfall](https://scryfall.com/docs/api/cards)
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Card {
  /// String representing the card name
  pub name: String,
  /// Scryfall oracle id
  #[serde(default)]
  pub oracle_id: String,
  /// The English type line, e.g. "Creature — Human Wizard"
  #[serde(default)]
  pub type_line: String,
  /// Localized type line, for display only
  #[serde(default)]
  pub printed_type_line: Option<String>,
  /// English rules text. All text heuristics match against this field
  #[serde(default)]
  pub oracle_text: String,
  /// Localized rules text, for display only
  #[serde(default)]
  pub printed_text: String,
  /// String representing the card mana cost, in "{X}{R}{R}" style format
  #[serde(default)]
  pub mana_cost: String,
  /// Converted mana cost. Fractional for some un-set cards
  #[serde(default)]
  pub cmc: f32,
  #[serde(default)]
  pub colors: BTreeSet<Color>,
  /// Normalized keyword ability names, e.g. "Flying"
  #[serde(default)]
  pub keywords: Vec<String>,
  /// The mana a land can tap for, empty if none or unknown
  #[serde(default)]
  pub produced_mana: BTreeSet<Color>,
}

/// Color represents a [color](https://mtg.gamepedia.com/Color) of mana
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
  #[serde(rename = "W")]
  White,
  #[serde(rename = "U")]
  Blue,
  #[serde(rename = "B")]
  Black,
  #[serde(rename = "R")]
  Red,
  #[serde(rename = "G")]
  Green,
  #[serde(rename = "C", other)]
  Colorless,
}

impl Color {
  /// The five colors, without colorless
  pub const WUBRG: [Color; 5] = [
    Color::White,
    Color::Blue,
    Color::Black,
    Color::Red,
    Color::Green,
  ];

  /// Returns true for W, U, B, R and G
  pub fn is_colored(self) -> bool {
    self != Self::Colorless
  }
}

impl Card {
  /// Returns an empty new card
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns true if the type line names the land type
  pub fn is_land(&self) -> bool {
    self.has_type("land")
  }

  pub fn is_creature(&self) -> bool {
    self.has_type("creature")
  }

  pub fn is_artifact(&self) -> bool {
    self.has_type("artifact")
  }

  /// Returns true for instants and sorceries
  pub fn is_instant_or_sorcery(&self) -> bool {
    self.has_type("instant") || self.has_type("sorcery")
  }

  /// Returns true for cards that stay on the battlefield once resolved
  pub fn is_permanent(&self) -> bool {
    !self.is_instant_or_sorcery() && !self.card_types().is_empty()
  }

  /// Returns true if the type line contains `kind`, ignoring case
  pub fn has_type(&self, kind: &str) -> bool {
    self.type_line.to_lowercase().contains(kind)
  }

  /// Returns true if the card has the keyword ability, ignoring case
  pub fn has_keyword(&self, keyword: &str) -> bool {
    self
      .keywords
      .iter()
      .any(|k| k.eq_ignore_ascii_case(keyword))
  }

  /// Returns the lowercase oracle text, the input to every text heuristic
  pub fn rules_text(&self) -> String {
    self.oracle_text.to_lowercase()
  }

  /// Returns the card types named before the dash of any face, e.g. ["artifact", "creature"]
  pub fn card_types(&self) -> Vec<&'static str> {
    let type_line = self.type_line.to_lowercase();
    let types: Vec<&str> = type_line
      .split("//")
      .map(|face| face.split(|c: char| c == '—' || c == '-').next().unwrap_or(""))
      .collect();
    CARD_TYPES
      .iter()
      .copied()
      .filter(|kind| types.iter().any(|t| t.contains(kind)))
      .collect()
  }

  /// Returns the subtypes of the card's creature faces, in type line order and without duplicates
  ///
  /// Each face of a multi-face card ("A // B") is considered on its own. The subtype
  /// segment is everything after the dash, split on whitespace, middle dots, slashes and commas.
  pub fn creature_subtypes(&self) -> Vec<String> {
    let mut subtypes: Vec<String> = Vec::new();
    for face in self.type_line.split("//") {
      if !face.to_lowercase().contains("creature") {
        continue;
      }
      for subtype in subtype_segment(face) {
        if !subtypes.contains(&subtype) {
          subtypes.push(subtype);
        }
      }
    }
    subtypes
  }

  /// Returns the basic land types named in the type line, in lowercase
  pub fn basic_land_types(&self) -> Vec<&'static str> {
    let type_line = self.type_line.to_lowercase();
    let subtypes: Vec<String> = type_line
      .split("//")
      .flat_map(subtype_segment)
      .collect();
    BASIC_LAND_TYPES
      .iter()
      .copied()
      .filter(|basic| subtypes.iter().any(|s| s == basic))
      .collect()
  }
}

/// Splits the segment after the type line dash into subtype words
fn subtype_segment(face: &str) -> Vec<String> {
  let segment = match face.find('—') {
    Some(idx) => &face[idx + '—'.len_utf8()..],
    None => match face.find(" - ") {
      Some(idx) => &face[idx + 3..],
      None => return Vec::new(),
    },
  };
  segment
    .split(|c: char| c.is_whitespace() || c == '·' || c == '/' || c == ',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(String::from)
    .collect()
}

impl PartialEq for Card {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Eq for Card {}

impl Hash for Card {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state);
  }
}

/// Builds a `Card` for tests from a name, a type line and, optionally, oracle text
#[cfg(test)]
macro_rules! card {
  ($name:expr, $type_line:expr) => {
    card!($name, $type_line, "")
  };
  ($name:expr, $type_line:expr, $text:expr) => {{
    let mut card = $crate::card::Card::new();
    card.name = String::from($name);
    card.type_line = String::from($type_line);
    card.oracle_text = String::from($text);
    card
  }};
}
