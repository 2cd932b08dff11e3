//! # Deck lists
//!
use crate::card::Card;
use std::collections::BTreeMap;

/// Deck is a multiset of cards, e.g. a mainboard
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Deck {
  pub cards: Vec<DeckCard>,
}

/// DeckCard pairs a card with the number of copies in the deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckCard {
  pub card: Card,
  pub count: usize,
}

/// DeckBuilder merges copies of the same card (by name) into a single `DeckCard`
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
  cards: BTreeMap<String, DeckCard>,
}

impl DeckBuilder {
  pub fn new() -> Self {
    Self {
      cards: BTreeMap::new(),
    }
  }

  pub fn insert(self, card: Card) -> Self {
    self.insert_count(card, 1)
  }

  pub fn insert_count(mut self, card: Card, count: usize) -> Self {
    if count == 0 {
      return self;
    }
    let entry = self
      .cards
      .entry(card.name.clone())
      .or_insert(DeckCard { card, count: 0 });
    entry.count += count;
    self
  }

  pub fn build(self) -> Deck {
    Deck {
      cards: self.cards.into_iter().map(|(_, v)| v).collect(),
    }
  }
}

impl Deck {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns a deck from (card, count) entries, merging duplicate cards
  pub fn from_entries<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = DeckCard>,
  {
    let mut b = DeckBuilder::new();
    for entry in entries {
      b = b.insert_count(entry.card, entry.count);
    }
    b.build()
  }

  pub fn from_cards<I>(cards: I) -> Self
  where
    I: IntoIterator<Item = Card>,
  {
    let mut b = DeckBuilder::new();
    for card in cards {
      b = b.insert(card);
    }
    b.build()
  }

  /// Returns one reference per copy of every card in the deck
  pub fn flatten(&self) -> Vec<&Card> {
    let mut result = Vec::with_capacity(self.len());
    for card_count in &self.cards {
      for _ in 0..card_count.count {
        result.push(&card_count.card);
      }
    }
    result
  }

  pub fn card_from_name(&self, name: &str) -> Option<&Card> {
    self.card_count_from_name(name).map(|o| &o.card)
  }

  /// Returns the entry whose card name matches `name`, ignoring case
  pub fn card_count_from_name(&self, name: &str) -> Option<&DeckCard> {
    let name_lowercase = name.to_lowercase();
    self
      .cards
      .iter()
      .find(|cc| cc.card.name.to_lowercase() == name_lowercase)
  }

  /// Returns the number of land copies in the deck
  pub fn land_count(&self) -> usize {
    self
      .cards
      .iter()
      .filter(|cc| cc.card.is_land())
      .fold(0, |accum, cc| accum + cc.count)
  }

  /// Returns the average converted mana cost of the nonland cards, or 0 without nonland cards
  pub fn average_cmc(&self) -> f64 {
    let (n, total) = self
      .cards
      .iter()
      .filter(|cc| !cc.card.is_land())
      .fold((0, 0.0), |(n, total), cc| {
        (n + cc.count, total + cc.count as f64 * f64::from(cc.card.cmc))
      });
    if n == 0 {
      0.0
    } else {
      total / n as f64
    }
  }

  /// Returns the total number of cards in the deck
  pub fn len(&self) -> usize {
    self.cards.iter().map(|cc| cc.count).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn iter(&self) -> std::slice::Iter<'_, DeckCard> {
    self.cards.iter()
  }
}

/// Builds a `Deck` for tests from `count => card` pairs
#[cfg(test)]
macro_rules! deck {
  ($($count:expr => $card:expr),* $(,)?) => {
    $crate::deck::Deck::from_entries(vec![
      $($crate::deck::DeckCard { card: $card, count: $count }),*
    ])
  };
}

#[cfg(test)]
mod tests {
  use crate::deck::*;

  #[test]
  fn deck_builder_merges_duplicates() {
    let deck = deck![
      4 => card!("Llanowar Elves", "Creature — Elf Druid"),
      2 => card!("Llanowar Elves", "Creature — Elf Druid"),
      20 => card!("Forest", "Basic Land — Forest"),
    ];
    assert_eq!(deck.cards.len(), 2);
    assert_eq!(deck.len(), 26);
    assert_eq!(
      deck
        .card_count_from_name("llanowar elves")
        .map(|cc| cc.count),
      Some(6)
    );
  }

  #[test]
  fn deck_builder_drops_zero_counts() {
    let deck = deck![0 => card!("Island", "Basic Land — Island")];
    assert!(deck.is_empty());
    assert!(deck.cards.is_empty());
  }

  #[test]
  fn deck_flatten() {
    let deck = deck![
      3 => card!("Opt", "Instant"),
      2 => card!("Island", "Basic Land — Island"),
    ];
    let flat = deck.flatten();
    assert_eq!(flat.len(), 5);
    assert_eq!(flat.iter().filter(|c| c.is_land()).count(), 2);
  }

  #[test]
  fn deck_average_cmc_ignores_lands() {
    let mut bolt = card!("Lightning Bolt", "Instant");
    bolt.cmc = 1.0;
    let mut giant = card!("Stone Giant", "Creature — Giant");
    giant.cmc = 4.0;
    let deck = deck![
      2 => bolt,
      2 => giant,
      10 => card!("Mountain", "Basic Land — Mountain"),
    ];
    assert!((deck.average_cmc() - 2.5).abs() < 1e-9);
    assert_eq!(deck.land_count(), 10);
  }

  #[test]
  fn empty_deck_average_cmc() {
    assert_eq!(Deck::new().average_cmc(), 0.0);
  }
}
