//! # Simulated hands
use crate::card::{Card, Color};
use crate::land::classify;
use rand::prelude::*;
use std::collections::BTreeSet;

/// The number of cards in an opening hand
pub const STARTING_HAND_SIZE: usize = 7;

/// Hand represents the opening hand along with any cards drawn afterwards
/// Note that the card draw is in order and represents the cards drawn during the draw step
#[derive(Debug, Clone)]
pub struct Hand<'a> {
  cards: Vec<&'a Card>,
  pub opening_hand_size: usize,
}

impl<'a> Hand<'a> {
  /// Returns a new hand with opening hand from `opening`, and card draw from `draws`
  pub fn from_opening_and_draws(opening: &[&'a Card], draws: &[&'a Card]) -> Self {
    let mut cards = Vec::with_capacity(opening.len() + draws.len());
    cards.extend_from_slice(opening);
    cards.extend_from_slice(draws);
    Self {
      cards,
      opening_hand_size: opening.len(),
    }
  }

  /// Returns a new random hand of `STARTING_HAND_SIZE` cards plus `draws` cards from `deck`,
  /// where `deck` holds one entry per copy of a card
  ///
  /// `indices` is scratch space holding a permutation of `0..deck.len()`. Every call performs an
  /// independent Fisher-Yates shuffle of the prefix it draws, so the permutation left behind by
  /// a previous call does not bias the next one.
  pub fn from_shuffle<R: Rng + ?Sized>(
    rng: &mut R,
    deck: &[&'a Card],
    indices: &mut Vec<usize>,
    draws: usize,
  ) -> Self {
    // We need to draw our starting hand size + the number of draws specified, capped by the deck_len
    let deck_len = deck.len();
    let cards_to_draw = std::cmp::min(deck_len, STARTING_HAND_SIZE + draws);
    let starting_hand_size = std::cmp::min(deck_len, STARTING_HAND_SIZE);
    if indices.len() != deck_len {
      *indices = (0..deck_len).collect();
    }
    let shuffled: Vec<&'a Card> = indices
      .partial_shuffle(rng, cards_to_draw)
      .0
      .iter()
      .map(|i| deck[*i])
      .collect();
    Self::from_opening_and_draws(
      &shuffled[..starting_hand_size],
      &shuffled[starting_hand_size..],
    )
  }

  /// Returns a slice consisting of cards in the opening hand
  #[inline]
  pub fn opening(&self) -> &[&'a Card] {
    self.slice(0, self.opening_hand_size)
  }

  /// Returns a slice consisting of cards drawn after the opening hand
  #[inline]
  pub fn draws(&self, draws: usize) -> &[&'a Card] {
    self.slice(self.opening_hand_size, self.opening_hand_size + draws)
  }

  /// Returns a slice consisting of cards in the opening hand and the first `draws` draws
  #[inline]
  pub fn opening_with_draws(&self, draws: usize) -> &[&'a Card] {
    self.slice(0, self.opening_hand_size + draws)
  }

  /// Returns the total number of cards in hand
  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  /// Returns true if any card in the opening hand and draws satisfies the predicate
  pub fn any_in_opening_with_draws<P>(&self, draws: usize, p: P) -> bool
  where
    P: FnMut(&&'a Card) -> bool,
  {
    self.opening_with_draws(draws).iter().any(p)
  }

  /// Returns the number of cards in the opening hand and draws that satisfies the predicate
  pub fn count_in_opening_with_draws<P>(&self, draws: usize, p: P) -> usize
  where
    P: Fn(&Card) -> bool,
  {
    self
      .opening_with_draws(draws)
      .iter()
      .fold(0, |count, card| if p(*card) { count + 1 } else { count })
  }

  /// Returns the number of lands in the opening hand
  pub fn opening_land_count(&self) -> usize {
    self.count_in_opening_with_draws(0, Card::is_land)
  }

  /// Returns the colors (never colorless) that the lands in the opening hand can produce
  /// when played on turn 1
  pub fn turn1_colors(&self) -> BTreeSet<Color> {
    self
      .opening()
      .iter()
      .filter(|card| card.is_land())
      .filter(|card| classify(card).category.is_available_on_turn1())
      .flat_map(|card| card.produced_mana.iter().copied())
      .filter(|color| color.is_colored())
      .collect()
  }

  #[inline]
  fn slice(&self, from: usize, to: usize) -> &[&'a Card] {
    let to = std::cmp::min(to, self.cards.len());
    let from = std::cmp::min(from, to);
    &self.cards[from..to]
  }
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use crate::hand::*;
  use rand::rngs::SmallRng;

  fn forest() -> Card {
    let mut card = card!("Forest", "Basic Land — Forest");
    card.produced_mana = [Color::Green].iter().copied().collect();
    card
  }

  #[test]
  fn hand_slices() {
    let f = forest();
    let elf = card!("Llanowar Elves", "Creature — Elf Druid");
    let opening = vec![&f, &f, &elf];
    let draws = vec![&elf, &f];
    let hand = Hand::from_opening_and_draws(&opening, &draws);
    assert_eq!(hand.len(), 5);
    assert_eq!(hand.opening().len(), 3);
    assert_eq!(hand.draws(1).len(), 1);
    assert_eq!(hand.draws(10).len(), 2);
    assert_eq!(hand.opening_with_draws(1).len(), 4);
    assert_eq!(hand.opening_land_count(), 2);
    assert_eq!(hand.count_in_opening_with_draws(2, Card::is_land), 3);
    assert!(hand.any_in_opening_with_draws(0, |c| c.name == "Llanowar Elves"));
  }

  #[test]
  fn hand_from_short_deck_does_not_panic() {
    let f = forest();
    let deck = vec![&f, &f, &f];
    let mut rng = SmallRng::seed_from_u64(7);
    let mut indices = Vec::new();
    let hand = Hand::from_shuffle(&mut rng, &deck, &mut indices, 3);
    assert_eq!(hand.opening().len(), 3);
    assert!(hand.draws(3).is_empty());
  }

  #[test]
  fn hand_from_shuffle_draws_prefix() {
    let f = forest();
    let elf = card!("Llanowar Elves", "Creature — Elf Druid");
    let mut deck = vec![&f; 20];
    deck.extend(vec![&elf; 20]);
    let mut rng = SmallRng::seed_from_u64(42);
    let mut indices = Vec::new();
    for _ in 0..100 {
      let hand = Hand::from_shuffle(&mut rng, &deck, &mut indices, 3);
      assert_eq!(hand.len(), 10);
      assert_eq!(hand.opening().len(), STARTING_HAND_SIZE);
      assert_eq!(hand.draws(3).len(), 3);
    }
  }

  #[test]
  fn turn1_colors_skip_tapped_lands_and_colorless() {
    let f = forest();
    let mut shrine = card!(
      "Jungle Shrine",
      "Land",
      "Jungle Shrine enters the battlefield tapped."
    );
    shrine.produced_mana = [Color::Red, Color::Green, Color::White]
      .iter()
      .copied()
      .collect();
    let mut wastes = card!("Wastes", "Basic Land");
    wastes.produced_mana = [Color::Colorless].iter().copied().collect();
    let opening = vec![&f, &shrine, &wastes];
    let hand = Hand::from_opening_and_draws(&opening, &[]);
    let colors = hand.turn1_colors();
    assert_eq!(colors.len(), 1);
    assert!(colors.contains(&Color::Green));
  }
}
