//! # Rule tables
//!
//! A detector describes the roles a card can play in a synergy (producer, payoff, outlet, ...)
//! as a `RoleTable`. Each `Role` is a list of `Matcher`s over a card; a card matches a role
//! if any of its matchers match. Text matchers run against the lowercase oracle text.
use crate::card::Card;
use crate::deck::DeckCard;
use regex::Regex;
use std::collections::HashSet;

/// Compiles a rule pattern. Rule patterns are static, so a bad pattern is a programming error
pub fn pattern(source: &str) -> Regex {
  Regex::new(source).unwrap_or_else(|e| panic!("Failed to compile rule pattern {}: {}", source, e))
}

pub enum Matcher {
  /// Matches the lowercase oracle text
  Text(Regex),
  /// Matches a keyword ability, ignoring case
  Keyword(&'static str),
  /// Matches any other property of the card
  Card(fn(&Card) -> bool),
}

impl Matcher {
  pub fn is_match(&self, card: &Card, text: &str) -> bool {
    match self {
      Self::Text(re) => re.is_match(text),
      Self::Keyword(keyword) => card.has_keyword(keyword),
      Self::Card(p) => p(card),
    }
  }
}

pub struct Role {
  pub name: &'static str,
  matchers: Vec<Matcher>,
  applies_to: Option<fn(&Card) -> bool>,
}

impl Role {
  /// Returns a role matching any of the text `patterns`
  pub fn new(name: &'static str, patterns: &[&str]) -> Self {
    Self {
      name,
      matchers: patterns.iter().map(|p| Matcher::Text(pattern(p))).collect(),
      applies_to: None,
    }
  }

  /// Also matches cards with the keyword ability
  pub fn keyword(mut self, keyword: &'static str) -> Self {
    self.matchers.push(Matcher::Keyword(keyword));
    self
  }

  /// Also matches cards satisfying the predicate
  pub fn card(mut self, p: fn(&Card) -> bool) -> Self {
    self.matchers.push(Matcher::Card(p));
    self
  }

  /// Restricts the role to cards satisfying the predicate
  pub fn only(mut self, p: fn(&Card) -> bool) -> Self {
    self.applies_to = Some(p);
    self
  }

  pub fn is_match(&self, card: &Card, text: &str) -> bool {
    if let Some(applies_to) = self.applies_to {
      if !applies_to(card) {
        return false;
      }
    }
    self.matchers.iter().any(|m| m.is_match(card, text))
  }
}

/// RoleTable is an ordered list of roles. A card is assigned to the first role it matches,
/// so that no card appears in two roles of the same detector
pub struct RoleTable {
  roles: Vec<Role>,
}

impl RoleTable {
  pub fn new(roles: Vec<Role>) -> Self {
    Self { roles }
  }

  /// Returns the name of the first role matching the card
  pub fn classify(&self, card: &Card) -> Option<&'static str> {
    let text = card.rules_text();
    self
      .roles
      .iter()
      .find(|role| role.is_match(card, &text))
      .map(|role| role.name)
  }

  /// Assigns every card to its first matching role. Cards are deduplicated by name
  pub fn assign<'a>(&self, cards: &'a [DeckCard]) -> RoleAssignment<'a> {
    let mut assignment = RoleAssignment {
      names: self.roles.iter().map(|role| role.name).collect(),
      cards: self.roles.iter().map(|_| Vec::new()).collect(),
    };
    let mut seen = HashSet::new();
    for cc in cards {
      if !seen.insert(cc.card.name.as_str()) {
        continue;
      }
      let text = cc.card.rules_text();
      if let Some(i) = self.roles.iter().position(|r| r.is_match(&cc.card, &text)) {
        trace!("{} matches role {}", cc.card.name, self.roles[i].name);
        assignment.cards[i].push(cc);
      }
    }
    assignment
  }
}

/// The cards of a deck grouped by the role they play
#[derive(Debug)]
pub struct RoleAssignment<'a> {
  names: Vec<&'static str>,
  cards: Vec<Vec<&'a DeckCard>>,
}

impl<'a> RoleAssignment<'a> {
  /// Returns the cards assigned to `role`, empty for an unknown role
  pub fn cards(&self, role: &str) -> &[&'a DeckCard] {
    match self.names.iter().position(|name| *name == role) {
      Some(i) => &self.cards[i],
      None => &[],
    }
  }

  /// Returns the names of the cards assigned to `role`
  pub fn names(&self, role: &str) -> Vec<String> {
    self
      .cards(role)
      .iter()
      .map(|cc| cc.card.name.clone())
      .collect()
  }

  /// Returns the number of distinct cards assigned to `role`
  pub fn len(&self, role: &str) -> usize {
    self.cards(role).len()
  }

  /// Returns the number of copies of the cards assigned to `role`
  pub fn quantity(&self, role: &str) -> usize {
    self.cards(role).iter().map(|cc| cc.count).sum()
  }

  /// Returns the number of roles with at least one card
  pub fn active_roles(&self) -> usize {
    self.cards.iter().filter(|cards| !cards.is_empty()).count()
  }

  pub fn is_empty(&self) -> bool {
    self.active_roles() == 0
  }
}
