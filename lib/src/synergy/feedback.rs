//! # Feedback loops
//!
//! Every ability line of a card is read as an edge from the event that triggers it to the
//! event it produces. Two cards form a feedback loop when each one produces the event that
//! triggers the other, e.g. a card gaining life whenever a creature enters paired with a card
//! creating a creature token whenever its controller gains life.
use crate::card::Card;
use crate::deck::DeckCard;
use crate::synergy::rules::pattern;
use crate::synergy::{Detector, Scored};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Signal is a game event that abilities can react to and produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
  LifeGained,
  CreatureEntered,
  TokenCreated,
  CardDrawn,
  CounterPlaced,
  CreatureDied,
  PermanentSacrificed,
  OpponentLostLife,
  SpellCast,
}

impl fmt::Display for Signal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::LifeGained => "life gain",
      Self::CreatureEntered => "creatures entering",
      Self::TokenCreated => "token creation",
      Self::CardDrawn => "card draw",
      Self::CounterPlaced => "+1/+1 counters",
      Self::CreatureDied => "creatures dying",
      Self::PermanentSacrificed => "sacrifices",
      Self::OpponentLostLife => "opponent life loss",
      Self::SpellCast => "spells cast",
    };
    write!(f, "{}", s)
  }
}

fn signal_patterns(patterns: &[(Signal, &str)]) -> Vec<(Signal, Regex)> {
  patterns.iter().map(|(s, p)| (*s, pattern(p))).collect()
}

lazy_static! {
  static ref TRIGGERS: Vec<(Signal, Regex)> = signal_patterns(&[
    (Signal::LifeGained, r"whenever you gain life"),
    (
      Signal::CreatureEntered,
      r"whenever (a|another|one or more) (nontoken )?creatures? (you control )?enters?( the battlefield)?( under your control)?",
    ),
    (Signal::TokenCreated, r"whenever you create (a|one or more) (creature )?tokens?"),
    (Signal::CardDrawn, r"whenever you draw (a|your second) card"),
    (Signal::CounterPlaced, r"whenever (one or more )?\+1/\+1 counters? (is|are) put on"),
    (Signal::CreatureDied, r"whenever (a|another) (nontoken )?creature (you control )?dies"),
    (Signal::PermanentSacrificed, r"whenever you sacrifice (a|another|one or more)"),
    (Signal::OpponentLostLife, r"whenever an opponent loses life"),
    (Signal::SpellCast, r"whenever you cast (a|an) [^,]*spell"),
  ]);
  static ref OUTPUTS: Vec<(Signal, Regex)> = signal_patterns(&[
    (Signal::LifeGained, r"\bgains? (\d+|x|that much) life"),
    (Signal::CreatureEntered, r"\bcreate[^.]*creature tokens?"),
    (Signal::CreatureEntered, r"\breturn[^.]*creature[^.]*to the battlefield"),
    (Signal::TokenCreated, r"\bcreate[^.]*\btokens?\b"),
    (Signal::CardDrawn, r"\bdraws? (a|two|three|x|\d+) cards?\b"),
    (Signal::CounterPlaced, r"\bput[^.]*\+1/\+1 counters? on"),
    (Signal::CounterPlaced, r"\bproliferate\b"),
    (Signal::CreatureDied, r"\bsacrifices? (a|another) creature\b"),
    (Signal::CreatureDied, r"\bdestroy target creature\b"),
    (Signal::PermanentSacrificed, r"\bsacrifices? (a|an|another)\b"),
    (Signal::OpponentLostLife, r"\b(each|target) opponent loses (\d+|x) life"),
    (Signal::OpponentLostLife, r"\bdeals? (\d+|x) damage to (each|target) opponent"),
    (Signal::SpellCast, r"\byou may cast\b"),
  ]);
}

/// Edge is a triggered ability: whenever `trigger` happens, the card produces `output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
  pub trigger: Signal,
  pub output: Signal,
}

/// Returns the triggered abilities of the card as trigger/output edges.
/// Outputs are only read from the effect following the trigger on the same line.
pub fn edges(card: &Card) -> Vec<Edge> {
  let text = card.rules_text();
  let mut result = Vec::new();
  for line in text.lines() {
    for (trigger, trigger_re) in TRIGGERS.iter() {
      let effect = match trigger_re.find(line) {
        Some(m) => &line[m.end()..],
        None => continue,
      };
      for (output, output_re) in OUTPUTS.iter() {
        let edge = Edge {
          trigger: *trigger,
          output: *output,
        };
        if output_re.is_match(effect) && !result.contains(&edge) {
          result.push(edge);
        }
      }
    }
  }
  result
}

/// FeedbackLoop is a pair of cards that keep triggering each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackLoop {
  pub cards: Vec<String>,
  /// The signals passed around the loop, in the order of `cards`' triggers
  pub signals: Vec<Signal>,
  pub description: String,
  pub score: u8,
}

impl Scored for FeedbackLoop {
  fn score(&self) -> u8 {
    self.score
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FeedbackLoopDetector;

impl Detector for FeedbackLoopDetector {
  type Synergy = FeedbackLoop;

  fn detect(&self, cards: &[DeckCard]) -> Vec<FeedbackLoop> {
    let mut seen = HashSet::new();
    let abilities: Vec<(&DeckCard, Vec<Edge>)> = cards
      .iter()
      .filter(|cc| seen.insert(cc.card.name.as_str()))
      .map(|cc| (cc, edges(&cc.card)))
      .filter(|(_, edges)| !edges.is_empty())
      .collect();
    let mut result = Vec::new();
    for (i, (a, a_edges)) in abilities.iter().enumerate() {
      for (b, b_edges) in abilities.iter().skip(i + 1) {
        let pair = a_edges.iter().find_map(|ea| {
          b_edges
            .iter()
            .find(|eb| ea.output == eb.trigger && eb.output == ea.trigger)
            .map(|eb| (ea, eb))
        });
        if let Some((ea, eb)) = pair {
          debug!("Feedback loop between {} and {}", a.card.name, b.card.name);
          let score = std::cmp::min(10, 3 + a.count + b.count) as u8;
          result.push(FeedbackLoop {
            cards: vec![a.card.name.clone(), b.card.name.clone()],
            signals: vec![ea.trigger, eb.trigger],
            description: format!(
              "{} turns {} into {}, and {} turns {} into {}",
              a.card.name, ea.trigger, ea.output, b.card.name, eb.trigger, eb.output
            ),
            score,
          });
        }
      }
    }
    result.sort_by(|a, b| b.score.cmp(&a.score));
    result
  }
}

/// Returns every two-card feedback loop in `cards`, strongest first
pub fn detect_feedback_loops(cards: &[DeckCard]) -> Vec<FeedbackLoop> {
  FeedbackLoopDetector.detect(cards)
}
