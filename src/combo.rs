//! Combination engine: the fixed rule table and first-match evaluation.
//!
//! Rules are checked in table order and the first match wins, so a triple of
//! Brights from one group is a Three-Brights, never a same-month triple.

use crate::card::{Card, Group, Kind};
use std::fmt;
use thiserror::Error;

/// Identifier of a scoring combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combo {
    ThreeBrights,
    BlueRibbons,
    RedRibbons,
    BoarDeerButterfly,
    ViewingBlossoms,
    ViewingMoon,
    SameMonth,
}

impl Combo {
    pub fn id(self) -> &'static str {
        match self {
            Self::ThreeBrights => "ThreeBrights",
            Self::BlueRibbons => "BlueRibbons",
            Self::RedRibbons => "RedRibbons",
            Self::BoarDeerButterfly => "Boar-Deer-Butterfly",
            Self::ViewingBlossoms => "Viewing-Blossoms",
            Self::ViewingMoon => "Viewing-Moon",
            Self::SameMonth => "SameMonth",
        }
    }

    /// Everything but the plain same-month triple counts as a special combo.
    pub fn is_special(self) -> bool {
        self != Self::SameMonth
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How a rule decides whether a selection matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Every card has this kind; any groups, repeats allowed.
    AllOfKind(Kind),
    /// The (group, variant) multiset equals this list exactly.
    Exact(&'static [(Group, u8)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationRule {
    pub combo: Combo,
    pub requirement: Requirement,
    pub score: u32,
    pub arity: usize,
}

impl CombinationRule {
    /// True for the kind-count rules, false for exact-card rules.
    pub fn allows_duplicate_draws(&self) -> bool {
        matches!(self.requirement, Requirement::AllOfKind(_))
    }

    pub fn matches(&self, cards: &[Card]) -> bool {
        if cards.len() != self.arity {
            return false;
        }
        match self.requirement {
            Requirement::AllOfKind(kind) => cards.iter().all(|c| c.kind() == kind),
            Requirement::Exact(required) => exact_multiset_match(cards, required),
        }
    }
}

/// Rule table in priority order.
pub const RULES: [CombinationRule; 6] = [
    CombinationRule {
        combo: Combo::ThreeBrights,
        requirement: Requirement::AllOfKind(Kind::Bright),
        score: 1000,
        arity: 3,
    },
    CombinationRule {
        combo: Combo::BlueRibbons,
        requirement: Requirement::AllOfKind(Kind::BlueRibbon),
        score: 800,
        arity: 3,
    },
    CombinationRule {
        combo: Combo::RedRibbons,
        requirement: Requirement::AllOfKind(Kind::RedRibbon),
        score: 800,
        arity: 3,
    },
    CombinationRule {
        combo: Combo::BoarDeerButterfly,
        requirement: Requirement::Exact(&[
            (Group::BushClover, 0),
            (Group::Maple, 0),
            (Group::Peony, 0),
        ]),
        score: 2000,
        arity: 3,
    },
    CombinationRule {
        combo: Combo::ViewingBlossoms,
        requirement: Requirement::Exact(&[(Group::Cherry, 0), (Group::Chrysanthemum, 0)]),
        score: 500,
        arity: 2,
    },
    CombinationRule {
        combo: Combo::ViewingMoon,
        requirement: Requirement::Exact(&[(Group::Pampas, 0), (Group::Chrysanthemum, 0)]),
        score: 500,
        arity: 2,
    },
];

/// Fallback when no table rule matches three cards of one group.
pub const SAME_MONTH_SCORE: u32 = 100;

/// Scores at or above this open a bonus window.
pub const BONUS_THRESHOLD: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvaluateError {
    #[error("selection must hold 2 or 3 cards, got {0}")]
    InvalidSelectionSize(usize),
}

/// Result of evaluating a selection. `score` is before any bonus multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub score: u32,
    pub combo: Option<Combo>,
}

impl Evaluation {
    pub const NO_MATCH: Self = Self {
        score: 0,
        combo: None,
    };

    pub fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// Evaluate 2 or 3 cards against the rule table. Any other size is a caller bug.
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvaluateError> {
    if !(2..=3).contains(&cards.len()) {
        return Err(EvaluateError::InvalidSelectionSize(cards.len()));
    }
    if let Some(rule) = RULES.iter().find(|r| r.matches(cards)) {
        return Ok(Evaluation {
            score: rule.score,
            combo: Some(rule.combo),
        });
    }
    if is_same_month(cards) {
        return Ok(Evaluation {
            score: SAME_MONTH_SCORE,
            combo: Some(Combo::SameMonth),
        });
    }
    Ok(Evaluation::NO_MATCH)
}

fn is_same_month(cards: &[Card]) -> bool {
    cards.len() == 3 && cards.iter().all(|c| c.group == cards[0].group)
}

/// Each required pair consumes one distinct selected card; nothing may be left over.
fn exact_multiset_match(cards: &[Card], required: &[(Group, u8)]) -> bool {
    if cards.len() != required.len() {
        return false;
    }
    let mut remaining: Vec<(Group, u8)> = required.to_vec();
    for card in cards {
        match remaining
            .iter()
            .position(|&(g, v)| g == card.group && v == card.variant)
        {
            Some(i) => {
                remaining.swap_remove(i);
            }
            None => return false,
        }
    }
    remaining.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(group: Group, variant: u8) -> Card {
        Card::new(group, variant)
    }

    fn eval(cards: &[Card]) -> Evaluation {
        evaluate(cards).expect("valid size")
    }

    #[test]
    fn three_brights_any_groups() {
        let r = eval(&[c(Group::Pine, 0), c(Group::Pampas, 0), c(Group::Paulownia, 0)]);
        assert_eq!(r.score, 1000);
        assert_eq!(r.combo, Some(Combo::ThreeBrights));
    }

    #[test]
    fn three_brights_beats_same_month() {
        // duplicate draws of one Bright: same group and all Bright
        let bright = c(Group::Cherry, 0);
        let r = eval(&[bright, bright, bright]);
        assert_eq!(r.combo, Some(Combo::ThreeBrights));
        assert_eq!(r.score, 1000);
    }

    #[test]
    fn ribbon_triplets_by_kind() {
        let blue = eval(&[c(Group::Peony, 1), c(Group::Chrysanthemum, 1), c(Group::Maple, 1)]);
        assert_eq!(blue.combo, Some(Combo::BlueRibbons));
        assert_eq!(blue.score, 800);

        let red = eval(&[c(Group::Pine, 1), c(Group::Plum, 1), c(Group::Pine, 1)]);
        assert_eq!(red.combo, Some(Combo::RedRibbons));
        assert_eq!(red.score, 800);
    }

    #[test]
    fn boar_deer_butterfly_any_order() {
        let r = eval(&[c(Group::Peony, 0), c(Group::BushClover, 0), c(Group::Maple, 0)]);
        assert_eq!(r.combo, Some(Combo::BoarDeerButterfly));
        assert_eq!(r.score, 2000);
    }

    #[test]
    fn exact_rule_needs_distinct_cards() {
        // two copies of one required card cannot stand in for the third
        let r = eval(&[c(Group::Peony, 0), c(Group::Peony, 0), c(Group::Maple, 0)]);
        assert_eq!(r, Evaluation::NO_MATCH);
    }

    #[test]
    fn viewing_blossoms_exact() {
        let r = eval(&[c(Group::Chrysanthemum, 0), c(Group::Cherry, 0)]);
        assert_eq!(r.score, 500);
        assert_eq!(r.combo.map(Combo::id), Some("Viewing-Blossoms"));

        let wrong = eval(&[c(Group::Cherry, 0), c(Group::Cherry, 1)]);
        assert_eq!(wrong.score, 0);
        assert_eq!(wrong.combo, None);
    }

    #[test]
    fn viewing_moon_exact() {
        let r = eval(&[c(Group::Pampas, 0), c(Group::Chrysanthemum, 0)]);
        assert_eq!(r.combo, Some(Combo::ViewingMoon));
    }

    #[test]
    fn two_card_rule_not_matched_by_three() {
        let r = eval(&[c(Group::Cherry, 0), c(Group::Chrysanthemum, 0), c(Group::Iris, 3)]);
        assert_eq!(r, Evaluation::NO_MATCH);
    }

    #[test]
    fn same_month_triple() {
        let r = eval(&[c(Group::Iris, 0), c(Group::Iris, 2), c(Group::Iris, 3)]);
        assert_eq!(r.combo, Some(Combo::SameMonth));
        assert_eq!(r.score, 100);
        assert!(!Combo::SameMonth.is_special());
    }

    #[test]
    fn same_month_needs_three() {
        let r = eval(&[c(Group::Iris, 0), c(Group::Iris, 2)]);
        assert_eq!(r, Evaluation::NO_MATCH);
    }

    #[test]
    fn invalid_sizes_rejected() {
        assert_eq!(evaluate(&[]), Err(EvaluateError::InvalidSelectionSize(0)));
        assert_eq!(
            evaluate(&[c(Group::Pine, 0)]),
            Err(EvaluateError::InvalidSelectionSize(1))
        );
        let four = [c(Group::Pine, 0); 4];
        assert_eq!(evaluate(&four), Err(EvaluateError::InvalidSelectionSize(4)));
    }

    #[test]
    fn duplicate_flag_follows_requirement() {
        let dup: Vec<bool> = RULES.iter().map(CombinationRule::allows_duplicate_draws).collect();
        assert_eq!(dup, vec![true, true, true, false, false, false]);
    }
}
