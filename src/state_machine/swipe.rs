use serde::Serialize;
use tracing::{debug, info, warn};

use super::item::{Catalog, Item, ItemId};
use super::response::{Response, ResponseStore};

/// A swipe on the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn accepted(self) -> bool {
        matches!(self, Decision::Accept)
    }
}

/// Append-only list of accepted profile ids.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecisionLog {
    accepted: Vec<ItemId>,
}

impl DecisionLog {
    fn push(&mut self, id: ItemId) {
        self.accepted.push(id);
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn entries(&self) -> &[ItemId] {
        &self.accepted
    }
}

/// What a single swipe did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub decided: ItemId,
    pub decision: Decision,
    /// Cursor after the swipe.
    pub next: usize,
    /// True when the swipe moved from the last card back to the first.
    pub wrapped: bool,
}

/// Wrap-around sequencer over a fixed deck of candidate profiles.
///
/// Every decision advances the cursor; the card after the last one is the first
/// one again, so the deck never completes. Accepts are appended to the
/// [`DecisionLog`], whose length is the displayed match count.
#[derive(Debug, Clone)]
pub struct SwipeDeck {
    catalog: Catalog,
    cursor: usize,
    wraps: usize,
    log: DecisionLog,
    decisions: ResponseStore,
}

impl SwipeDeck {
    pub fn new(catalog: Catalog) -> Self {
        let decisions = ResponseStore::for_catalog(&catalog);
        Self {
            catalog,
            cursor: 0,
            wraps: 0,
            log: DecisionLog::default(),
            decisions,
        }
    }

    pub fn current(&self) -> &Item {
        self.catalog.at(self.cursor)
    }

    #[allow(dead_code)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn decide(&mut self, decision: Decision) -> SwipeOutcome {
        let decided = self.current().id.clone();

        if let Err(e) = self
            .decisions
            .record(decided.as_str(), Response::Decision(decision.accepted()))
        {
            warn!(profile = %decided, error = %e, "decision not recorded");
        }

        if decision.accepted() {
            self.log.push(decided.clone());
            info!(profile = %decided, matches = self.log.len(), "new match");
        }

        let wrapped = self.cursor + 1 == self.catalog.len();
        self.cursor = if wrapped { 0 } else { self.cursor + 1 };
        if wrapped {
            self.wraps += 1;
            debug!(wraps = self.wraps, "deck wrapped to first card");
        }

        SwipeOutcome {
            decided,
            decision,
            next: self.cursor,
            wrapped,
        }
    }

    pub fn match_count(&self) -> usize {
        self.log.len()
    }

    pub fn log(&self) -> &DecisionLog {
        &self.log
    }

    /// Latest decision recorded for a profile, if it has been swiped at all.
    pub fn last_decision(&self, id: &str) -> Option<bool> {
        match self.decisions.get(id) {
            Some(Response::Decision(accepted)) => Some(*accepted),
            _ => None,
        }
    }

    /// Completed passes over the deck.
    pub fn wraps(&self) -> usize {
        self.wraps
    }

    /// One flag per card, true for the card under the cursor.
    pub fn markers(&self) -> Vec<bool> {
        (0..self.catalog.len()).map(|i| i == self.cursor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn deck() -> SwipeDeck {
        SwipeDeck::new(catalog::roommates())
    }

    #[test]
    fn starts_at_first_card_without_matches() {
        let deck = deck();
        assert_eq!(deck.cursor(), 0);
        assert_eq!(deck.match_count(), 0);
        assert!(deck.log().is_empty());
        assert_eq!(deck.markers(), vec![true, false, false, false]);
    }

    #[test]
    fn accept_logs_and_reject_does_not() {
        let mut deck = deck();
        let first = deck.current().id.clone();

        let outcome = deck.decide(Decision::Accept);
        assert_eq!(outcome.decided, first);
        assert_eq!(outcome.next, 1);
        assert!(!outcome.wrapped);
        assert_eq!(deck.match_count(), 1);

        deck.decide(Decision::Reject);
        assert_eq!(deck.match_count(), 1);
        assert_eq!(deck.cursor(), 2);
        assert_eq!(deck.log().entries(), &[first]);
    }

    #[test]
    fn last_card_wraps_to_first() {
        let mut deck = deck();
        for _ in 0..deck.len() - 1 {
            deck.decide(Decision::Reject);
        }
        assert_eq!(deck.cursor(), deck.len() - 1);

        let outcome = deck.decide(Decision::Reject);
        assert!(outcome.wrapped);
        assert_eq!(outcome.next, 0);
        assert_eq!(deck.wraps(), 1);
    }

    #[test]
    fn rejects_across_wraps_leave_log_unchanged() {
        let mut deck = deck();
        deck.decide(Decision::Accept);
        let before = deck.match_count();

        let n = deck.len() * 3;
        for _ in 0..n {
            deck.decide(Decision::Reject);
        }
        assert_eq!(deck.match_count(), before);
        assert!(deck.cursor() < deck.len());
    }

    #[test]
    fn match_count_equals_accepts_regardless_of_interleaving() {
        let mut deck = deck();
        let script = "ARRAAARRRARAA";
        let mut previous = 0;
        for c in script.chars() {
            let decision = if c == 'A' { Decision::Accept } else { Decision::Reject };
            deck.decide(decision);
            assert!(deck.match_count() >= previous);
            previous = deck.match_count();
        }
        let accepts = script.chars().filter(|c| *c == 'A').count();
        assert_eq!(deck.match_count(), accepts);
    }

    #[test]
    fn re_accepting_after_wrap_appends_again() {
        let mut deck = deck();
        let first = deck.current().id.clone();
        deck.decide(Decision::Accept);
        for _ in 1..deck.len() {
            deck.decide(Decision::Reject);
        }
        assert_eq!(deck.current().id, first);
        deck.decide(Decision::Accept);
        assert_eq!(deck.match_count(), 2);
    }

    #[test]
    fn last_decision_overwrites_per_profile() {
        let mut deck = deck();
        let first = deck.current().id.clone();
        assert_eq!(deck.last_decision(first.as_str()), None);

        deck.decide(Decision::Accept);
        for _ in 1..deck.len() {
            deck.decide(Decision::Reject);
        }
        deck.decide(Decision::Reject);
        assert_eq!(deck.last_decision(first.as_str()), Some(false));
        assert_eq!(deck.match_count(), 1);
    }
}
