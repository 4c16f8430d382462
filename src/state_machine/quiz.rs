use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::item::{Catalog, Item};
use super::response::{Response, ResponseStore, Selection};
use super::summary::{Summarizer, View};
use crate::error::FlowError;

/// The result of a navigation call on a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Step {
    /// The cursor moved to this index.
    Moved(usize),
    /// The last item was confirmed; the sequence is now complete.
    Completed,
    /// The current item has no response yet.
    Blocked,
    /// Nothing to do: already at the start, or the sequence is complete.
    Ignored,
}

/// Mutable state of one quiz session.
#[derive(Debug, Clone)]
pub struct SequenceState {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub cursor: usize,
    pub responses: ResponseStore,
    pub complete: bool,
}

impl SequenceState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            cursor: 0,
            responses: ResponseStore::for_catalog(catalog),
            complete: false,
        }
    }
}

/// Terminating linear sequencer: walks a catalog once and then completes.
///
/// - `advance` moves forward only when the current item is answered; on the
///   last item it sets `complete` and leaves the cursor where it is.
/// - `retreat` moves back until index 0.
/// - Once complete, navigation and recording are refused until `reset`.
#[derive(Debug, Clone)]
pub struct Quiz {
    catalog: Catalog,
    state: SequenceState,
}

impl Quiz {
    pub fn new(catalog: Catalog) -> Self {
        let state = SequenceState::new(&catalog);
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SequenceState {
        &self.state
    }

    pub fn current(&self) -> &Item {
        self.catalog.at(self.state.cursor)
    }

    /// 1-based position and total, as in "Question 3 of 8".
    pub fn position(&self) -> (usize, usize) {
        (self.state.cursor + 1, self.catalog.len())
    }

    /// `(cursor + 1) / len`, always in `(0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        (self.state.cursor + 1) as f64 / self.catalog.len() as f64
    }

    pub fn is_last(&self) -> bool {
        self.state.cursor + 1 == self.catalog.len()
    }

    /// Guard for the "next" control: false while unanswered or after completion.
    pub fn can_advance(&self) -> bool {
        !self.state.complete && self.state.responses.is_answered(self.current().id.as_str())
    }

    pub fn advance(&mut self) -> Step {
        if self.state.complete {
            return Step::Ignored;
        }
        if !self.can_advance() {
            debug!(cursor = self.state.cursor, "advance blocked, item unanswered");
            return Step::Blocked;
        }

        if self.is_last() {
            self.state.complete = true;
            info!(
                session = %self.state.session_id,
                answered = self.state.responses.answered_count(),
                "quiz complete"
            );
            Step::Completed
        } else {
            self.state.cursor += 1;
            debug!(cursor = self.state.cursor, "advanced");
            Step::Moved(self.state.cursor)
        }
    }

    pub fn retreat(&mut self) -> Step {
        if self.state.complete || self.state.cursor == 0 {
            return Step::Ignored;
        }
        self.state.cursor -= 1;
        debug!(cursor = self.state.cursor, "retreated");
        Step::Moved(self.state.cursor)
    }

    /// Record a single-select, scale or decision response for the current item.
    pub fn answer(&mut self, value: Response) -> Result<(), FlowError> {
        if self.state.complete {
            return Err(FlowError::SequenceComplete);
        }
        let id = self.current().id.clone();
        self.state.responses.record(id.as_str(), value)
    }

    /// Toggle one option of the current multi-select item.
    pub fn select(&mut self, value: &str, selection: Selection) -> Result<(), FlowError> {
        if self.state.complete {
            return Err(FlowError::SequenceComplete);
        }
        let id = self.current().id.clone();
        self.state.responses.select(id.as_str(), value, selection)
    }

    /// Record against an explicit item id, e.g. when replaying an answers file.
    pub fn answer_item(&mut self, id: &str, value: Response) -> Result<(), FlowError> {
        if self.state.complete {
            return Err(FlowError::SequenceComplete);
        }
        self.state.responses.record(id, value)
    }

    /// Clear all responses and start a fresh session at the first item.
    pub fn reset(&mut self) {
        self.state = SequenceState::new(&self.catalog);
        debug!(session = %self.state.session_id, "quiz reset");
    }

    pub fn view<S: Summarizer>(&self, summarizer: &S) -> View<'_, S::Output> {
        if super::summary::is_complete(&self.state) {
            View::Complete(summarizer.summarize(&self.state, &self.catalog))
        } else {
            let (index, total) = self.position();
            View::InProgress {
                item: self.current(),
                index,
                total,
                progress: self.progress_fraction(),
            }
        }
    }
}
