use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{Catalog, Item, ItemId};
use super::quiz::SequenceState;
use super::response::Response;

/// Whether the sequence has reached its terminal view.
pub fn is_complete(state: &SequenceState) -> bool {
    state.complete
}

/// Hook that turns a finished session into whatever the results screen needs.
///
/// Scoring belongs to implementors; [`AnswerDigest`] only reports
/// what was answered.
pub trait Summarizer {
    type Output;

    fn summarize(&self, state: &SequenceState, catalog: &Catalog) -> Self::Output;
}

/// What a sequencer renders: the current item or the terminal summary.
#[derive(Debug)]
pub enum View<'a, T> {
    InProgress {
        item: &'a Item,
        index: usize,
        total: usize,
        progress: f64,
    },
    Complete(T),
}

/// One answered item as shown in the "answers so far" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLine {
    pub item_id: ItemId,
    pub label: String,
    /// Display form of `response`.
    pub value: String,
    pub response: Response,
}

/// Read-only per-session summary handed to the results collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub session_id: String,
    pub complete: bool,
    pub total: usize,
    pub answered: usize,
    pub answers: Vec<AnswerLine>,
    /// Filled in by a scoring collaborator, never by the digest itself.
    pub score: Option<u8>,
    pub started_at: DateTime<Utc>,
    pub summarized_at: DateTime<Utc>,
}

/// Default summarizer: counts and catalog-ordered answer lines, no score.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerDigest;

impl AnswerDigest {
    /// Answer lines in catalog order, skipping unanswered items.
    pub fn lines(state: &SequenceState, catalog: &Catalog) -> Vec<AnswerLine> {
        catalog
            .iter()
            .filter(|item| state.responses.is_answered(item.id.as_str()))
            .filter_map(|item| {
                state.responses.get(item.id.as_str()).map(|response| AnswerLine {
                    item_id: item.id.clone(),
                    label: item.label().to_string(),
                    value: response.to_string(),
                    response: response.clone(),
                })
            })
            .collect()
    }
}

impl Summarizer for AnswerDigest {
    type Output = Summary;

    fn summarize(&self, state: &SequenceState, catalog: &Catalog) -> Summary {
        let answers = Self::lines(state, catalog);
        Summary {
            session_id: state.session_id.clone(),
            complete: is_complete(state),
            total: catalog.len(),
            answered: answers.len(),
            answers,
            score: None,
            started_at: state.started_at,
            summarized_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::item::Modality;
    use std::collections::BTreeSet;

    use crate::state_machine::response::{Rating, Selection};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Item::question("sleep", "Lifestyle", "Sleep?", Modality::SingleSelect, &["Early"]),
            Item::question("clean", "Living Habits", "Clean?", Modality::Scale, &[]),
            Item::question("share", "Sharing", "Share?", Modality::MultiSelect, &["X", "Y, with comma"]),
        ])
        .unwrap()
    }

    #[test]
    fn digest_lists_answers_in_catalog_order() {
        let catalog = catalog();
        let mut state = SequenceState::new(&catalog);
        state
            .responses
            .record("clean", Response::Scale(Rating::new(5).unwrap()))
            .unwrap();
        state
            .responses
            .record("sleep", Response::Choice("Early".into()))
            .unwrap();

        let summary = AnswerDigest.summarize(&state, &catalog);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.answered, 2);
        assert!(!summary.complete);
        assert_eq!(summary.score, None);
        assert_eq!(summary.answers[0].label, "Lifestyle");
        assert_eq!(summary.answers[1].value, "5");
        assert_eq!(
            summary.answers[1].response,
            Response::Scale(Rating::new(5).unwrap())
        );
    }

    #[test]
    fn digest_keeps_selected_set_intact() {
        let catalog = catalog();
        let mut state = SequenceState::new(&catalog);
        state.responses.select("share", "X", Selection::Add).unwrap();
        state
            .responses
            .select("share", "Y, with comma", Selection::Add)
            .unwrap();

        let summary = AnswerDigest.summarize(&state, &catalog);
        let expected: BTreeSet<String> = ["X".to_string(), "Y, with comma".to_string()].into();
        assert_eq!(summary.answers[0].response, Response::Choices(expected));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["answers"][0]["response"][1], "Y, with comma");
    }

    #[test]
    fn digest_skips_emptied_multi_select() {
        let catalog = catalog();
        let mut state = SequenceState::new(&catalog);
        state.responses.select("share", "X", Selection::Add).unwrap();
        state.responses.select("share", "X", Selection::Remove).unwrap();

        let summary = AnswerDigest.summarize(&state, &catalog);
        assert_eq!(summary.answered, 0);
        assert!(summary.answers.is_empty());
    }

    struct FixedScore(u8);

    impl Summarizer for FixedScore {
        type Output = Summary;

        fn summarize(&self, state: &SequenceState, catalog: &Catalog) -> Summary {
            Summary {
                score: Some(self.0),
                ..AnswerDigest.summarize(state, catalog)
            }
        }
    }

    #[test]
    fn custom_summarizer_supplies_score() {
        let catalog = catalog();
        let state = SequenceState::new(&catalog);
        let summary = FixedScore(80).summarize(&state, &catalog);
        assert_eq!(summary.score, Some(80));
        assert_eq!(summary.session_id, state.session_id);
    }

    #[test]
    fn summary_serializes_without_score_as_null() {
        let catalog = catalog();
        let state = SequenceState::new(&catalog);
        let json = serde_json::to_value(AnswerDigest.summarize(&state, &catalog)).unwrap();
        assert!(json["score"].is_null());
        assert_eq!(json["total"], 3);
    }
}
