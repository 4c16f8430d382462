use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Stable identifier of an [`Item`]. Responses are keyed by it, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a user responds to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Exactly one option.
    SingleSelect,
    /// Any subset of the options.
    MultiSelect,
    /// Integer rating from 1 to 5.
    Scale,
    /// Accept or reject (swipe cards).
    Decision,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::SingleSelect => write!(f, "single-select"),
            Modality::MultiSelect => write!(f, "multi-select"),
            Modality::Scale => write!(f, "scale"),
            Modality::Decision => write!(f, "decision"),
        }
    }
}

/// A candidate roommate shown in the swipe deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub bio: String,
    pub interests: Vec<String>,
    pub location: String,
    pub match_percentage: u8,
    pub verified: bool,
    pub badges: Vec<String>,
}

/// What an item displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Question {
        prompt: String,
        category: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
    Profile(Profile),
}

/// One unit of a sequence: a quiz question or a candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub position: usize,
    pub modality: Modality,
    pub payload: Payload,
}

impl Item {
    /// Build a question item. Position is assigned when the catalog is built.
    pub fn question(
        id: &str,
        category: &str,
        prompt: &str,
        modality: Modality,
        options: &[&str],
    ) -> Self {
        Self {
            id: ItemId::from(id),
            position: 0,
            modality,
            payload: Payload::Question {
                prompt: prompt.to_string(),
                category: category.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    /// Build a swipe card for a profile.
    pub fn profile(id: &str, profile: Profile) -> Self {
        Self {
            id: ItemId::from(id),
            position: 0,
            modality: Modality::Decision,
            payload: Payload::Profile(profile),
        }
    }

    /// Short label used in answer digests: the question category or the profile name.
    pub fn label(&self) -> &str {
        match &self.payload {
            Payload::Question { category, .. } => category,
            Payload::Profile(profile) => &profile.name,
        }
    }

    pub fn options(&self) -> &[String] {
        match &self.payload {
            Payload::Question { options, .. } => options,
            Payload::Profile(_) => &[],
        }
    }
}

/// A validated, non-empty, ordered list of items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self, FlowError> {
        if items.is_empty() {
            return Err(FlowError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(items.len());
        for (position, mut item) in items.into_iter().enumerate() {
            if !seen.insert(item.id.clone()) {
                return Err(FlowError::DuplicateItem(item.id));
            }
            item.position = position;
            ordered.push(item);
        }

        Ok(Self { items: ordered })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed catalog.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`. Callers index with a cursor kept in `0..len`.
    pub fn at(&self, index: usize) -> &Item {
        &self.items[index]
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> Item {
        Item::question(id, "Lifestyle", "Pick one", Modality::SingleSelect, &["A", "B"])
    }

    #[test]
    fn catalog_assigns_positions_in_order() {
        let catalog = Catalog::new(vec![sample("a"), sample("b"), sample("c")]).unwrap();
        let positions: Vec<usize> = catalog.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(catalog.at(1).id.as_str(), "b");
    }

    #[test]
    fn catalog_rejects_empty() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert!(matches!(err, FlowError::EmptyCatalog));
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let err = Catalog::new(vec![sample("a"), sample("a")]).unwrap_err();
        assert!(matches!(err, FlowError::DuplicateItem(id) if id.as_str() == "a"));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::new(vec![sample("a"), sample("b")]).unwrap();
        assert_eq!(catalog.get("b").map(|i| i.position), Some(1));
        assert!(catalog.get("zzz").is_none());
    }

    #[test]
    fn label_uses_category_or_name() {
        let question = sample("a");
        assert_eq!(question.label(), "Lifestyle");

        let card = Item::profile(
            "1",
            Profile {
                name: "Pooja Kumari".into(),
                age: 20,
                bio: String::new(),
                interests: vec![],
                location: "Tech Hub, 0.8 km".into(),
                match_percentage: 92,
                verified: true,
                badges: vec![],
            },
        );
        assert_eq!(card.label(), "Pooja Kumari");
        assert_eq!(card.modality, Modality::Decision);
        assert!(card.options().is_empty());
    }

    #[test]
    fn payload_serializes_with_kind_tag() {
        let json = serde_json::to_value(sample("a")).unwrap();
        assert_eq!(json["payload"]["kind"], "question");
        assert_eq!(json["modality"], "single_select");
        assert_eq!(json["id"], "a");
    }
}
