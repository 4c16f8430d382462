use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::item::{Catalog, ItemId, Modality};
use crate::error::FlowError;

/// An integer rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, FlowError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FlowError::RatingOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = FlowError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A value recorded against an item. The variant must match the item's [`Modality`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Choice(String),
    Choices(BTreeSet<String>),
    Scale(Rating),
    Decision(bool),
}

impl Response {
    fn fits(&self, modality: Modality) -> bool {
        matches!(
            (self, modality),
            (Response::Choice(_), Modality::SingleSelect)
                | (Response::Choices(_), Modality::MultiSelect)
                | (Response::Scale(_), Modality::Scale)
                | (Response::Decision(_), Modality::Decision)
        )
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Choice(choice) => f.write_str(choice),
            Response::Choices(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                f.write_str(&joined.join(", "))
            }
            Response::Scale(rating) => write!(f, "{}", rating.get()),
            Response::Decision(true) => f.write_str("accepted"),
            Response::Decision(false) => f.write_str("rejected"),
        }
    }
}

/// Whether a multi-select toggle adds or removes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Add,
    Remove,
}

/// What the store knows about one catalog item.
#[derive(Debug, Clone)]
struct Slot {
    modality: Modality,
    /// Allowed choice values; empty for scale and decision items.
    options: Vec<String>,
}

impl Slot {
    fn allows(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// Item id → response map bound to the ids of one catalog.
///
/// Ids outside that catalog are refused with [`FlowError::UnknownItem`] and
/// choice values outside an item's options with [`FlowError::UnknownOption`].
/// A refused call leaves the store untouched.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    slots: HashMap<ItemId, Slot>,
    entries: HashMap<ItemId, Response>,
}

impl ResponseStore {
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            slots: catalog
                .iter()
                .map(|item| {
                    let slot = Slot {
                        modality: item.modality,
                        options: item.options().to_vec(),
                    };
                    (item.id.clone(), slot)
                })
                .collect(),
            entries: HashMap::new(),
        }
    }

    /// Overwrite-or-insert for single-select, scale and decision items.
    pub fn record(&mut self, id: &str, value: Response) -> Result<(), FlowError> {
        let (key, slot) = self.lookup(id)?;
        let modality = slot.modality;
        if modality == Modality::MultiSelect || !value.fits(modality) {
            warn!(item = id, %modality, "response shape does not match item");
            return Err(FlowError::ModalityMismatch {
                item: key,
                expected: modality,
            });
        }
        if let Response::Choice(choice) = &value
            && !slot.allows(choice)
        {
            warn!(item = id, value = %choice, "refusing value outside the options");
            return Err(FlowError::UnknownOption {
                item: key,
                value: choice.clone(),
            });
        }

        debug!(item = id, value = %value, "recorded response");
        self.entries.insert(key, value);
        Ok(())
    }

    /// Add or remove one value of a multi-select item. Both directions are idempotent.
    pub fn select(&mut self, id: &str, value: &str, selection: Selection) -> Result<(), FlowError> {
        let (key, slot) = self.lookup(id)?;
        if slot.modality != Modality::MultiSelect {
            warn!(item = id, modality = %slot.modality, "multi-select toggle on a non multi-select item");
            return Err(FlowError::ModalityMismatch {
                item: key,
                expected: slot.modality,
            });
        }
        if !slot.allows(value) {
            warn!(item = id, value, "refusing value outside the options");
            return Err(FlowError::UnknownOption {
                item: key,
                value: value.to_string(),
            });
        }

        match selection {
            Selection::Add => {
                let entry = self
                    .entries
                    .entry(key)
                    .or_insert_with(|| Response::Choices(BTreeSet::new()));
                if let Response::Choices(set) = entry {
                    set.insert(value.to_string());
                }
            }
            Selection::Remove => {
                if let Some(Response::Choices(set)) = self.entries.get_mut(id) {
                    set.remove(value);
                }
            }
        }

        debug!(item = id, value, ?selection, "toggled selection");
        Ok(())
    }

    /// Current response, or `None` while the item is unanswered.
    pub fn get(&self, id: &str) -> Option<&Response> {
        self.entries.get(id)
    }

    /// An empty multi-select set does not count as an answer.
    pub fn is_answered(&self, id: &str) -> bool {
        match self.entries.get(id) {
            Some(Response::Choices(set)) => !set.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.entries.keys().filter(|id| self.is_answered(id.as_str())).count()
    }

    fn lookup(&self, id: &str) -> Result<(ItemId, &Slot), FlowError> {
        match self.slots.get_key_value(id) {
            Some((key, slot)) => Ok((key.clone(), slot)),
            None => {
                warn!(item = id, "refusing response for unknown item");
                Err(FlowError::UnknownItem(ItemId::from(id)))
            }
        }
    }
}
