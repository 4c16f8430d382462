use thiserror::Error;

use crate::state_machine::{ItemId, Modality};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Item {item} expects a {expected} response")]
    ModalityMismatch { item: ItemId, expected: Modality },

    #[error("'{value}' is not an option of item {item}")]
    UnknownOption { item: ItemId, value: String },

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("Sequence is already complete. Reset it to answer again.")]
    SequenceComplete,

    #[error("Catalog must contain at least one item")]
    EmptyCatalog,

    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(ItemId),

    #[error("Unknown hostel: {0}")]
    UnknownHostel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_item_display() {
        let err = FlowError::UnknownItem(ItemId::from("pets"));
        assert_eq!(err.to_string(), "Unknown item: pets");
    }

    #[test]
    fn modality_mismatch_display() {
        let err = FlowError::ModalityMismatch {
            item: ItemId::from("cleanliness"),
            expected: Modality::Scale,
        };
        assert_eq!(
            err.to_string(),
            "Item cleanliness expects a scale response"
        );
    }

    #[test]
    fn unknown_option_display() {
        let err = FlowError::UnknownOption {
            item: ItemId::from("sleep-schedule"),
            value: "Banana".into(),
        };
        assert_eq!(err.to_string(), "'Banana' is not an option of item sleep-schedule");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlowError>();
    }
}
