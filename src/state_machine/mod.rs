mod item;
mod quiz;
mod response;
mod shortlist;
mod summary;
mod swipe;

pub use item::{Catalog, Item, ItemId, Modality, Payload, Profile};
pub use quiz::{Quiz, Step};
pub use response::{Rating, Response, Selection};
pub use shortlist::Shortlist;
pub use summary::{AnswerDigest, Summary, View};
pub use swipe::{Decision, SwipeDeck};
