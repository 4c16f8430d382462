use tracing::debug;

use crate::catalog::Hostel;
use crate::error::FlowError;

/// Saved-hostel set with toggle semantics, limited to known listings.
#[derive(Debug, Clone)]
pub struct Shortlist {
    known: Vec<String>,
    saved: Vec<String>,
}

impl Shortlist {
    pub fn new(hostels: &[Hostel]) -> Self {
        Self {
            known: hostels.iter().map(|h| h.id.clone()).collect(),
            saved: Vec::new(),
        }
    }

    /// Save the listing if it is not saved, unsave it otherwise. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, FlowError> {
        if !self.known.iter().any(|k| k == id) {
            return Err(FlowError::UnknownHostel(id.to_string()));
        }

        let saved = if let Some(pos) = self.saved.iter().position(|s| s == id) {
            self.saved.remove(pos);
            false
        } else {
            self.saved.push(id.to_string());
            true
        };
        debug!(hostel = id, saved, "toggled shortlist");
        Ok(saved)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|s| s == id)
    }

    /// Saved ids in the order they were saved.
    pub fn saved(&self) -> &[String] {
        &self.saved
    }
}
