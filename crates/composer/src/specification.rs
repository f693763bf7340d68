use std::collections::BTreeMap;

use shared::{
    domain::{Device, WordId},
    protocol::GenerationRequest,
};

/// Device → ordered, duplicate-free list of linked words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoemSpecification {
    links: BTreeMap<Device, Vec<WordId>>,
}

impl PoemSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `word_id` under `device`. Returns `false` when the pair was
    /// already present.
    pub fn link(&mut self, device: Device, word_id: WordId) -> bool {
        let ids = self.links.entry(device).or_default();
        if ids.contains(&word_id) {
            return false;
        }
        ids.push(word_id);
        true
    }

    /// Drops `word_id` from every device.
    pub fn unlink_word(&mut self, word_id: WordId) {
        for ids in self.links.values_mut() {
            ids.retain(|id| *id != word_id);
        }
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn linked(&self, device: Device) -> &[WordId] {
        self.links.get(&device).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, device: Device, word_id: WordId) -> bool {
        self.linked(device).contains(&word_id)
    }

    pub fn is_empty(&self) -> bool {
        self.links.values().all(Vec::is_empty)
    }

    pub fn serialize(&self) -> GenerationRequest {
        GenerationRequest::from_entries(
            self.links
                .iter()
                .map(|(device, ids)| (*device, ids.clone())),
        )
    }
}

#[cfg(test)]
#[path = "tests/specification_tests.rs"]
mod tests;
