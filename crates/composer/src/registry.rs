use std::collections::BTreeSet;

use shared::domain::WordId;
use tracing::debug;

use crate::specification::PoemSpecification;

/// Live word slots on the canvas.
///
/// Ids come from a counter that only moves forward, so a retired id is never
/// handed out again within the same registry.
#[derive(Debug, Default)]
pub struct WordRegistry {
    next_id: u64,
    live: BTreeSet<WordId>,
}

impl WordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_word(&mut self) -> WordId {
        let word_id = WordId(self.next_id);
        self.next_id += 1;
        self.live.insert(word_id);
        debug!(%word_id, "word added");
        word_id
    }

    /// Retires `word_id` and removes every link that references it.
    pub fn remove_word(&mut self, word_id: WordId, spec: &mut PoemSpecification) -> bool {
        if !self.live.remove(&word_id) {
            return false;
        }
        spec.unlink_word(word_id);
        debug!(%word_id, "word removed");
        true
    }

    /// Retires every word. The specification is cleared with it so no link
    /// outlives its words.
    pub fn clear(&mut self, spec: &mut PoemSpecification) {
        debug!(retired = self.live.len(), "clearing words");
        self.live.clear();
        spec.clear();
    }

    pub fn exists(&self, word_id: WordId) -> bool {
        self.live.contains(&word_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = WordId> + '_ {
        self.live.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
