use shared::{domain::WordId, protocol::GenerationRequest};
use tracing::{debug, info};

use crate::{
    error::ComposerError,
    registry::WordRegistry,
    selection::{Mode, SelectionEvent, SelectionStateMachine, Transition},
    specification::PoemSpecification,
};

/// The one composing session behind an interaction surface.
#[derive(Debug, Default)]
pub struct ComposerSession {
    registry: WordRegistry,
    selection: SelectionStateMachine,
    spec: PoemSpecification,
}

impl ComposerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_word(&mut self) -> WordId {
        self.registry.add_word()
    }

    pub fn remove_word(&mut self, word_id: WordId) -> bool {
        if !self.registry.remove_word(word_id, &mut self.spec) {
            return false;
        }
        if let Some(anchor) = self.selection.forget_word(word_id) {
            debug!(%anchor, "linking session closed with its anchor");
        }
        true
    }

    pub fn clear(&mut self) {
        self.registry.clear(&mut self.spec);
        self.selection.reset();
        info!("session cleared");
    }

    /// Feeds one UI event to the state machine. References to retired words
    /// come back as [`Transition::Ignored`] instead of an error.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Result<Transition, ComposerError> {
        match self
            .selection
            .handle(event, &self.registry, &mut self.spec)
        {
            Err(ComposerError::StaleWordReference(word_id)) => {
                debug!(%word_id, "ignoring event for retired word");
                Ok(Transition::Ignored(word_id))
            }
            other => other,
        }
    }

    pub fn mode(&self) -> Mode {
        self.selection.mode()
    }

    pub fn allows_menu_toggle(&self) -> bool {
        self.selection.allows_menu_toggle()
    }

    pub fn registry(&self) -> &WordRegistry {
        &self.registry
    }

    pub fn specification(&self) -> &PoemSpecification {
        &self.spec
    }

    pub fn generation_request(&self) -> GenerationRequest {
        self.spec.serialize()
    }
}
