//! Two-state linking machine driven by word-control activations.
//!
//! In [`Mode::Normal`] clicking a word opens its own menu. Choosing a device
//! from a word's menu enters [`Mode::LinkingDevice`] with that word as the
//! anchor; every other word clicked afterwards is linked under the device
//! until the anchor itself is clicked again.

use shared::domain::{Device, WordId};
use tracing::{debug, info};

use crate::{error::ComposerError, registry::WordRegistry, specification::PoemSpecification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    LinkingDevice { anchor: WordId, device: Device },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A device entry was picked from `word_id`'s menu. `device` is the raw
    /// key carried by the menu entry.
    DeviceMenuChosen { word_id: WordId, device: String },
    /// A word control was clicked outside its own menu toggle.
    WordActivated { word_id: WordId },
}

impl SelectionEvent {
    pub fn device_menu(word_id: WordId, device: Device) -> Self {
        SelectionEvent::DeviceMenuChosen {
            word_id,
            device: device.as_str().to_string(),
        }
    }

    pub fn activated(word_id: WordId) -> Self {
        SelectionEvent::WordActivated { word_id }
    }
}

/// Observable outcome of one event, for the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A linking session began. `abandoned` is the previous session's anchor
    /// whose marker must be cleared, if any.
    SessionStarted {
        anchor: WordId,
        device: Device,
        abandoned: Option<WordId>,
    },
    SessionUnchanged,
    Linked { device: Device, word_id: WordId },
    AlreadyLinked { device: Device, word_id: WordId },
    SessionEnded { anchor: WordId },
    /// Normal-mode click: the UI should open this word's menu.
    OpenMenu(WordId),
    /// The event referenced a retired word and was dropped.
    Ignored(WordId),
}

#[derive(Debug, Default)]
pub struct SelectionStateMachine {
    mode: Mode,
}

impl SelectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn anchor(&self) -> Option<WordId> {
        match self.mode {
            Mode::Normal => None,
            Mode::LinkingDevice { anchor, .. } => Some(anchor),
        }
    }

    /// Default menu toggling is suppressed while a linking session is open.
    pub fn allows_menu_toggle(&self) -> bool {
        self.mode == Mode::Normal
    }

    pub fn handle(
        &mut self,
        event: SelectionEvent,
        registry: &WordRegistry,
        spec: &mut PoemSpecification,
    ) -> Result<Transition, ComposerError> {
        match event {
            SelectionEvent::DeviceMenuChosen { word_id, device } => {
                let device: Device = device.parse()?;
                ensure_live(registry, word_id)?;
                Ok(self.start_session(word_id, device))
            }
            SelectionEvent::WordActivated { word_id } => {
                ensure_live(registry, word_id)?;
                Ok(self.activate(word_id, spec))
            }
        }
    }

    /// Returns to normal mode, handing back the anchor whose marker was set.
    pub fn reset(&mut self) -> Option<WordId> {
        let anchor = self.anchor();
        self.mode = Mode::Normal;
        anchor
    }

    /// Ends the session if `word_id` is its anchor.
    pub fn forget_word(&mut self, word_id: WordId) -> Option<WordId> {
        if self.anchor() == Some(word_id) {
            self.reset()
        } else {
            None
        }
    }

    fn start_session(&mut self, anchor: WordId, device: Device) -> Transition {
        let next = Mode::LinkingDevice { anchor, device };
        if self.mode == next {
            return Transition::SessionUnchanged;
        }
        let abandoned = self.anchor().filter(|previous| *previous != anchor);
        self.mode = next;
        info!(%anchor, %device, "linking session started");
        Transition::SessionStarted {
            anchor,
            device,
            abandoned,
        }
    }

    fn activate(&mut self, word_id: WordId, spec: &mut PoemSpecification) -> Transition {
        match self.mode {
            Mode::Normal => Transition::OpenMenu(word_id),
            Mode::LinkingDevice { anchor, .. } if anchor == word_id => {
                self.mode = Mode::Normal;
                info!(%anchor, "linking session ended");
                Transition::SessionEnded { anchor }
            }
            Mode::LinkingDevice { device, .. } => {
                if spec.link(device, word_id) {
                    debug!(%device, %word_id, "word linked");
                    Transition::Linked { device, word_id }
                } else {
                    Transition::AlreadyLinked { device, word_id }
                }
            }
        }
    }
}

fn ensure_live(registry: &WordRegistry, word_id: WordId) -> Result<(), ComposerError> {
    if registry.exists(word_id) {
        Ok(())
    } else {
        Err(ComposerError::StaleWordReference(word_id))
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
