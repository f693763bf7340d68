//! Terminal rendering of composer state and generation results.

use client_core::{GenerationOutcome, WordTemplate};
use composer::{ComposerSession, Mode, Transition};
use shared::domain::{Device, WordId};
use tracing::debug;

pub struct Renderer {
    template: WordTemplate,
}

impl Renderer {
    pub fn new(template: WordTemplate) -> Self {
        Self { template }
    }

    /// Announces the new word followed by its templated control.
    pub fn added(&self, word_id: WordId) -> String {
        let markup = self.template.render(word_id);
        debug!(%word_id, bytes = markup.len(), "rendered word control");
        format!("added {word_id}\n{}", markup.trim_end())
    }

    /// `None` for transitions the user should not hear about.
    pub fn transition(&self, transition: Transition) -> Option<String> {
        let text = match transition {
            Transition::SessionStarted {
                anchor,
                device,
                abandoned,
            } => {
                let mut text = format!(
                    "linking {device} from *{anchor}; click words to link, click {anchor} to finish"
                );
                if let Some(previous) = abandoned {
                    text.push_str(&format!(" (left the session on {previous})"));
                }
                text
            }
            Transition::SessionUnchanged => "already linking from that word".to_string(),
            Transition::Linked { device, word_id } => format!("{word_id} linked under {device}"),
            Transition::AlreadyLinked { device, word_id } => {
                format!("{word_id} is already linked under {device}")
            }
            Transition::SessionEnded { anchor } => format!("finished linking from {anchor}"),
            Transition::OpenMenu(word_id) => {
                let devices: Vec<&str> = Device::ALL.iter().map(|d| d.as_str()).collect();
                format!(
                    "menu for {word_id}: {} (use 'menu {word_id} <device>')",
                    devices.join(" | ")
                )
            }
            Transition::Ignored(_) => return None,
        };
        Some(text)
    }

    pub fn canvas(&self, session: &ComposerSession) -> String {
        let anchor = match session.mode() {
            Mode::Normal => None,
            Mode::LinkingDevice { anchor, .. } => Some(anchor),
        };
        let words: Vec<String> = session
            .registry()
            .ids()
            .map(|id| {
                if Some(id) == anchor {
                    format!("*{id}")
                } else {
                    id.to_string()
                }
            })
            .collect();

        let mut lines = Vec::new();
        if words.is_empty() {
            lines.push("words: (none)".to_string());
        } else {
            lines.push(format!("words: {}", words.join(" ")));
        }
        lines.push(match session.mode() {
            Mode::Normal => "mode: normal".to_string(),
            Mode::LinkingDevice { anchor, device } => {
                format!("mode: linking {device} from {anchor}")
            }
        });

        let request = session.generation_request();
        if request.is_empty() {
            lines.push("links: (none)".to_string());
        }
        for (device, ids) in request.entries() {
            let ids: Vec<String> = ids.iter().map(WordId::to_string).collect();
            lines.push(format!("{device}: {}", ids.join(" ")));
        }
        lines.join("\n")
    }

    pub fn outcome(&self, outcome: &GenerationOutcome, latest: bool) -> String {
        let stale = if latest { "" } else { " (older request)" };
        match &outcome.result {
            Ok(poem) => format!("--- poem #{}{stale} ---\n{poem}", outcome.ticket.0),
            Err(err) => format!(
                "poem #{}{stale} failed: {}",
                outcome.ticket.0,
                err.user_message()
            ),
        }
    }
}
