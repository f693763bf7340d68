use std::sync::Arc;

use client_core::{GenerationDispatcher, GenerationGateway, GenerationOutcome};
use composer::{ComposerSession, SelectionEvent};
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    commands::{UiCommand, HELP},
    render::Renderer,
};

/// Routes user commands into the composer session and generation results
/// back out to the terminal.
pub struct Frontend {
    session: ComposerSession,
    renderer: Renderer,
    dispatcher: GenerationDispatcher,
    in_flight: usize,
}

impl Frontend {
    pub fn new(
        renderer: Renderer,
        gateway: Arc<dyn GenerationGateway>,
    ) -> (Self, mpsc::UnboundedReceiver<GenerationOutcome>) {
        let (dispatcher, outcomes) = GenerationDispatcher::new(gateway);
        (
            Self {
                session: ComposerSession::new(),
                renderer,
                dispatcher,
                in_flight: 0,
            },
            outcomes,
        )
    }

    /// Returns the text to show for `command`, if any.
    pub fn handle(&mut self, command: UiCommand) -> Option<String> {
        match command {
            UiCommand::AddWord => {
                let word_id = self.session.add_word();
                Some(self.renderer.added(word_id))
            }
            UiCommand::RemoveWord(word_id) => {
                if self.session.remove_word(word_id) {
                    Some(format!("removed {word_id}"))
                } else {
                    Some(format!("{word_id} is not on the canvas"))
                }
            }
            UiCommand::ChooseDevice { word_id, device } => {
                self.dispatch(SelectionEvent::DeviceMenuChosen { word_id, device })
            }
            UiCommand::Activate(word_id) => self.dispatch(SelectionEvent::activated(word_id)),
            UiCommand::Clear => {
                self.session.clear();
                Some("canvas cleared".to_string())
            }
            UiCommand::Show => Some(self.renderer.canvas(&self.session)),
            UiCommand::Generate => {
                let ticket = self.dispatcher.submit(self.session.generation_request());
                self.in_flight += 1;
                info!(ticket = ticket.0, "poem requested");
                Some(format!("requested poem #{}", ticket.0))
            }
            UiCommand::Help => Some(HELP.to_string()),
            UiCommand::Quit => None,
        }
    }

    pub fn show_outcome(&mut self, outcome: &GenerationOutcome) -> String {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.renderer
            .outcome(outcome, self.dispatcher.is_latest(outcome.ticket))
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[cfg(test)]
    pub fn session(&self) -> &ComposerSession {
        &self.session
    }

    /// Menu toggling is handed back to the word controls only in normal mode.
    pub fn prompt(&self) -> &'static str {
        if self.session.allows_menu_toggle() {
            "> "
        } else {
            "link> "
        }
    }

    fn dispatch(&mut self, event: SelectionEvent) -> Option<String> {
        match self.session.dispatch(event) {
            Ok(transition) => self.renderer.transition(transition),
            Err(err) if err.is_silent() => None,
            Err(err) => Some(format!("{err}; choose one of: rhyme, alliteration")),
        }
    }
}
