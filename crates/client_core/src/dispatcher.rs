//! Fire-and-forget submission of generation requests.
//!
//! Each submitted request runs on its own task and reports back through the
//! outcome channel. Requests are never cancelled; a caller that has moved on
//! uses [`GenerationDispatcher::is_latest`] to tell late answers apart.

use std::sync::Arc;

use shared::protocol::GenerationRequest;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{GenerationError, GenerationGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub u64);

#[derive(Debug)]
pub struct GenerationOutcome {
    pub ticket: RequestTicket,
    pub result: Result<String, GenerationError>,
}

pub struct GenerationDispatcher {
    gateway: Arc<dyn GenerationGateway>,
    outcomes: mpsc::UnboundedSender<GenerationOutcome>,
    last_ticket: Option<RequestTicket>,
}

impl GenerationDispatcher {
    pub fn new(
        gateway: Arc<dyn GenerationGateway>,
    ) -> (Self, mpsc::UnboundedReceiver<GenerationOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (
            Self {
                gateway,
                outcomes,
                last_ticket: None,
            },
            rx,
        )
    }

    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, request: GenerationRequest) -> RequestTicket {
        let ticket = RequestTicket(self.last_ticket.map_or(0, |last| last.0 + 1));
        self.last_ticket = Some(ticket);

        let gateway = Arc::clone(&self.gateway);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = gateway.generate(&request).await;
            if let Err(err) = &result {
                warn!(ticket = ticket.0, %err, "poem generation failed");
            }
            if outcomes.send(GenerationOutcome { ticket, result }).is_err() {
                debug!(ticket = ticket.0, "outcome receiver dropped");
            }
        });
        debug!(ticket = ticket.0, "generation request submitted");
        ticket
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.last_ticket == Some(ticket)
    }
}
