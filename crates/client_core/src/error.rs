use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("malformed generation response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl GenerationError {
    /// Notice shown to the user. The poem specification is kept, so every
    /// notice invites a retry.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::InvalidServerUrl { url, .. } => {
                format!("Server URL '{url}' is not valid; fix it and restart.")
            }
            GenerationError::Transport(err) if err.is_timeout() || err.is_connect() => {
                "Generation service unreachable; check the server and retry.".to_string()
            }
            GenerationError::Transport(err) => format!("Generation request failed: {err}"),
            GenerationError::Service { status, message } if *status < 500 => {
                format!("Generation service rejected the poem: {message}")
            }
            GenerationError::Service { message, .. } => {
                format!("Generation service error: {message}; retry shortly.")
            }
            GenerationError::MalformedResponse(_) => {
                "Generation service sent an unreadable reply; retry.".to_string()
            }
        }
    }
}
