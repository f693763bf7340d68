use reqwest::Client;
use shared::{
    domain::WordId,
    protocol::word_template_route,
    template::{BUILTIN_WORD_TEMPLATE, WORD_PLACEHOLDER},
};
use tracing::debug;

use crate::{endpoint, ensure_success, parse_server_url, GenerationError};

/// HTML fragment for one word control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTemplate {
    markup: String,
}

impl WordTemplate {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_WORD_TEMPLATE)
    }

    /// Substitutes every placeholder with the word's element id.
    pub fn render(&self, word_id: WordId) -> String {
        self.markup.replace(WORD_PLACEHOLDER, &word_id.element_id())
    }
}

pub async fn fetch_word_template(
    http: &Client,
    server_url: &str,
) -> Result<WordTemplate, GenerationError> {
    let url = endpoint(&parse_server_url(server_url)?, word_template_route())?;
    debug!(%url, "fetching word template");
    let response = ensure_success(http.get(url).send().await?).await?;
    Ok(WordTemplate::new(response.text().await?))
}
