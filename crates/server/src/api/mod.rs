use std::sync::Arc;

use shared::{
    domain::{Device, WordId},
    error::{ApiError, ApiException, ErrorCode},
    protocol::GenerationRequest,
};
use tracing::{error, info};

/// Turns a validated poem specification into poem text.
pub trait PoemGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ApiException>;
}

/// Placeholder generator that echoes the constraint skeleton back, one line
/// per linked device.
pub struct SkeletonGenerator;

impl PoemGenerator for SkeletonGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ApiException> {
        if request.is_empty() {
            return Ok("free verse: no devices linked".to_string());
        }
        let lines: Vec<String> = request
            .entries()
            .iter()
            .map(|(device, ids)| skeleton_line(*device, ids))
            .collect();
        Ok(lines.join("\n"))
    }
}

fn skeleton_line(device: Device, ids: &[WordId]) -> String {
    let words: Vec<String> = ids.iter().map(|id| id.element_id()).collect();
    format!("{device}: {}", words.join(" "))
}

#[derive(Clone)]
pub struct ApiContext {
    pub generator: Arc<dyn PoemGenerator>,
}

pub fn parse_generation_request(body: &[u8]) -> Result<GenerationRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        ApiError::new(
            ErrorCode::Validation,
            format!("invalid poem specification: {e}"),
        )
    })
}

pub fn generate_poem(ctx: &ApiContext, request: &GenerationRequest) -> Result<String, ApiError> {
    let poem = ctx.generator.generate(request).map_err(|e| {
        error!(error = %e, "poem generator failed");
        ApiError::from(e)
    })?;
    info!(
        devices = request.entries().len(),
        lines = poem.lines().count(),
        "poem generated"
    );
    Ok(poem)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
