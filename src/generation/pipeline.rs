// src/generation/pipeline.rs
use super::backend::TextGenerator;
use crate::config::GenerationConfig;
use crate::error::{AssistError, Result};
use crate::utils::preview;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A prompt template with `{{name}}` placeholders and the values for them.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub template: String,
    pub variables: HashMap<String, String>,
}

impl GenerationRequest {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            variables: HashMap::new(),
        }
    }

    pub fn var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    /// Single pass over the template, so substituted values are never
    /// themselves scanned for placeholders. Unknown placeholders stay as-is.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let name = after[..end].trim();
                    match self.variables.get(name) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Prompt rendering, one backend call, and response validation. No retries:
/// the first failure ends the request.
#[derive(Clone)]
pub struct GenerationPipeline {
    backend: Arc<dyn TextGenerator>,
    config: GenerationConfig,
}

impl GenerationPipeline {
    pub fn new(backend: Arc<dyn TextGenerator>, config: GenerationConfig) -> Self {
        Self { backend, config }
    }

    /// Free-text generation. Blank output is an error.
    pub async fn generate_text(&self, request: &GenerationRequest) -> Result<String> {
        let prompt = request.render();
        debug!("Rendered prompt: {}", preview(&prompt, 200));

        let text = self
            .backend
            .generate(&prompt, &self.config)
            .await
            .map_err(|e| match e {
                AssistError::Backend(_) => e,
                other => AssistError::Backend(other.to_string()),
            })?;

        if text.trim().is_empty() {
            warn!("Generation backend returned no text");
            return Err(AssistError::EmptyGeneration);
        }

        info!("Generated {} chars", text.len());
        Ok(text)
    }

    /// Generation whose answer must contain a JSON object; the first balanced
    /// `{...}` block in the response is parsed.
    pub async fn generate_json(&self, request: &GenerationRequest) -> Result<Value> {
        let text = self.generate_text(request).await?;
        parse_json_block(&text)
    }
}

pub fn parse_json_block(text: &str) -> Result<Value> {
    let block = extract_json_block(text).ok_or_else(|| {
        warn!("No JSON object in response: {}", preview(text, 200));
        AssistError::MalformedResponse
    })?;

    serde_json::from_str(block).map_err(|e| {
        warn!("Response JSON did not parse: {}", e);
        AssistError::MalformedResponse
    })
}

/// First balanced `{...}` span. Braces inside JSON strings do not count.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}


#[cfg(test)]
mod tests {
    use super::testing::{pipeline, FakeGenerator};
    use super::*;

    #[test]
    fn test_render_substitutes_once() {
        let request = GenerationRequest::new("Role: {{ role }} at {{company}} {{missing}}")
            .var("role", "{{company}}")
            .var("company", "Acme");
        assert_eq!(request.render(), "Role: {{company}} at Acme {{missing}}");
    }

    #[test]
    fn test_render_unclosed_placeholder() {
        let request = GenerationRequest::new("Hello {{name").var("name", "x");
        assert_eq!(request.render(), "Hello {{name");
    }

    #[test]
    fn test_extract_json_block_with_surrounding_text() {
        let text = "Sure! Here you go:\n```json\n{\"jobs\": [{\"a\": {\"b\": 1}}]}\n```\nThanks {not json}";
        assert_eq!(
            extract_json_block(text),
            Some("{\"jobs\": [{\"a\": {\"b\": 1}}]}")
        );
    }

    #[test]
    fn test_extract_json_block_ignores_braces_in_strings() {
        let text = r#"{"tip": "use } and { \" carefully", "n": 2} tail }"#;
        assert_eq!(
            extract_json_block(text),
            Some(r#"{"tip": "use } and { \" carefully", "n": 2}"#)
        );
    }

    #[test]
    fn test_unbalanced_json_is_malformed() {
        assert!(extract_json_block("{\"jobs\": [").is_none());
        assert!(matches!(
            parse_json_block("{\"jobs\": ["),
            Err(AssistError::MalformedResponse)
        ));
        assert!(matches!(
            parse_json_block("no json at all"),
            Err(AssistError::MalformedResponse)
        ));
        assert!(matches!(
            parse_json_block("{jobs: nope}"),
            Err(AssistError::MalformedResponse)
        ));
    }

    #[tokio::test]
    async fn test_generate_text_renders_prompt() {
        let backend = FakeGenerator::replying("Dear hiring manager");
        let pipeline = pipeline(backend.clone());

        let request = GenerationRequest::new("Write for {{link}}").var("link", "https://x.test");
        let text = pipeline.generate_text(&request).await.unwrap();

        assert_eq!(text, "Dear hiring manager");
        assert_eq!(backend.last_prompt(), "Write for https://x.test");
    }

    #[tokio::test]
    async fn test_blank_output_is_empty_generation() {
        let pipeline = pipeline(FakeGenerator::replying("  \n "));
        assert!(matches!(
            pipeline.generate_text(&GenerationRequest::new("x")).await,
            Err(AssistError::EmptyGeneration)
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_is_backend_error() {
        let pipeline = pipeline(FakeGenerator::failing("quota exceeded"));
        match pipeline.generate_json(&GenerationRequest::new("x")).await {
            Err(AssistError::Backend(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_json() {
        let pipeline = pipeline(FakeGenerator::replying("Result: {\"ok\": true}"));
        let value = pipeline
            .generate_json(&GenerationRequest::new("x"))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!({"ok": true}));
    }
}
