use crate::models::Person;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const MISSING_KEY_MESSAGE: &str = "Joyeux Noël ! (Clé API manquante)";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Payload(String),
}

/// Produces a short celebratory text for the person opening a day.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, person: Person, day: u8) -> Result<String, GenerationError>;
}

pub fn fallback_message(person: Person, day: u8) -> String {
    format!("Joyeux jour {day} {person} ! 🎄")
}

/// Any generation failure degrades to the fixed fallback text.
pub fn message_or_fallback(result: Result<String, GenerationError>, person: Person, day: u8) -> String {
    match result {
        Ok(message) => message,
        Err(err) => {
            warn!(%person, day, "message generation failed: {err}");
            fallback_message(person, day)
        }
    }
}

/// Used when no API key is configured; never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderGenerator;

#[async_trait]
impl MessageGenerator for PlaceholderGenerator {
    async fn generate(&self, _person: Person, _day: u8) -> Result<String, GenerationError> {
        Ok(MISSING_KEY_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/{}:generateContent", self.model)
    }
}

pub fn build_prompt(person: Person, day: u8) -> String {
    format!(
        "Écris un court message de Noël chaleureux, drôle ou romantique (1-2 phrases maximum) pour {person}.\n\
         C'est le jour {day} du calendrier de l'avent.\n\
         Ne mets pas de guillemets. Utilise des emojis de Noël.\n\
         Langue: Français."
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn extract_text(response: GenerateResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::Payload("response contained no text".to_string()));
    }
    Ok(text.to_string())
}

#[async_trait]
impl MessageGenerator for GeminiGenerator {
    async fn generate(&self, person: Person, day: u8) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(person, day)),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|err| GenerationError::Payload(format!("{err}; body={body}")))?;
        extract_text(parsed)
    }
}
