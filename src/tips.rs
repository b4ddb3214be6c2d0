//! Coach tips - short AI-generated form advice with a fixed offline fallback
//!
//! The caller always gets a sentence back. Missing API key, network trouble,
//! an error status or an unreadable body all collapse into the stock
//! fallback line; only a debug log records what went wrong.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::debug;

const SYSTEM_INSTRUCTION: &str = "You are a professional fitness coach and hypertrophy expert. \
Your goal is to provide short (max 2 sentences), motivating, and technically sound advice for specific exercises. \
Focus on form, tempo, or mind-muscle connection. Be direct and encouraging. \
Language: Italian (or English if the input is English).";

const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Environment variable holding the text-generation API key.
pub const API_KEY_ENV: &str = "ABRUSCHEDA_API_KEY";

/// Substituted on any failure talking to the service.
pub const FALLBACK_TIP: &str = "Focus sulla connessione mente-muscolo. Ogni ripetizione conta!";

/// Substituted when the service answers with an empty text.
pub const BLANK_REPLY_TIP: &str = "Mantieni la forma corretta e spingi al massimo!";

/// Client for the tip-generation endpoint.
pub struct TipClient {
    endpoint: String,
    api_key: Option<String>,
}

impl TipClient {
    /// Production client; key comes from the environment (absent is fine,
    /// every request then short-circuits to the fallback).
    pub fn from_env() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.into(), std::env::var(API_KEY_ENV).ok())
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>) -> Self {
        Self { endpoint, api_key }
    }

    /// Short coaching advice for one exercise. Never fails.
    pub fn workout_tip(&self, exercise_name: &str, notes: &str) -> String {
        match self.request_tip(exercise_name, notes) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => BLANK_REPLY_TIP.to_string(),
            Err(e) => {
                debug!(error = %e, exercise = exercise_name, "tip generation failed");
                FALLBACK_TIP.to_string()
            }
        }
    }

    fn request_tip(&self, exercise_name: &str, notes: &str) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no API key configured ({API_KEY_ENV})"))?;

        let body = serde_json::json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Dammi un consiglio rapido ed efficace per l'esercizio: {exercise_name}. \
                         Note aggiuntive: {notes}"
                    )
                }]
            }],
            "generationConfig": { "temperature": 0.7 }
        });

        let response: Value = ureq::post(&self.endpoint)
            .query("key", key)
            .send_json(body)?
            .into_json()
            .context("unreadable response body")?;

        let text = response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("response carries no text"))?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, key: Option<&str>) -> TipClient {
        TipClient::with_endpoint(server.url("/generate"), key.map(str::to_owned))
    }

    #[test]
    fn test_returns_trimmed_service_text() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/generate").query_param("key", "k");
            then.status(200).json_body(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "  Gomiti stretti, scendi lento.  " }] }
                }]
            }));
        });

        let tip = client_for(&server, Some("k")).workout_tip("Panca Piana", "note");
        assert_eq!(tip, "Gomiti stretti, scendi lento.");
        m.assert();
    }

    #[test]
    fn test_http_error_yields_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(500).body("quota exceeded");
        });

        let tip = client_for(&server, Some("k")).workout_tip("Squat", "");
        assert_eq!(tip, FALLBACK_TIP);
    }

    #[test]
    fn test_malformed_body_yields_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(200).body("not json at all");
        });

        let tip = client_for(&server, Some("k")).workout_tip("Squat", "");
        assert_eq!(tip, FALLBACK_TIP);
    }

    #[test]
    fn test_blank_reply_yields_stock_line() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(200).json_body(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
            }));
        });

        let tip = client_for(&server, Some("k")).workout_tip("Squat", "");
        assert_eq!(tip, BLANK_REPLY_TIP);
    }

    #[test]
    fn test_missing_key_skips_network() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(200);
        });

        let tip = client_for(&server, None).workout_tip("Squat", "");
        assert_eq!(tip, FALLBACK_TIP);
        m.assert_hits(0);
    }
}
