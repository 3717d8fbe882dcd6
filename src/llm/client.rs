//! Minimal OpenAI chat-completions client

use crate::error::{NovaError, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a single user message and return the first choice's text
    pub async fn chat(&self, model: &str, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = ChatCompletionRequest {
            model,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {} (model {}, {} prompt chars)", url, model, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NovaError::RemoteService(format!("OpenAI API error: {}", status)));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| NovaError::RemoteService(format!("Unexpected OpenAI response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| NovaError::RemoteService("OpenAI returned no choices".to_string()))
    }

    /// Chat and parse the reply as JSON
    pub async fn chat_json<T: DeserializeOwned>(&self, model: &str, prompt: &str, max_tokens: u32) -> Result<T> {
        let reply = self.chat(model, prompt, max_tokens).await?;
        parse_reply(&reply)
    }
}

/// Parse a model reply, tolerating a surrounding Markdown code fence
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T> {
    Ok(serde_json::from_str(strip_code_fences(reply))?)
}

pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string, e.g. ```json
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::resume_analyzer::ResumeAnalysis;
    use crate::test_support::serve_once;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  ```\n[1, 2]\n```  "), "[1, 2]");
    }

    #[test]
    fn test_parse_reply_accepts_string_numbers() {
        let reply = r#"```json
{
  "extractedSkills": {"technical": ["Python"], "frameworks": [], "tools": ["Git"], "languages": ["English"]},
  "experienceYears": "6+",
  "educationLevel": "Master's Degree",
  "certifications": [],
  "matchScore": "140",
  "strengths": ["Analytics"],
  "gaps": [{"skill": "Cloud", "impact": "high", "timeToAcquire": "2-3 months"}],
  "marketPosition": "Strong"
}
```"#;
        let analysis: ResumeAnalysis = parse_reply(reply).unwrap();
        assert_eq!(analysis.experience_years, 6);
        assert_eq!(analysis.match_score, 100);
        assert_eq!(analysis.gaps[0].skill, "Cloud");
    }

    #[test]
    fn test_parse_reply_rejects_prose() {
        let result: Result<ResumeAnalysis> = parse_reply("I could not analyze this resume.");
        assert!(matches!(result, Err(NovaError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_chat_json_reads_first_choice() {
        let content = "```json\n{\"experienceYears\": 4, \"matchScore\": \"85%\", \"strengths\": [\"APIs\"]}\n```";
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        });
        let (base_url, request) = serve_once(200, body.to_string()).await;

        let client = OpenAiClient::new(&format!("{}/v1", base_url), "sk-test", 5).unwrap();
        let analysis: ResumeAnalysis = client.chat_json("gpt-4", "Analyze this résumé", 2000).await.unwrap();
        assert_eq!(analysis.experience_years, 4);
        assert_eq!(analysis.match_score, 85);
        assert_eq!(analysis.strengths, vec!["APIs".to_string()]);

        let request = request.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(lowered.contains("authorization: bearer sk-test"));
        assert!(request.contains("\"temperature\":0.3"));
        assert!(request.contains("\"max_tokens\":2000"));
    }

    #[tokio::test]
    async fn test_error_status_is_remote_service_error() {
        let (base_url, _request) = serve_once(429, r#"{"error": {"message": "rate limited"}}"#).await;
        let client = OpenAiClient::new(&base_url, "sk-test", 5).unwrap();

        let result = client.chat("gpt-4", "hello", 10).await;
        assert!(matches!(result, Err(NovaError::RemoteService(message)) if message.contains("429")));
    }

    #[tokio::test]
    async fn test_empty_choices_is_remote_service_error() {
        let (base_url, _request) = serve_once(200, r#"{"choices": []}"#).await;
        let client = OpenAiClient::new(&base_url, "sk-test", 5).unwrap();

        let result = client.chat("gpt-4", "hello", 10).await;
        assert!(matches!(result, Err(NovaError::RemoteService(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = OpenAiClient::new("http://127.0.0.1:9/v1", "sk-test", 2).unwrap();
        let result = client.chat("gpt-4", "hello", 10).await;
        assert!(matches!(result, Err(NovaError::Network(_))));
    }
}
