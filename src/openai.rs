use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

const OPENAI_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    tools: Vec<Tool>,
    input: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tool {
    WebSearchPreview,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputContent {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

/// Concatenate every text part of every message item, in output order.
fn output_text(response: ResponsesResponse) -> Result<String> {
    let mut found_message = false;
    let mut text = String::new();

    for item in response.output {
        if let OutputItem::Message { content } = item {
            found_message = true;
            for part in content {
                if let OutputContent::OutputText { text: part } = part {
                    text.push_str(&part);
                }
            }
        }
    }

    if found_message {
        Ok(text)
    } else {
        Err(BotError::OpenAiResponse(
            "No message in response output".to_string(),
        ))
    }
}

/// Turn a non-2xx response into [`BotError::OpenAiApi`] carrying the body.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
    Err(BotError::OpenAiApi { status, message })
}

pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a single web-search-augmented completion for `input`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and responses without message text.
    pub async fn respond(&self, input: &str) -> Result<String> {
        debug!(
            "Sending request to OpenAI Responses API ({} characters of input)",
            input.chars().count()
        );

        let request = ResponsesRequest {
            model: &self.model,
            tools: vec![Tool::WebSearchPreview],
            input,
        };

        let response = self
            .client
            .post(OPENAI_RESPONSES_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let api_response: ResponsesResponse = error_for_status(response).await?.json().await?;
        let reply = output_text(api_response)?;

        debug!("Received response from OpenAI Responses API");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> ResponsesResponse {
        serde_json::from_value(value).expect("valid response json")
    }

    #[test]
    fn request_enables_web_search() {
        let request = ResponsesRequest {
            model: "gpt-4o",
            tools: vec![Tool::WebSearchPreview],
            input: "hi",
        };
        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            value,
            json!({
                "model": "gpt-4o",
                "tools": [{ "type": "web_search_preview" }],
                "input": "hi"
            })
        );
    }

    #[test]
    fn text_is_collected_past_search_calls() {
        let response = parse(json!({
            "id": "resp_1",
            "output": [
                { "type": "web_search_call", "id": "ws_1", "status": "completed" },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        { "type": "output_text", "text": "snow's ", "annotations": [] },
                        { "type": "output_text", "text": "looking good", "annotations": [] }
                    ]
                }
            ]
        }));
        assert_eq!(output_text(response).ok().as_deref(), Some("snow's looking good"));
    }

    #[test]
    fn refusal_parts_are_skipped() {
        let response = parse(json!({
            "output": [{
                "type": "message",
                "content": [
                    { "type": "refusal", "refusal": "nope" },
                    { "type": "output_text", "text": "ok" }
                ]
            }]
        }));
        assert_eq!(output_text(response).ok().as_deref(), Some("ok"));
    }

    fn http_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .expect("valid http response"),
        )
    }

    #[tokio::test]
    async fn error_status_keeps_code_and_body() {
        let result = error_for_status(http_response(429, "rate limited")).await;
        match result {
            Err(BotError::OpenAiApi { status, message }) => {
                assert_eq!(status, reqwest::StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected OpenAiApi error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_status_passes_through() {
        let response = error_for_status(http_response(200, "{}"))
            .await
            .expect("2xx is not an error");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    #[test]
    fn missing_message_is_an_error() {
        let response = parse(json!({
            "output": [{ "type": "web_search_call", "id": "ws_1" }]
        }));
        assert!(matches!(
            output_text(response),
            Err(BotError::OpenAiResponse(_))
        ));
    }
}
