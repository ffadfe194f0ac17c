use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

pub async fn generate(cfg: &curator_config::LlmProviderConfig, prompt: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = crate::endpoint(&cfg.api_base, &cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [{ "role": "user", "content": prompt }],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_generation_response(json)
}

fn parse_generation_response(json: Value) -> Result<String> {
	let choice = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Generation response has no choices.".to_string(),
		})?;
	let content = choice.get("message").and_then(|msg| msg.get("content")).ok_or_else(|| {
		Error::InvalidResponse { message: "Generation choice is missing message content.".to_string() }
	})?;

	match content {
		Value::String(text) => Ok(text.trim().to_string()),
		// Some gateways return content as a list of typed parts.
		Value::Array(parts) => Ok(parts
			.iter()
			.filter_map(|part| part.get("text").and_then(|t| t.as_str()))
			.collect::<String>()
			.trim()
			.to_string()),
		Value::Null => Ok(String::new()),
		_ => Err(Error::InvalidResponse {
			message: "Generation content must be a string.".to_string(),
		}),
	}
}
