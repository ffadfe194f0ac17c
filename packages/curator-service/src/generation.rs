use std::time::Duration;

use tokio::time;

use crate::GenerationProvider;

pub const TIMEOUT_MESSAGE: &str = "⚠️ Generation timed out.";

/// Every call yields a string: errors and timeouts become warnings, successful replies
/// (including empty ones) pass through unchanged.
pub struct Generator<'a> {
	provider: &'a dyn GenerationProvider,
	cfg: &'a curator_config::LlmProviderConfig,
}
impl<'a> Generator<'a> {
	pub fn new(
		provider: &'a dyn GenerationProvider,
		cfg: &'a curator_config::LlmProviderConfig,
	) -> Self {
		Self { provider, cfg }
	}

	pub async fn generate(&self, prompt: &str) -> String {
		let limit = Duration::from_millis(self.cfg.timeout_ms);

		match time::timeout(limit, self.provider.generate(self.cfg, prompt)).await {
			Ok(Ok(text)) => text,
			Ok(Err(err)) => {
				tracing::warn!(
					error = %err,
					provider_id = self.cfg.provider_id.as_str(),
					model = self.cfg.model.as_str(),
					"Generation failed."
				);

				failure_message(&err)
			},
			Err(_) => {
				tracing::warn!(
					timeout_ms = self.cfg.timeout_ms,
					provider_id = self.cfg.provider_id.as_str(),
					"Generation timed out."
				);

				TIMEOUT_MESSAGE.to_string()
			},
		}
	}
}

pub fn failure_message(err: &curator_providers::Error) -> String {
	format!("⚠️ Generation failed: {err}")
}
