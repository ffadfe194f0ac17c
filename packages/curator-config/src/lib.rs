mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Answer, Chunking, Config, Corpus, EmbeddingProviderConfig, LlmProviderConfig, Prompt,
	ProviderConfig, Providers, Retrieval, Service,
};

use std::{env, fs, path::Path};

pub const API_KEY_ENV_PREFIX: &str = "CURATOR_";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg, |name| env::var(name).ok());

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.chunking.chunk_size == 0 {
		return Err(Error::Validation {
			message: "chunking.chunk_size must be greater than zero.".to_string(),
		});
	}
	if cfg.chunking.overlap >= cfg.chunking.chunk_size {
		return Err(Error::Validation {
			message: "chunking.overlap must be less than chunking.chunk_size.".to_string(),
		});
	}
	if cfg.corpus.extensions.iter().any(|ext| ext.trim().is_empty()) {
		return Err(Error::Validation {
			message: "corpus.extensions must not contain empty entries.".to_string(),
		});
	}
	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.prompt.max_contexts == 0 {
		return Err(Error::Validation {
			message: "prompt.max_contexts must be greater than zero.".to_string(),
		});
	}
	if cfg.answer.snippet_chars == 0 {
		return Err(Error::Validation {
			message: "answer.snippet_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.batch_size == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.batch_size must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.llm.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be a finite number.".to_string(),
		});
	}

	for (label, timeout_ms) in [
		("embedding", cfg.providers.embedding.timeout_ms),
		("rerank", cfg.providers.rerank.timeout_ms),
		("llm", cfg.providers.llm.timeout_ms),
	] {
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}
	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("rerank", &cfg.providers.rerank.api_key),
		("llm", &cfg.providers.llm.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!(
					"Provider {label} api_key must be non-empty; set it in the config or via {}.",
					api_key_env_name(label)
				),
			});
		}
	}

	Ok(())
}

pub fn api_key_env_name(label: &str) -> String {
	format!("{API_KEY_ENV_PREFIX}{}_API_KEY", label.to_ascii_uppercase())
}

pub fn embedding_version(cfg: &EmbeddingProviderConfig) -> String {
	format!("{}:{}:{}", cfg.provider_id, cfg.model, cfg.dimensions)
}

pub fn normalize<F>(cfg: &mut Config, lookup: F)
where
	F: Fn(&str) -> Option<String>,
{
	if cfg.prompt.instruction.as_deref().map(|text| text.trim().is_empty()).unwrap_or(false) {
		cfg.prompt.instruction = None;
	}

	for ext in &mut cfg.corpus.extensions {
		*ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
	}

	for (label, key) in [
		("embedding", &mut cfg.providers.embedding.api_key),
		("rerank", &mut cfg.providers.rerank.api_key),
		("llm", &mut cfg.providers.llm.api_key),
	] {
		if key.trim().is_empty()
			&& let Some(value) = lookup(&api_key_env_name(label))
		{
			*key = value.trim().to_string();
		}
	}
}
