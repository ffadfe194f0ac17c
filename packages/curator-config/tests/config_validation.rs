use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use curator_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_chunking(chunk_size: i64, overlap: i64) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");
	let chunking = root
		.get_mut("chunking")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [chunking].");

	chunking.insert("chunk_size".to_string(), Value::Integer(chunk_size));
	chunking.insert("overlap".to_string(), Value::Integer(overlap));

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("curator_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = curator_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.chunking.chunk_size, 500);
	assert_eq!(cfg.chunking.overlap, 50);
	assert_eq!(cfg.retrieval.top_k, 10);
	assert_eq!(cfg.answer.snippet_chars, 200);
	assert!(cfg.prompt.instruction.is_none(), "Blank instruction must normalize to None.");
	assert_eq!(
		cfg.providers.llm.default_headers.get("x-client").and_then(|v| v.as_str()),
		Some("curator")
	);
}

#[test]
fn overlap_must_be_less_than_chunk_size() {
	let path = write_temp_config(sample_toml_with_chunking(50, 50));
	let result = curator_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected overlap validation error.");

	assert!(
		err.to_string().contains("chunking.overlap must be less than chunking.chunk_size."),
		"Unexpected error: {err}"
	);
}

#[test]
fn chunk_size_must_be_positive() {
	let mut cfg = base_config();

	cfg.chunking.chunk_size = 0;
	cfg.chunking.overlap = 0;

	let err = curator_config::validate(&cfg).expect_err("Expected chunk_size validation error.");

	assert!(
		err.to_string().contains("chunking.chunk_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	for section in ["chunking", "retrieval", "prompt", "answer"] {
		root.remove(section);
	}

	let cfg: Config = toml::from_str(&toml::to_string(&value).expect("Failed to render config."))
		.expect("Failed to parse trimmed config.");

	assert_eq!(cfg.chunking.chunk_size, 500);
	assert_eq!(cfg.chunking.overlap, 50);
	assert_eq!(cfg.retrieval.top_k, 10);
	assert_eq!(cfg.prompt.max_contexts, 50);
	assert_eq!(cfg.answer.max_resources, 5);
	assert!(curator_config::validate(&cfg).is_ok());
}

#[test]
fn blank_api_key_is_resolved_from_environment_lookup() {
	let mut cfg = base_config();

	cfg.providers.llm.api_key = "  ".to_string();

	curator_config::normalize(&mut cfg, |name| {
		(name == "CURATOR_LLM_API_KEY").then(|| "from-env".to_string())
	});

	assert_eq!(cfg.providers.llm.api_key, "from-env");
	assert_eq!(cfg.providers.embedding.api_key, "embedding-key");
}

#[test]
fn unresolved_api_key_is_rejected() {
	let mut cfg = base_config();

	cfg.providers.rerank.api_key = String::new();

	curator_config::normalize(&mut cfg, |_| None);

	let err = curator_config::validate(&cfg).expect_err("Expected api_key validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(err.to_string().contains("CURATOR_RERANK_API_KEY"), "Unexpected error: {err}");
}

#[test]
fn extensions_are_normalized() {
	let mut cfg = base_config();

	cfg.corpus.extensions = vec![".PDF".to_string(), " txt ".to_string()];

	curator_config::normalize(&mut cfg, |_| None);

	assert_eq!(cfg.corpus.extensions, vec!["pdf".to_string(), "txt".to_string()]);
}

#[test]
fn embedding_version_names_provider_model_and_dimensions() {
	let cfg = base_config();

	assert_eq!(
		curator_config::embedding_version(&cfg.providers.embedding),
		"local:all-MiniLM-L6-v2:384"
	);
}

#[test]
fn read_failure_reports_path() {
	let path = env::temp_dir().join("curator_config_test_missing.toml");
	let err = curator_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
