#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("I/O error at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Index artifacts do not match: {0}")]
	Mismatch(String),
}
