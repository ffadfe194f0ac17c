pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<curator_providers::Error> for Error {
	fn from(err: curator_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<curator_storage::Error> for Error {
	fn from(err: curator_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<curator_chunking::Error> for Error {
	fn from(err: curator_chunking::Error) -> Self {
		Self::Configuration { message: err.to_string() }
	}
}
