use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
	pub source: String,
	pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHeader {
	pub format_version: u32,
	pub build_id: Uuid,
	pub embedding_version: String,
	pub count: usize,
	#[serde(with = "time::serde::rfc3339")]
	pub built_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct VectorsArtifact {
	pub(crate) header: ArtifactHeader,
	pub(crate) dimension: usize,
	pub(crate) vectors: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChunksArtifact {
	pub(crate) header: ArtifactHeader,
	pub(crate) vectors_digest: String,
	pub(crate) chunks: Vec<ChunkRecord>,
}
