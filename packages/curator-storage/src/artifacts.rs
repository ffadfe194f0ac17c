use std::{
	fs::{self, File},
	io::{BufReader, BufWriter, Write},
	path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	index::VectorIndex,
	models::{ArtifactHeader, ChunkRecord, ChunksArtifact, VectorsArtifact},
};

pub const FORMAT_VERSION: u32 = 1;
pub const VECTORS_FILE: &str = "vectors.json";
pub const CHUNKS_FILE: &str = "chunks.json";

const TMP_SUFFIX: &str = ".tmp";

/// The vector index and its chunk metadata, kept position-aligned.
///
/// Entry `i` of the index and entry `i` of `chunks` always describe the same chunk.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
	header: ArtifactHeader,
	index: VectorIndex,
	chunks: Vec<ChunkRecord>,
}
impl CorpusIndex {
	pub fn new(
		embedding_version: impl Into<String>,
		index: VectorIndex,
		chunks: Vec<ChunkRecord>,
	) -> Result<Self> {
		if index.len() != chunks.len() {
			return Err(Error::Mismatch(format!(
				"Index holds {} vectors but metadata holds {} chunks.",
				index.len(),
				chunks.len()
			)));
		}

		let header = ArtifactHeader {
			format_version: FORMAT_VERSION,
			build_id: Uuid::new_v4(),
			embedding_version: embedding_version.into(),
			count: chunks.len(),
			built_at: OffsetDateTime::now_utc(),
		};

		Ok(Self { header, index, chunks })
	}

	pub fn empty(embedding_version: impl Into<String>, dimension: usize) -> Self {
		Self {
			header: ArtifactHeader {
				format_version: FORMAT_VERSION,
				build_id: Uuid::new_v4(),
				embedding_version: embedding_version.into(),
				count: 0,
				built_at: OffsetDateTime::now_utc(),
			},
			index: VectorIndex::new(dimension),
			chunks: Vec::new(),
		}
	}

	pub fn header(&self) -> &ArtifactHeader {
		&self.header
	}

	pub fn index(&self) -> &VectorIndex {
		&self.index
	}

	pub fn chunks(&self) -> &[ChunkRecord] {
		&self.chunks
	}

	pub fn chunk(&self, position: usize) -> Option<&ChunkRecord> {
		self.chunks.get(position)
	}

	pub fn len(&self) -> usize {
		self.chunks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}

	pub fn write(&self, dir: &Path) -> Result<()> {
		fs::create_dir_all(dir).map_err(|err| io_error(dir, err))?;

		let vectors = VectorsArtifact {
			header: self.header.clone(),
			dimension: self.index.dimension(),
			vectors: self.index.vectors().to_vec(),
		};
		let chunks = ChunksArtifact {
			header: self.header.clone(),
			vectors_digest: vectors_digest(self.index.dimension(), self.index.vectors()),
			chunks: self.chunks.clone(),
		};
		let vectors_path = dir.join(VECTORS_FILE);
		let chunks_path = dir.join(CHUNKS_FILE);
		let vectors_tmp = tmp_path(&vectors_path);
		let chunks_tmp = tmp_path(&chunks_path);

		write_json(&vectors_tmp, &vectors)?;
		write_json(&chunks_tmp, &chunks)?;
		fs::rename(&vectors_tmp, &vectors_path).map_err(|err| io_error(&vectors_path, err))?;
		fs::rename(&chunks_tmp, &chunks_path).map_err(|err| io_error(&chunks_path, err))?;

		tracing::info!(
			dir = %dir.display(),
			build_id = %self.header.build_id,
			chunks = self.header.count,
			"Wrote index artifacts."
		);

		Ok(())
	}

	pub fn load(dir: &Path) -> Result<Self> {
		let vectors: VectorsArtifact = read_json(&dir.join(VECTORS_FILE))?;
		let chunks: ChunksArtifact = read_json(&dir.join(CHUNKS_FILE))?;

		if vectors.header.format_version != FORMAT_VERSION {
			return Err(Error::Mismatch(format!(
				"Unsupported format version {}; expected {FORMAT_VERSION}.",
				vectors.header.format_version
			)));
		}
		if vectors.header != chunks.header {
			return Err(Error::Mismatch(format!(
				"Vector artifact (build {}) and metadata artifact (build {}) come from different builds.",
				vectors.header.build_id, chunks.header.build_id
			)));
		}
		if vectors.vectors.len() != vectors.header.count
			|| chunks.chunks.len() != chunks.header.count
		{
			return Err(Error::Mismatch(format!(
				"Header declares {} entries but artifacts hold {} vectors and {} chunks.",
				vectors.header.count,
				vectors.vectors.len(),
				chunks.chunks.len()
			)));
		}
		if vectors_digest(vectors.dimension, &vectors.vectors) != chunks.vectors_digest {
			return Err(Error::Mismatch(
				"Vector payload digest does not match the metadata artifact.".to_string(),
			));
		}

		let index = VectorIndex::from_vectors(vectors.dimension, vectors.vectors)
			.map_err(|err| Error::Mismatch(err.to_string()))?;

		tracing::info!(
			dir = %dir.display(),
			build_id = %vectors.header.build_id,
			chunks = index.len(),
			"Loaded index artifacts."
		);

		Ok(Self { header: vectors.header, index, chunks: chunks.chunks })
	}
}

fn vectors_digest(dimension: usize, vectors: &[Vec<f32>]) -> String {
	let mut hasher = blake3::Hasher::new();

	hasher.update(&(dimension as u64).to_le_bytes());

	for vector in vectors {
		for value in vector {
			hasher.update(&value.to_le_bytes());
		}
	}

	hasher.finalize().to_hex().to_string()
}

fn tmp_path(path: &Path) -> PathBuf {
	let mut name = path.as_os_str().to_os_string();

	name.push(TMP_SUFFIX);

	PathBuf::from(name)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
	let file = File::create(path).map_err(|err| io_error(path, err))?;
	let mut writer = BufWriter::new(file);

	serde_json::to_writer(&mut writer, value)?;
	writer.flush().map_err(|err| io_error(path, err))?;

	Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let file = File::open(path).map_err(|err| io_error(path, err))?;

	Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
	Error::Io { path: path.to_path_buf(), source }
}
