pub mod artifacts;
pub mod index;
pub mod models;

mod error;

pub use artifacts::{CHUNKS_FILE, CorpusIndex, FORMAT_VERSION, VECTORS_FILE};
pub use error::Error;
pub use index::{Neighbor, VectorIndex};
pub use models::{ArtifactHeader, ChunkRecord};

pub type Result<T, E = Error> = std::result::Result<T, E>;
