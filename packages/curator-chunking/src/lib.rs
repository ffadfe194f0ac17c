pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	InvalidConfig { message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkingConfig {
	pub chunk_size: u32,
	pub overlap: u32,
}
impl ChunkingConfig {
	pub fn new(chunk_size: u32, overlap: u32) -> Result<Self> {
		let cfg = Self { chunk_size, overlap };

		cfg.step()?;

		Ok(cfg)
	}

	pub fn step(&self) -> Result<usize> {
		if self.chunk_size == 0 {
			return Err(Error::InvalidConfig {
				message: "chunk_size must be greater than zero.".to_string(),
			});
		}
		if self.overlap >= self.chunk_size {
			return Err(Error::InvalidConfig {
				message: format!(
					"overlap ({}) must be less than chunk_size ({}).",
					self.overlap, self.chunk_size
				),
			});
		}

		Ok((self.chunk_size - self.overlap) as usize)
	}
}
impl Default for ChunkingConfig {
	fn default() -> Self {
		Self { chunk_size: 500, overlap: 50 }
	}
}

pub fn split_words(text: &str, cfg: &ChunkingConfig) -> Result<Vec<String>> {
	let step = cfg.step()?;
	let words: Vec<&str> = text.split_whitespace().collect();
	let size = cfg.chunk_size as usize;
	let mut chunks = Vec::with_capacity(words.len().div_ceil(step));
	let mut start = 0_usize;

	while start < words.len() {
		let end = (start + size).min(words.len());

		chunks.push(words[start..end].join(" "));

		if end == words.len() {
			break;
		}

		start += step;
	}

	tracing::trace!(words = words.len(), chunks = chunks.len(), "Split text into word windows.");

	Ok(chunks)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn numbered_words(count: usize) -> String {
		(0..count).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
	}

	#[test]
	fn rejects_overlap_not_below_chunk_size() {
		let cfg = ChunkingConfig { chunk_size: 10, overlap: 10 };

		assert!(matches!(split_words("a b c", &cfg), Err(Error::InvalidConfig { .. })));
		assert!(ChunkingConfig::new(10, 12).is_err());
		assert!(ChunkingConfig::new(0, 0).is_err());
	}

	#[test]
	fn text_of_exactly_chunk_size_words_is_one_chunk() {
		for overlap in [0, 1, 4, 9] {
			let cfg = ChunkingConfig::new(10, overlap).expect("valid config");
			let chunks = split_words(&numbered_words(10), &cfg).expect("split failed");

			assert_eq!(chunks.len(), 1, "overlap {overlap} produced {chunks:?}");
		}
	}

	#[test]
	fn windows_share_overlap_words() {
		let cfg = ChunkingConfig::new(4, 1).expect("valid config");
		let chunks = split_words(&numbered_words(10), &cfg).expect("split failed");

		assert_eq!(chunks, vec!["w0 w1 w2 w3", "w3 w4 w5 w6", "w6 w7 w8 w9"]);
	}

	#[test]
	fn last_window_ends_at_final_word() {
		let cfg = ChunkingConfig::new(4, 2).expect("valid config");
		let chunks = split_words(&numbered_words(7), &cfg).expect("split failed");

		assert_eq!(chunks, vec!["w0 w1 w2 w3", "w2 w3 w4 w5", "w4 w5 w6"]);
	}

	#[test]
	fn blank_text_has_no_chunks() {
		let chunks = split_words(" \n\t ", &ChunkingConfig::default()).expect("split failed");

		assert!(chunks.is_empty());
	}

	#[test]
	fn collapses_inner_whitespace() {
		let cfg = ChunkingConfig::new(10, 0).expect("valid config");
		let chunks = split_words("Aspirin\nreduces   fever.\u{c}Next page", &cfg).expect("split failed");

		assert_eq!(chunks, vec!["Aspirin reduces fever. Next page"]);
	}
}
