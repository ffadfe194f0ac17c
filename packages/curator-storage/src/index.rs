use std::cmp::Ordering;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
	pub position: usize,
	pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorIndex {
	dimension: usize,
	vectors: Vec<Vec<f32>>,
}
impl VectorIndex {
	pub fn new(dimension: usize) -> Self {
		Self { dimension, vectors: Vec::new() }
	}

	pub fn from_vectors(dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
		let mut index = Self { dimension, vectors: Vec::with_capacity(vectors.len()) };

		for vector in vectors {
			index.add(vector)?;
		}

		Ok(index)
	}

	pub fn add(&mut self, vector: Vec<f32>) -> Result<usize> {
		if vector.len() != self.dimension {
			return Err(Error::InvalidArgument(format!(
				"Vector has dimension {} but the index expects {}.",
				vector.len(),
				self.dimension
			)));
		}

		self.vectors.push(vector);

		Ok(self.vectors.len() - 1)
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}

	pub fn vectors(&self) -> &[Vec<f32>] {
		&self.vectors
	}

	pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
		if query.len() != self.dimension {
			return Err(Error::InvalidArgument(format!(
				"Query has dimension {} but the index expects {}.",
				query.len(),
				self.dimension
			)));
		}
		if k == 0 || self.vectors.is_empty() {
			return Ok(Vec::new());
		}

		let mut scored: Vec<Neighbor> = self
			.vectors
			.iter()
			.enumerate()
			.map(|(position, vector)| Neighbor { position, distance: squared_l2(vector, query) })
			.collect();

		// `sort_by` is stable, which gives the insertion-order tie break.
		scored.sort_by(|a, b| cmp_f32_asc(a.distance, b.distance));
		scored.truncate(k);

		Ok(scored)
	}
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn cmp_f32_asc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
	}
}
