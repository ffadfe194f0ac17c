use std::{
	fs,
	path::{Path, PathBuf},
	process::Command,
};

use walkdir::WalkDir;

const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
	#[error("Failed to read {path:?}.")]
	Read { path: PathBuf, source: std::io::Error },
	#[error("Failed to run pdftotext on {path:?}; is poppler installed?")]
	Spawn { path: PathBuf, source: std::io::Error },
	#[error("pdftotext failed on {path:?}: {stderr}")]
	Pdftotext { path: PathBuf, stderr: String },
	#[error("No text could be extracted from {path:?}.")]
	Empty { path: PathBuf },
}

pub fn discover_documents(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
	if !root.is_dir() {
		tracing::warn!(dir = %root.display(), "Source directory does not exist; corpus is empty.");

		return Vec::new();
	}

	let mut files: Vec<PathBuf> = WalkDir::new(root)
		.into_iter()
		.filter_map(|entry| match entry {
			Ok(entry) => Some(entry),
			Err(err) => {
				tracing::warn!(error = %err, "Skipping unreadable directory entry.");

				None
			},
		})
		.filter(|entry| entry.file_type().is_file())
		.map(|entry| entry.into_path())
		.filter(|path| has_extension(path, extensions))
		.collect();

	files.sort();

	files
}

pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
	let text = if has_extension(path, &["pdf".to_string()]) {
		extract_pdf(path)?
	} else {
		let bytes = fs::read(path)
			.map_err(|source| ExtractError::Read { path: path.to_path_buf(), source })?;

		String::from_utf8_lossy(&bytes).into_owned()
	};

	if text.trim().is_empty() {
		return Err(ExtractError::Empty { path: path.to_path_buf() });
	}

	Ok(text)
}

pub fn source_name(root: &Path, path: &Path) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);

	relative
		.components()
		.map(|component| component.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/")
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
	let output = Command::new("pdftotext")
		.arg("-layout")
		.arg("-enc")
		.arg("UTF-8")
		.arg(path)
		.arg("-")
		.output()
		.map_err(|source| ExtractError::Spawn { path: path.to_path_buf(), source })?;

	if !output.status.success() {
		return Err(ExtractError::Pdftotext {
			path: path.to_path_buf(),
			stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
		});
	}

	Ok(join_pages(&String::from_utf8_lossy(&output.stdout)))
}

fn join_pages(raw: &str) -> String {
	raw.split(PAGE_BREAK).map(str::trim_end).collect::<Vec<_>>().join("\n")
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
		.unwrap_or(false)
}
