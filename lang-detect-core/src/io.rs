use std::fs;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::error::{DetectError, Result};

/// Reads a whole file and checks that it is valid UTF-8.
///
/// Invalid bytes are reported as `DetectError::Encoding` rather than being
/// replaced, so that they never end up inside an n-gram key.
pub(crate) fn read_utf8<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	let bytes = fs::read(path)?;
	String::from_utf8(bytes).map_err(|e| DetectError::Encoding {
		origin: path.display().to_string(),
		source: e.utf8_error(),
	})
}

/// Derives a profile name from a training file name.
///
/// The name is the file stem up to the first `-`:
/// - `"corpora/en-utf8.txt"` → `"en"`
/// - `"lm/english.lm"` → `"english"`
pub(crate) fn profile_name<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let stem = path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?
		.to_string_lossy();

	Ok(stem.split('-').next().unwrap_or_default().to_owned())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory, sorted by path.
///
/// Subdirectories are ignored.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}
