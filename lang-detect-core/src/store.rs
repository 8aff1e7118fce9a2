use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{DetectError, Result};
use crate::io;
use crate::model::profile::Profile;

/// Which reference model to use.
///
/// - `Tc`: built from TextCat frequency lists (`.lm` files)
/// - `Fm`: built from raw text corpora (`.txt` files)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelKind {
	#[default]
	Tc,
	Fm,
}

impl ModelKind {
	/// File name of the serialized model, e.g. `model-tc.bin`.
	pub fn file_name(self) -> String {
		format!("model-{self}.bin")
	}
}

impl fmt::Display for ModelKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ModelKind::Tc => f.write_str("tc"),
			ModelKind::Fm => f.write_str("fm"),
		}
	}
}

impl FromStr for ModelKind {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"tc" => Ok(ModelKind::Tc),
			"fm" => Ok(ModelKind::Fm),
			other => Err(format!("unknown model '{other}', expected 'tc' or 'fm'")),
		}
	}
}

/// Ordered, read-only collection of reference profiles.
///
/// The order is the tie-break order used by detection, and it is kept as-is
/// through serialization. Stored on disk with `postcard`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileSet {
	profiles: Vec<Profile>,
}

impl ProfileSet {
	pub fn new(profiles: Vec<Profile>) -> Self {
		Self { profiles }
	}

	pub fn profiles(&self) -> &[Profile] {
		&self.profiles
	}

	/// Profile names in store order.
	pub fn names(&self) -> Vec<&str> {
		self.profiles.iter().map(Profile::name).collect()
	}

	pub fn len(&self) -> usize {
		self.profiles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.profiles.is_empty()
	}

	/// Path of the `kind` model inside `dir`.
	pub fn model_path<P: AsRef<Path>>(dir: P, kind: ModelKind) -> PathBuf {
		io::normalize_folder(dir).join(kind.file_name())
	}

	/// Loads the `kind` model stored in `dir`.
	pub fn open<P: AsRef<Path>>(dir: P, kind: ModelKind) -> Result<Self> {
		Self::load(Self::model_path(dir, kind))
	}

	/// Loads a serialized profile set.
	///
	/// # Errors
	/// - `ModelUnavailable` if the file cannot be read
	/// - `ModelCorrupt` if its content cannot be decoded
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path).map_err(|source| DetectError::ModelUnavailable { path: path.to_path_buf(), source })?;
		let set: Self = postcard::from_bytes(&bytes).map_err(|source| DetectError::ModelCorrupt { path: path.to_path_buf(), source })?;

		info!("loaded {} profiles from {}", set.len(), path.display());
		Ok(set)
	}

	/// Writes the profile set to `path`, replacing any previous file atomically.
	///
	/// Parent directories are created as needed.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let parent_dir = match path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p,
			_ => Path::new("."),
		};
		fs::create_dir_all(parent_dir)?;

		let bytes = postcard::to_stdvec(self).map_err(DetectError::Serialize)?;

		let temp_file = NamedTempFile::new_in(parent_dir)?;
		let mut writer = BufWriter::new(&temp_file);
		writer.write_all(&bytes)?;
		writer.flush()?;
		drop(writer);
		temp_file.persist(path).map_err(|e| DetectError::Io(e.error))?;

		info!("saved {} profiles to {}", self.len(), path.display());
		Ok(())
	}
}

impl From<Vec<Profile>> for ProfileSet {
	fn from(profiles: Vec<Profile>) -> Self {
		Self::new(profiles)
	}
}
