use std::io;
use std::path::PathBuf;

/// Errors reported by model loading, training and detection.
///
/// Nothing here is retried: every operation is deterministic, so the
/// caller receives the failure as-is.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
	/// The profile set could not be read (missing file, permissions...).
	#[error("model unavailable at {}: {source}", path.display())]
	ModelUnavailable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The profile set was read but could not be decoded.
	#[error("model at {} is corrupt: {source}", path.display())]
	ModelCorrupt {
		path: PathBuf,
		#[source]
		source: postcard::Error,
	},

	/// Detection was attempted against an empty reference set.
	#[error("no reference profiles available")]
	NoProfiles,

	/// Input bytes were not valid UTF-8.
	#[error("invalid UTF-8 in {origin}: {source}")]
	Encoding {
		origin: String,
		#[source]
		source: std::str::Utf8Error,
	},

	/// A training directory contained no usable input file.
	#[error("no `.{extension}` training files found in {}", dir.display())]
	EmptyTrainingSet { dir: PathBuf, extension: String },

	#[error("failed to serialize model: {0}")]
	Serialize(#[source] postcard::Error),

	#[error(transparent)]
	Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DetectError>;
