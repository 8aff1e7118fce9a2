use std::path::Path;

use log::debug;

use crate::error::{DetectError, Result};
use crate::store::{ModelKind, ProfileSet};

use super::distance::distance;
use super::profile::Profile;

/// Returns the reference profile closest to `text`, along with its distance.
///
/// References are scanned in order and only a strictly smaller distance
/// replaces the current best, so on a tie the earliest reference wins.
///
/// # Errors
/// Returns `DetectError::NoProfiles` if `references` is empty.
pub fn closest<'a>(text: &str, references: &'a [Profile]) -> Result<(&'a Profile, u64)> {
	let input = Profile::from_text(text);

	let mut best: Option<(&Profile, u64)> = None;
	for reference in references {
		let d = distance(&input, reference);
		match best {
			Some((_, best_distance)) if d >= best_distance => (),
			_ => best = Some((reference, d)),
		}
	}

	best.ok_or(DetectError::NoProfiles)
}

/// Name of the reference profile closest to `text`.
pub fn detect<'a>(text: &str, references: &'a [Profile]) -> Result<&'a str> {
	closest(text, references).map(|(profile, _)| profile.name())
}

/// Language detector over a loaded set of reference profiles.
///
/// The profile set never changes after construction, so a detector can be
/// shared between threads (`Arc`, `web::Data`...) without any lock.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
	profiles: ProfileSet,
}

impl LanguageDetector {
	/// Wraps an already loaded profile set.
	pub fn new(profiles: ProfileSet) -> Self {
		Self { profiles }
	}

	/// Loads the `kind` model from `dir`.
	///
	/// # Errors
	/// Fails if the model file is missing or corrupt. No empty detector is
	/// ever substituted for a model that cannot be loaded.
	pub fn open<P: AsRef<Path>>(dir: P, kind: ModelKind) -> Result<Self> {
		Ok(Self::new(ProfileSet::open(dir, kind)?))
	}

	pub fn profiles(&self) -> &ProfileSet {
		&self.profiles
	}

	/// Names of the known languages, in tie-break order.
	pub fn languages(&self) -> Vec<&str> {
		self.profiles.names()
	}

	/// Detects the language of `text`.
	pub fn detect(&self, text: &str) -> Result<&str> {
		detect(text, self.profiles.profiles())
	}

	/// Detects the language of `text` and returns the raw winning distance.
	pub fn detect_with_distance(&self, text: &str) -> Result<(&str, u64)> {
		let (profile, d) = closest(text, self.profiles.profiles())?;
		debug!("detected '{}' at distance {}", profile.name(), d);
		Ok((profile.name(), d))
	}

	/// Detects the language of raw bytes, which must be valid UTF-8.
	pub fn detect_bytes(&self, bytes: &[u8]) -> Result<&str> {
		let text = std::str::from_utf8(bytes).map_err(|source| DetectError::Encoding { origin: "input text".to_owned(), source })?;
		self.detect(text)
	}

	/// Distance from `text` to every reference, in store order.
	pub fn distances(&self, text: &str) -> Vec<(&str, u64)> {
		let input = Profile::from_text(text);
		self.profiles
			.profiles()
			.iter()
			.map(|reference| (reference.name(), distance(&input, reference)))
			.collect()
	}
}
