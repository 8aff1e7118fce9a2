//! Offline construction of reference profiles.
//!
//! Two sources are supported:
//! - TextCat style frequency lists (`.lm`), where the line order already
//!   encodes the rank
//! - raw text corpora (`.txt`), one file per language, ranked exactly like a
//!   detection input

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};

use crate::error::{DetectError, Result};
use crate::io::{list_files, profile_name, read_utf8};
use crate::model::ngram::NgramCounter;
use crate::model::profile::Profile;
use crate::store::ProfileSet;

/// Extension of TextCat frequency-list files.
pub const FREQUENCY_LIST_EXTENSION: &str = "lm";

/// Extension of raw corpus files.
pub const CORPUS_EXTENSION: &str = "txt";

/// Parses a frequency list into a ranked n-gram mapping.
///
/// A line is kept only if it starts with a character that is neither a digit
/// nor whitespace. Its first tab-separated field is the n-gram and its rank is
/// its position among kept lines. A repeated n-gram keeps its later rank.
pub fn parse_frequency_list(content: &str) -> HashMap<String, usize> {
	let mut ngrams = HashMap::new();
	let mut rank = 1;

	for line in content.lines() {
		match line.chars().next() {
			Some(c) if !c.is_ascii_digit() && !c.is_whitespace() => (),
			_ => continue,
		}

		// Should not panic, `split` always yields at least one item
		let ngram = line.split('\t').next().unwrap_or(line);
		ngrams.insert(ngram.to_owned(), rank);
		rank += 1;
	}

	ngrams
}

/// Builds a profile from a single frequency-list file.
pub fn profile_from_frequency_list<P: AsRef<Path>>(path: P) -> Result<Profile> {
	let path = path.as_ref();
	let name = profile_name(path)?;
	let ngrams = parse_frequency_list(&read_utf8(path)?);
	if ngrams.is_empty() {
		warn!("frequency list {} contains no n-gram", path.display());
	}
	debug!("read {} ranked n-grams for '{}' from {}", ngrams.len(), name, path.display());
	Ok(Profile::from_ranks(&name, ngrams))
}

/// Builds a profile from a single raw corpus file.
///
/// Every line feeds the same counter, then the counts are ranked.
pub fn profile_from_corpus<P: AsRef<Path>>(path: P) -> Result<Profile> {
	let path = path.as_ref();
	let name = profile_name(path)?;
	info!("training with {}", path.display());

	let mut counter = NgramCounter::new();
	for line in read_utf8(path)?.lines() {
		counter.add_text(line);
	}
	debug!("counted {} distinct n-grams for '{}'", counter.len(), name);

	Ok(Profile::from_counter(&name, counter))
}

/// Builds one profile per `.lm` file of `dir`, in file name order.
///
/// # Errors
/// Returns `EmptyTrainingSet` if the directory holds no `.lm` file, or the
/// first I/O or encoding error met.
pub fn train_from_frequency_lists<P: AsRef<Path>>(dir: P) -> Result<ProfileSet> {
	let files = training_files(dir.as_ref(), FREQUENCY_LIST_EXTENSION)?;

	let profiles = files.iter().map(profile_from_frequency_list).collect::<Result<Vec<_>>>()?;
	info!("trained {} profiles from frequency lists", profiles.len());
	Ok(ProfileSet::new(profiles))
}

/// Builds one profile per `.txt` file of `dir`, in file name order.
///
/// Files are processed on worker threads; the resulting order does not depend
/// on which thread finishes first.
pub fn train_from_corpora<P: AsRef<Path>>(dir: P) -> Result<ProfileSet> {
	let files = training_files(dir.as_ref(), CORPUS_EXTENSION)?;
	train_from_corpus_files(files)
}

/// Builds one profile per corpus file, keeping the order of `files`.
///
/// # Behavior
/// - Splits the files into at most `num_cpus` chunks
/// - Spawns a thread per chunk, each sending `(index, profile)` pairs back
/// - Reassembles the profiles by index
pub fn train_from_corpus_files(files: Vec<PathBuf>) -> Result<ProfileSet> {
	if files.is_empty() {
		return Ok(ProfileSet::default());
	}

	let workers = num_cpus::get().clamp(1, files.len());
	let chunk_size = files.len().div_ceil(workers);

	let (tx, rx) = mpsc::channel();
	let indexed: Vec<(usize, PathBuf)> = files.into_iter().enumerate().collect();
	for chunk in indexed.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk = chunk.to_vec();

		thread::spawn(move || {
			for (index, path) in chunk {
				// The receiver outlives every worker, a failed send cannot happen
				let _ = tx.send((index, profile_from_corpus(&path)));
			}
		});
	}
	drop(tx);

	let mut results: Vec<(usize, Result<Profile>)> = rx.iter().collect();
	results.sort_by_key(|(index, _)| *index);

	let profiles = results.into_iter().map(|(_, profile)| profile).collect::<Result<Vec<_>>>()?;
	info!("trained {} profiles from corpora", profiles.len());
	Ok(ProfileSet::new(profiles))
}

fn training_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
	let files = list_files(dir, extension)?;
	if files.is_empty() {
		return Err(DetectError::EmptyTrainingSet { dir: dir.to_path_buf(), extension: extension.to_owned() });
	}
	Ok(files)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;
	use crate::model::profile::LIMIT;

	#[test]
	fn frequency_list_skips_counts_and_blank_lines() {
		let content = "_\t 20326\ne\t 6617\n12\t 40\n\t 7\n\n t\t 5\nth\t 3\n";
		let ngrams = parse_frequency_list(content);

		assert_eq!(ngrams.len(), 3);
		assert_eq!(ngrams["_"], 1);
		assert_eq!(ngrams["e"], 2);
		assert_eq!(ngrams["th"], 3);
	}

	#[test]
	fn repeated_ngram_keeps_later_rank() {
		let ngrams = parse_frequency_list("ab\t9\ncd\t8\nab\t7\n");
		assert_eq!(ngrams["ab"], 3);
		assert_eq!(ngrams["cd"], 2);
	}

	#[test]
	fn line_without_tab_is_a_whole_ngram() {
		assert_eq!(parse_frequency_list("xyz\n")["xyz"], 1);
	}

	#[test]
	fn trains_frequency_lists_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("german.lm"), "en\t 10\ner\t 9\n").unwrap();
		fs::write(dir.path().join("english-utf8.lm"), "th\t 10\nhe\t 9\n").unwrap();

		let set = train_from_frequency_lists(dir.path()).unwrap();
		assert_eq!(set.names(), ["english", "german"]);
		assert_eq!(set.profiles()[0].rank("he"), Some(2));
	}

	#[test]
	fn empty_directory_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = train_from_corpora(dir.path()).unwrap_err();
		assert!(matches!(err, DetectError::EmptyTrainingSet { .. }));
	}

	#[test]
	fn corpus_profile_is_truncated() {
		let dir = tempfile::tempdir().unwrap();
		// Many distinct words give far more than LIMIT + 2 distinct n-grams
		let text: String = (0..3000u32)
			.map(|i| {
				let word: String = i.to_string().chars().map(|d| (b'a' + d as u8 - b'0') as char).collect();
				format!("x{word}y\n")
			})
			.collect();
		fs::write(dir.path().join("xx-utf8.txt"), text).unwrap();

		let set = train_from_corpora(dir.path()).unwrap();
		assert_eq!(set.names(), ["xx"]);
		assert_eq!(set.profiles()[0].len(), LIMIT + 2);
	}

	#[test]
	fn corpus_training_matches_direct_ranking() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("fr.txt"), "le renard\nbrun le renard\n").unwrap();
		fs::write(dir.path().join("en.txt"), "the quick\nbrown fox the quick\n").unwrap();

		let set = train_from_corpora(dir.path()).unwrap();
		assert_eq!(set.names(), ["en", "fr"]);

		let mut counter = NgramCounter::new();
		counter.add_text("the quick brown fox the quick");
		assert_eq!(set.profiles()[0], Profile::from_counter("en", counter));
	}

	#[test]
	fn non_utf8_corpus_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("de.txt"), [b'G', b'r', 0xfc, b'n']).unwrap();

		assert!(matches!(train_from_corpora(dir.path()), Err(DetectError::Encoding { .. })));
	}
}
