use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ngram::NgramCounter;

/// Maximum rank depth kept in a profile, also the penalty for a missing n-gram.
pub const LIMIT: usize = 1500;

/// Ranked n-gram fingerprint of a language or of a text sample.
///
/// Rank 1 is the most frequent n-gram. A profile is built once and never
/// mutated afterwards, which makes a set of reference profiles safe to share
/// between threads.
///
/// # Invariants
/// - At most `LIMIT + 2` entries when built from counts
/// - Ranks are >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Profile {
	/// Language code, empty for an ephemeral input profile
	name: String,

	/// Mapping from n-gram to its 1-based frequency rank
	ngrams: HashMap<String, usize>,
}

impl Profile {
	/// Builds the ephemeral (unnamed) profile of a text sample.
	pub fn from_text(text: &str) -> Self {
		let mut counter = NgramCounter::new();
		counter.add_text(text);
		Self::from_counter("", counter)
	}

	/// Ranks the counts accumulated by `counter`.
	pub fn from_counter(name: &str, counter: NgramCounter) -> Self {
		Self::from_counts(name, counter.into_counts())
	}

	/// Ranks raw n-gram counts.
	pub fn from_counts(name: &str, counts: HashMap<String, usize>) -> Self {
		Self { name: name.to_owned(), ngrams: assign_ranks(counts) }
	}

	/// Wraps an already ranked mapping, such as one read from a frequency list.
	pub fn from_ranks(name: &str, ngrams: HashMap<String, usize>) -> Self {
		Self { name: name.to_owned(), ngrams }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn ngrams(&self) -> &HashMap<String, usize> {
		&self.ngrams
	}

	/// Rank of `ngram`, `None` when it is not part of the profile.
	pub fn rank(&self, ngram: &str) -> Option<usize> {
		self.ngrams.get(ngram).copied()
	}

	pub fn len(&self) -> usize {
		self.ngrams.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ngrams.is_empty()
	}
}

/// Converts a frequency tally into ranks.
///
/// Entries are sorted by count descending, equal counts by n-gram ascending
/// so that training is reproducible. Ranks are assigned from 1 and the walk
/// stops right after the 0-based index `LIMIT + 1` has been ranked, so at most
/// `LIMIT + 2` entries are kept.
pub fn assign_ranks(counts: HashMap<String, usize>) -> HashMap<String, usize> {
	let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
	sorted.sort_unstable_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));

	let mut ranks = HashMap::with_capacity(sorted.len().min(LIMIT + 2));
	for (i, (ngram, _)) in sorted.into_iter().enumerate() {
		ranks.insert(ngram, i + 1);
		if i > LIMIT {
			break;
		}
	}
	ranks
}

#[cfg(test)]
mod tests {
	use super::*;

	fn counts(entries: &[(&str, usize)]) -> HashMap<String, usize> {
		entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
	}

	#[test]
	fn most_frequent_gets_rank_one() {
		let ranks = assign_ranks(counts(&[("ab", 3), ("cd", 10), ("ef", 1)]));
		assert_eq!(ranks["cd"], 1);
		assert_eq!(ranks["ab"], 2);
		assert_eq!(ranks["ef"], 3);
	}

	#[test]
	fn equal_counts_are_ranked_lexicographically() {
		let ranks = assign_ranks(counts(&[("zz", 2), ("aa", 2), ("mm", 2), ("top", 5)]));
		assert_eq!(ranks["top"], 1);
		assert_eq!(ranks["aa"], 2);
		assert_eq!(ranks["mm"], 3);
		assert_eq!(ranks["zz"], 4);
	}

	#[test]
	fn keeps_limit_plus_two_entries() {
		let many: HashMap<String, usize> = (0..2 * LIMIT).map(|i| (format!("g{i:05}"), 2 * LIMIT - i)).collect();
		let ranks = assign_ranks(many);

		assert_eq!(ranks.len(), LIMIT + 2);
		assert_eq!(ranks["g00000"], 1);
		assert_eq!(ranks[&format!("g{:05}", LIMIT + 1)], LIMIT + 2);
		assert!(!ranks.contains_key(&format!("g{:05}", LIMIT + 2)));
		assert_eq!(ranks.values().max(), Some(&(LIMIT + 2)));
	}

	#[test]
	fn small_tallies_are_kept_whole() {
		let ranks = assign_ranks(counts(&[("ab", 1), ("bc", 1)]));
		assert_eq!(ranks.len(), 2);
		assert!(assign_ranks(HashMap::new()).is_empty());
	}

	#[test]
	fn profile_from_text_is_unnamed_and_ranked() {
		let profile = Profile::from_text("the quick the");
		assert_eq!(profile.name(), "");
		// "the" occurs twice, "_th" is among the most frequent n-grams
		let rank = profile.rank("_th").unwrap();
		assert!(rank <= 8, "rank of _th was {rank}");
		assert_eq!(profile.rank("xyz"), None);
	}

	#[test]
	fn profile_of_empty_text_is_empty() {
		assert!(Profile::from_text("").is_empty());
		assert!(Profile::from_text("1 2 3 !").is_empty());
	}
}
