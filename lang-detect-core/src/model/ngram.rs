use std::collections::HashMap;

use super::tokenizer::tokenize;

/// Shortest n-gram length extracted from a token.
pub const MIN_N: usize = 2;

/// Longest n-gram length extracted from a token.
pub const MAX_N: usize = 5;

/// Character used to pad tokens before slicing.
pub const PAD_CHAR: char = '_';

/// Accumulates raw n-gram occurrence counts over one or more texts.
///
/// A single counter is shared across all tokens, all n-gram sizes and,
/// during training, all lines of a document. Iteration order is irrelevant
/// until the counts are ranked.
///
/// # Invariants
/// - Every key is 2 to 5 characters long
/// - Every count is >= 1
#[derive(Clone, Debug, Default)]
pub struct NgramCounter {
	counts: HashMap<String, usize>,
}

impl NgramCounter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Tokenizes `text` and counts the n-grams of every token.
	pub fn add_text(&mut self, text: &str) {
		for token in tokenize(text) {
			for n in MIN_N..=MAX_N {
				self.add_token(token, n);
			}
		}
	}

	/// Counts every n-gram of size `n` found in `token`.
	///
	/// Tokens at least `n` characters long are padded as `_token` followed by
	/// `n - 1` underscores, giving `len + n` characters. Shorter tokens are
	/// sliced unpadded and so contribute nothing for this `n`.
	fn add_token(&mut self, token: &str, n: usize) {
		let mut chars: Vec<char> = token.chars().collect();
		if chars.len() >= n {
			chars.insert(0, PAD_CHAR);
			chars.extend(std::iter::repeat_n(PAD_CHAR, n - 1));
		}

		// `windows` yields nothing when the slice is shorter than `n`
		for window in chars.windows(n) {
			let ngram: String = window.iter().collect();
			*self.counts.entry(ngram).or_insert(0) += 1;
		}
	}

	/// Number of distinct n-grams seen so far.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Occurrence count of `ngram`, 0 when never seen.
	pub fn count(&self, ngram: &str) -> usize {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	pub fn into_counts(self) -> HashMap<String, usize> {
		self.counts
	}
}

/// Counts the n-grams of a single text.
pub fn extract(text: &str) -> HashMap<String, usize> {
	let mut counter = NgramCounter::new();
	counter.add_text(text);
	counter.into_counts()
}
