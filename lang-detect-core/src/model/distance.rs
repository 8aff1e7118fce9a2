use super::profile::{LIMIT, Profile};

/// Rank-order ("out-of-place") distance between an input and a reference profile.
///
/// Walks the reference n-grams: a shared n-gram adds the absolute rank
/// difference, a reference n-gram missing from the input adds `LIMIT`.
/// N-grams found only in the input add nothing, so the measure is not
/// symmetric and the argument order matters.
pub fn distance(input: &Profile, reference: &Profile) -> u64 {
	reference
		.ngrams()
		.iter()
		.map(|(ngram, &rank)| match input.rank(ngram) {
			Some(input_rank) => rank.abs_diff(input_rank) as u64,
			None => LIMIT as u64,
		})
		.sum()
}
