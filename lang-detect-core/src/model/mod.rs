//! Profile model of the Cavnar–Trenkle n-gram language detector.
//!
//! The detection pipeline is:
//! - Tokenizer: raw text to word-like tokens
//! - `NgramCounter`: padded 2 to 5 character n-grams and their counts
//! - `assign_ranks`: counts to frequency ranks, truncated to `LIMIT`
//! - `distance`: rank-order distance between two profiles
//! - `LanguageDetector`: nearest reference profile for a text

/// Splits raw text into word-like tokens.
pub mod tokenizer;

/// Padded n-gram extraction and occurrence counting.
pub mod ngram;

/// Ranked n-gram profiles and the rank assignment.
pub mod profile;

/// Asymmetric rank-order distance between an input and a reference profile.
pub mod distance;

/// Nearest-profile selection over an ordered set of references.
pub mod detector;
