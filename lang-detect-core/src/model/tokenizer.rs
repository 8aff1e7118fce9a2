use std::sync::LazyLock;

use regex::Regex;

/// Separator class: any run of non-word characters, underscores or digits.
///
/// `\W` and `\d` are Unicode-aware, so letters of any script stay inside
/// tokens while punctuation, whitespace and every kind of digit split them.
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
	// Should not panic, the pattern is a literal
	Regex::new(r"[\W_\d]+").unwrap()
});

/// Splits `text` into word-like tokens.
///
/// Empty pieces produced by leading, trailing or adjacent separators are
/// dropped. No case folding or normalization is applied.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
	SEPARATOR.split(text).filter(|token| !token.is_empty())
}
