//! Word boundary constraints.
//!
//! A boundary is "no letter or digit next to the match". The checks are
//! negative look-arounds, so they also hold at the start and end of the
//! content and never consume the neighbouring character.

const NOT_AFTER_WORD_CHAR: &str = r"(?<![\p{L}\p{N}])";
const NOT_BEFORE_WORD_CHAR: &str = r"(?![\p{L}\p{N}])";

/// Wraps `pattern` with the boundary checks `word` asks for.
pub fn apply(pattern: &str, word: &crate::word::Word) -> String {
    let mut out = String::with_capacity(pattern.len() + 40);
    if word.must_start_word() {
        out.push_str(NOT_AFTER_WORD_CHAR);
    }
    out.push_str(pattern);
    if word.must_end_word() {
        out.push_str(NOT_BEFORE_WORD_CHAR);
    }
    out
}
