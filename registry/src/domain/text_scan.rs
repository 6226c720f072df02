//! Free-text scanning helpers.

use std::sync::LazyLock;

use regex::Regex;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("literal pattern compiles"));

/// Extract the first integer embedded in free text.
///
/// Returns `None` when the text contains no digits or the number does not
/// fit in an `i64`.
pub fn first_integer(text: &str) -> Option<i64> {
    INTEGER
        .find(text)
        .and_then(|found| found.as_str().parse().ok())
}
