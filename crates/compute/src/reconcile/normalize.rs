use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("parenthetical pattern"));
static NOT_ALNUM_OR_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("alnum pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Canonical matching key for a country name.
///
/// Steps, in this order:
/// 1. Unicode compatibility decomposition (NFKD), splitting accents off their letters
/// 2. remove parenthesized segments, e.g. `"Korea (South)"` -> `"Korea "`
/// 3. drop everything but ASCII letters, digits and spaces (accents go here)
/// 4. collapse whitespace runs and trim
/// 5. lowercase
///
/// The result is ASCII and idempotent under this function. Keys are only
/// compared, never displayed.
pub fn normalize(raw: &str) -> String {
    let decomposed: String = raw.nfkd().collect();
    let without_parens = PARENTHETICAL.replace_all(&decomposed, "");
    let alnum = NOT_ALNUM_OR_SPACE.replace_all(&without_parens, "");
    let collapsed = WHITESPACE_RUN.replace_all(&alnum, " ");
    collapsed.trim().to_ascii_lowercase()
}
