//! Text normalization for hero names and player input.
//!
//! Every comparison in the resolver goes through one of three keys:
//!
//! - [`normalize`]: lower-cased, accent-free, dashes and apostrophes unified,
//!   whitespace collapsed. Used for exact and prefix matching.
//! - [`normalize_letters`]: `normalize` with everything outside `[a-z0-9]`
//!   removed ("Anti-Mage" and "anti mage" both become `antimage`).
//! - [`initials`]: first character of every alphanumeric word
//!   ("Queen of Pain" becomes `qop`).
//!
//! None of these fail: empty input gives empty output.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::{canonical_combining_class, is_combining_mark};

/// Canonicalize free text for comparison.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .map(fold_punctuation)
        .filter(|&c| !is_diacritic(c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `normalize`, then keep only ASCII letters and digits.
pub fn normalize_letters(text: &str) -> String {
    normalize(text)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// First character of every `[a-z0-9]+` run of the normalized text.
pub fn initials(text: &str) -> String {
    normalize(text)
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Asset slug derived from a display name: runs of non-alphanumerics become `_`.
pub fn slug(text: &str) -> String {
    let mut out = String::new();
    let mut gap = false;
    for c in normalize(text).chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap {
                out.push('_');
                gap = false;
            }
            out.push(c);
        } else {
            gap = true;
        }
    }
    if gap {
        out.push('_');
    }
    out
}

/// Dash family (U+2010..U+2015, minus sign) to `-`; apostrophe look-alikes to `'`.
fn fold_punctuation(c: char) -> char {
    match c {
        '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
        '\u{2018}' | '\u{2019}' | '`' | '\u{02BC}' | '\u{2044}' => '\'',
        other => other,
    }
}

/// Combining marks plus the spacing accent characters left over after NFD.
fn is_diacritic(c: char) -> bool {
    is_combining_mark(c)
        || canonical_combining_class(c) != 0
        || matches!(c, '^' | '\u{A8}' | '\u{AF}' | '\u{B4}' | '\u{B8}')
        || ('\u{02B0}'..='\u{02FF}').contains(&c)
}
