//! Name normalization and ordering helpers.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Dedup key for scientific names: trimmed and lowercased.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Primary collation key: decomposed, diacritics stripped, lowercased.
#[must_use]
pub fn collation_key(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

/// Locale-aware ascending comparison.
///
/// Accents and case only break ties between otherwise equal keys, so
/// `"ébène" < "Eucalyptus"` and `"Dogwood" < "dogwood"`.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| {
        let fold_a: String = a.chars().flat_map(char::to_lowercase).collect();
        let fold_b: String = b.chars().flat_map(char::to_lowercase).collect();
        fold_a.cmp(&fold_b).then_with(|| a.cmp(b))
    })
}
