//! Parsing of caller-supplied species references.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

#[allow(clippy::unwrap_used, reason = "static pattern is valid")]
static CANONICAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

/// A species reference as given by a tree-linking caller: either a canonical
/// id or a free-text scientific name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesReference {
    Id(Uuid),
    Name(String),
}

impl SpeciesReference {
    /// Parses a reference. Blank input and the literal `null` yield `None`
    /// (no species linked).
    ///
    /// Only the 36-character hyphenated hex form counts as an id; anything
    /// else is treated as a name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return None;
        }
        if CANONICAL_ID_RE.is_match(trimmed) {
            if let Ok(id) = Uuid::parse_str(trimmed) {
                return Some(Self::Id(id));
            }
        }
        Some(Self::Name(trimmed.to_owned()))
    }
}
