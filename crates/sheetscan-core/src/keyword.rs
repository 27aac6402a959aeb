//! Keyword normalization and matching.

use std::fmt;

/// A search keyword, normalized once at run start and reused for both macro
/// and formula matching.
///
/// Normalization lower-cases the raw keyword and strips a single leading
/// `=`, so `=SUM` and `sum` describe the same search. Matching is plain
/// substring containment on the lower-cased candidate text; no formula
/// parsing or semantic evaluation is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(String);

impl Keyword {
    /// Normalize a raw keyword.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let stripped = lowered.strip_prefix('=').unwrap_or(&lowered);
        Self(stripped.to_string())
    }

    /// The normalized keyword text (also the target folder name).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring containment against `candidate`.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.to_lowercase().contains(&self.0)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
