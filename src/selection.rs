//! Mapping user-entered row numbers back to list positions.
//!
//! Invalid input never fails: it falls back to the first row, and the result
//! says so, so the caller can tell the user.

/// A resolved, zero-based position in a list of results.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The input named a valid row.
    Chosen(usize),
    /// The input was not a valid row number; the first row is used instead.
    Fallback(usize),
}

impl Selection {
    pub fn index(self) -> usize {
        match self {
            Self::Chosen(i) | Self::Fallback(i) => i,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Default text for index prompts.
pub const DEFAULT_CHOICE: &str = "1";

/// Resolve a 1-based row number typed by the user against a list of `len` rows.
///
/// Returns `None` only when there is nothing to select.
pub fn select(input: &str, len: usize) -> Option<Selection> {
    if len == 0 {
        return None;
    }
    let chosen = input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| Selection::Chosen(n - 1));
    Some(chosen.unwrap_or(Selection::Fallback(0)))
}
