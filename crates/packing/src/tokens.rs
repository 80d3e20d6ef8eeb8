//! Box/item reference tokens.
//!
//! Users type references like `"A,2,1-3"`: comma separated, with numeric ranges.

use core::cmp::Ordering;

use tradedocs_core::{DomainError, DomainResult};

/// Largest number of references a single `a-b` range may expand to.
pub const MAX_RANGE_SPAN: u64 = 10_000;

/// Split a reference list into tokens, expanding numeric ranges.
///
/// - empty tokens are dropped, the rest are trimmed;
/// - `"a-b"` with both sides purely numeric expands to every integer between
///   them, inclusive, whichever side is larger;
/// - anything else is kept verbatim.
///
/// Duplicates are preserved in emission order.
pub fn parse_tokens(raw: &str) -> DomainResult<Vec<String>> {
    let mut out = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some((start, end)) = numeric_range(token) {
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            if hi - lo >= MAX_RANGE_SPAN {
                return Err(DomainError::validation(format!(
                    "range '{token}' expands to more than {MAX_RANGE_SPAN} references"
                )));
            }
            out.extend((lo..=hi).map(|n| n.to_string()));
            continue;
        }

        out.push(token.to_string());
    }
    Ok(out)
}

fn numeric_range(token: &str) -> Option<(u64, u64)> {
    let (a, b) = token.split_once('-')?;
    let (a, b) = (a.trim(), b.trim());
    if !is_digits(a) || !is_digits(b) {
        return None;
    }
    Some((a.parse().ok()?, b.parse().ok()?))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Sort key that orders purely numeric references by value and everything else
/// as text. Numbers sort before text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaturalKey {
    Number {
        /// Digits without leading zeros (`"0"` for zero).
        digits: String,
        raw: String,
    },
    Text(String),
}

impl NaturalKey {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        if is_digits(raw) {
            let stripped = raw.trim_start_matches('0');
            let digits = if stripped.is_empty() { "0" } else { stripped };
            Self::Number {
                digits: digits.to_string(),
                raw: raw.to_string(),
            }
        } else {
            Self::Text(raw.to_string())
        }
    }
}

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                NaturalKey::Number { digits: a, raw: ra },
                NaturalKey::Number { digits: b, raw: rb },
            ) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| ra.cmp(rb)),
            (NaturalKey::Number { .. }, NaturalKey::Text(_)) => Ordering::Less,
            (NaturalKey::Text(_), NaturalKey::Number { .. }) => Ordering::Greater,
            (NaturalKey::Text(a), NaturalKey::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two references by [`NaturalKey`].
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}
