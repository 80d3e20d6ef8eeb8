use core::fmt;

use serde::{Deserialize, Serialize};

/// Currency assumed for entered amounts, and used when none is given.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Normalized currency code (trimmed, upper-case).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Normalize `code`; blank input is `None`.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        (!code.is_empty()).then(|| Self(code.to_ascii_uppercase()))
    }

    /// First usable code among `candidates`, else [`DEFAULT_CURRENCY`].
    pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        candidates
            .into_iter()
            .flatten()
            .find_map(Self::parse)
            .unwrap_or_else(|| Self(DEFAULT_CURRENCY.to_string()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// How many INR make one unit of this currency.
    ///
    /// Unlisted currencies convert one to one.
    pub fn divisor(&self) -> f64 {
        match self.0.as_str() {
            "USD" => 90.0,
            "DINAR" | "DNR" | "KWD" => 286.0,
            _ => 1.0,
        }
    }

    pub fn is_inr(&self) -> bool {
        self.0 == DEFAULT_CURRENCY
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
