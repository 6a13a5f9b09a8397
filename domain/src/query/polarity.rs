//! Sentiment polarity of a query

use serde::{Deserialize, Serialize};

/// Which side of the sentiment a query measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Favorable phrases ("%v rules")
    Positive,
    /// Unfavorable phrases ("%v sucks")
    Negative,
}

impl Polarity {
    /// Both polarities, in dispatch order
    pub const ALL: [Polarity; 2] = [Polarity::Positive, Polarity::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
