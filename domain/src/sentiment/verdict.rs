//! Human-readable verdict for an aggregate ratio

use serde::{Deserialize, Serialize};

/// Ratios beyond these bounds are reported as "hard"
const HARD_UPPER: f64 = 2.0;
const HARD_LOWER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Rocks,
    Sucks,
    Neutral,
}

/// What the internet thinks of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub sentiment: Sentiment,
    pub hard: bool,
}

impl Verdict {
    /// Classify a positive/negative ratio
    ///
    /// ```
    /// use srom_domain::{Sentiment, Verdict};
    ///
    /// let verdict = Verdict::from_ratio(3.0);
    /// assert_eq!(verdict.sentiment, Sentiment::Rocks);
    /// assert!(verdict.hard);
    /// ```
    pub fn from_ratio(ratio: f64) -> Self {
        let sentiment = if ratio > 1.0 {
            Sentiment::Rocks
        } else if ratio < 1.0 {
            Sentiment::Sucks
        } else {
            Sentiment::Neutral
        };
        Self {
            sentiment,
            hard: ratio > HARD_UPPER || ratio < HARD_LOWER,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sentiment {
            Sentiment::Rocks => write!(f, "ROCKS")?,
            Sentiment::Sucks => write!(f, "SUCKS")?,
            Sentiment::Neutral => return write!(f, "neither sucks nor rocks"),
        }
        if self.hard {
            write!(f, " HARD")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mild_verdicts() {
        assert_eq!(Verdict::from_ratio(1.5).to_string(), "ROCKS");
        assert_eq!(Verdict::from_ratio(0.8).to_string(), "SUCKS");
    }

    #[test]
    fn test_hard_verdicts() {
        assert_eq!(Verdict::from_ratio(2.5).to_string(), "ROCKS HARD");
        assert_eq!(Verdict::from_ratio(0.1).to_string(), "SUCKS HARD");
        assert_eq!(Verdict::from_ratio(f64::INFINITY).to_string(), "ROCKS HARD");
    }

    #[test]
    fn test_neutral() {
        let verdict = Verdict::from_ratio(1.0);
        assert_eq!(verdict.sentiment, Sentiment::Neutral);
        assert_eq!(verdict.to_string(), "neither sucks nor rocks");
    }

    #[test]
    fn test_boundaries_are_not_hard() {
        assert!(!Verdict::from_ratio(2.0).hard);
        assert!(!Verdict::from_ratio(0.5).hard);
    }
}
