//! Sentiment ratio math
//!
//! Per-backend ratio is `positive / negative`. A backend is excluded from the
//! aggregate when either query failed or when both counts are zero (0/0).
//! `x / 0` with `x > 0` is `+inf` and stays included.

use super::outcome::BackendOutcome;
use serde::{Deserialize, Serialize};

/// Why a backend did not contribute to the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    PositiveFailed,
    NegativeFailed,
    BothFailed,
    /// Both queries succeeded with zero hits
    NoHits,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ExclusionReason::PositiveFailed => "positive query failed",
            ExclusionReason::NegativeFailed => "negative query failed",
            ExclusionReason::BothFailed => "both queries failed",
            ExclusionReason::NoHits => "no hits for either polarity",
        };
        write!(f, "{}", text)
    }
}

/// Ratio for one backend, or the reason it was left out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum BackendRatio {
    Included(#[serde(with = "ratio_serde")] f64),
    Excluded(ExclusionReason),
}

impl BackendRatio {
    /// Derive the ratio from a pair of outcomes
    pub fn from_outcomes(positive: &BackendOutcome, negative: &BackendOutcome) -> Self {
        match (positive.hits(), negative.hits()) {
            (None, None) => BackendRatio::Excluded(ExclusionReason::BothFailed),
            (None, Some(_)) => BackendRatio::Excluded(ExclusionReason::PositiveFailed),
            (Some(_), None) => BackendRatio::Excluded(ExclusionReason::NegativeFailed),
            (Some(0), Some(0)) => BackendRatio::Excluded(ExclusionReason::NoHits),
            (Some(_), Some(0)) => BackendRatio::Included(f64::INFINITY),
            (Some(pos), Some(neg)) => BackendRatio::Included(pos as f64 / neg as f64),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            BackendRatio::Included(ratio) => Some(*ratio),
            BackendRatio::Excluded(_) => None,
        }
    }

    pub fn is_included(&self) -> bool {
        matches!(self, BackendRatio::Included(_))
    }
}

impl std::fmt::Display for BackendRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendRatio::Included(ratio) => write!(f, "{}", ratio),
            BackendRatio::Excluded(reason) => write!(f, "excluded ({})", reason),
        }
    }
}

/// Serde for ratios that may be `+inf`, which JSON has no number for.
/// Infinity is written as the string `"inf"`; finite ratios stay numbers.
pub(crate) mod ratio_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITY: &str = "inf";

    pub fn serialize<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *ratio == f64::INFINITY {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_f64(*ratio)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(ratio) => Ok(ratio),
            Repr::Text(text) if text == INFINITY => Ok(f64::INFINITY),
            Repr::Text(text) => Err(D::Error::custom(format!("invalid ratio: {text}"))),
        }
    }
}

/// Mean of the included ratios with the number of contributors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateRatio {
    pub ratio: f64,
    pub included: usize,
}

impl AggregateRatio {
    /// Average the included ratios.
    ///
    /// Returns `None` when nothing was included, rather than a 0/0 ratio.
    pub fn from_ratios<'a>(ratios: impl IntoIterator<Item = &'a BackendRatio>) -> Option<Self> {
        let (sum, included) = ratios
            .into_iter()
            .filter_map(BackendRatio::value)
            .fold((0.0_f64, 0_usize), |(sum, n), r| (sum + r, n + 1));

        if included == 0 {
            None
        } else {
            Some(Self {
                ratio: sum / included as f64,
                included,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::outcome::FailureReason;

    fn hits(n: u64) -> BackendOutcome {
        BackendOutcome::Hits(n)
    }

    #[test]
    fn test_simple_ratio() {
        assert_eq!(
            BackendRatio::from_outcomes(&hits(300), &hits(100)),
            BackendRatio::Included(3.0)
        );
    }

    #[test]
    fn test_zero_negative_is_infinite() {
        let ratio = BackendRatio::from_outcomes(&hits(5), &hits(0));
        assert_eq!(ratio.value(), Some(f64::INFINITY));
    }

    #[test]
    fn test_infinite_ratio_round_trips_through_json() {
        let ratio = BackendRatio::Included(f64::INFINITY);
        let json = serde_json::to_value(ratio).unwrap();
        assert_eq!(json["value"], "inf");
        assert_eq!(serde_json::from_value::<BackendRatio>(json).unwrap(), ratio);

        let bad = serde_json::json!({ "status": "included", "value": "lots" });
        assert!(serde_json::from_value::<BackendRatio>(bad).is_err());
    }

    #[test]
    fn test_zero_over_zero_is_excluded() {
        assert_eq!(
            BackendRatio::from_outcomes(&hits(0), &hits(0)),
            BackendRatio::Excluded(ExclusionReason::NoHits)
        );
    }

    #[test]
    fn test_zero_positive_is_included() {
        assert_eq!(
            BackendRatio::from_outcomes(&hits(0), &hits(10)),
            BackendRatio::Included(0.0)
        );
    }

    #[test]
    fn test_failures_are_excluded() {
        let failed = BackendOutcome::failed("boom");
        assert_eq!(
            BackendRatio::from_outcomes(&failed, &hits(1)),
            BackendRatio::Excluded(ExclusionReason::PositiveFailed)
        );
        assert_eq!(
            BackendRatio::from_outcomes(&hits(1), &BackendOutcome::Failed(FailureReason::TimedOut)),
            BackendRatio::Excluded(ExclusionReason::NegativeFailed)
        );
        assert_eq!(
            BackendRatio::from_outcomes(&failed, &failed),
            BackendRatio::Excluded(ExclusionReason::BothFailed)
        );
    }

    #[test]
    fn test_aggregate_mean() {
        let ratios = [
            BackendRatio::Included(2.0),
            BackendRatio::Excluded(ExclusionReason::NegativeFailed),
            BackendRatio::Included(0.5),
        ];
        let aggregate = AggregateRatio::from_ratios(&ratios).unwrap();
        assert_eq!(aggregate.ratio, 1.25);
        assert_eq!(aggregate.included, 2);
    }

    #[test]
    fn test_aggregate_none_when_all_excluded() {
        let ratios = [
            BackendRatio::Excluded(ExclusionReason::BothFailed),
            BackendRatio::Excluded(ExclusionReason::NoHits),
        ];
        assert!(AggregateRatio::from_ratios(&ratios).is_none());
        assert!(AggregateRatio::from_ratios(std::iter::empty()).is_none());
    }
}
