//! Insight stage: classify trend and momentum from the latest processed row.
//!
//! Stateless; every call re-reads the latest row and recomputes. A missing
//! indicator makes every comparison against it false, so early rows fall
//! through to the mixed/neutral branches.

use cuprum_warehouse::{PriceStore, StoreError};
use serde::Serialize;

use crate::transform::PROCESSED_TABLE;

const MOMENTUM_GATE: f64 = 0.05;

pub const NO_DATA_MESSAGE: &str = "No data available.";

/// Trend classification over close vs. its moving averages.
///
/// The branch set does not cover every ordering of the three values; the
/// leftover configurations all read as sideways/mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSignal {
    ClearUptrend,
    ClearDowntrend,
    RecoveryPossible,
    SidewaysMixed,
}

impl TrendSignal {
    /// First match wins, in fixed priority order.
    pub fn classify(close: Option<f64>, ma50: Option<f64>, ma200: Option<f64>) -> Self {
        if gt(close, ma50) && gt(ma50, ma200) {
            Self::ClearUptrend
        } else if lt(close, ma50) && lt(ma50, ma200) {
            Self::ClearDowntrend
        } else if gt(close, ma50) && lt(close, ma200) {
            Self::RecoveryPossible
        } else {
            Self::SidewaysMixed
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClearUptrend => "Trend: CLEAR UPTREND (Price > MA50 > MA200)",
            Self::ClearDowntrend => "Trend: CLEAR DOWNTREND (Price < MA50 < MA200)",
            Self::RecoveryPossible => "Trend: RECOVERY POSSIBLE (Price > MA50, but < MA200)",
            Self::SidewaysMixed => "Trend: SIDEWAYS / MIXED",
        }
    }
}

/// Momentum classification over the 7-day return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentumSignal {
    StrongGreen,
    StrongRed,
    Neutral { return_7d: Option<f64> },
}

impl MomentumSignal {
    pub fn classify(return_7d: Option<f64>) -> Self {
        match return_7d {
            Some(value) if value > MOMENTUM_GATE => Self::StrongGreen,
            Some(value) if value < -MOMENTUM_GATE => Self::StrongRed,
            other => Self::Neutral { return_7d: other },
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::StrongGreen => String::from("Momentum: STRONG GREEN (7d return > 5%)"),
            Self::StrongRed => String::from("Momentum: STRONG RED (7d return < -5%)"),
            Self::Neutral {
                return_7d: Some(value),
            } => format!("Momentum: Neutral (7d return: {:.1}%)", value * 100.0),
            Self::Neutral { return_7d: None } => {
                String::from("Momentum: Neutral (7d return: n/a)")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    NoData,
    Price,
    Trend,
    Momentum,
}

/// One human-readable statement about the latest processed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub text: String,
}

/// Read the latest processed row and emit the ordered insight statements.
///
/// An empty table yields the single no-data sentinel, not an error. A
/// missing table propagates as `StoreError::TableMissing`; callers map it
/// to "pipeline not yet run".
pub fn run_insights(store: &PriceStore) -> Result<Vec<Insight>, StoreError> {
    let Some(latest) = store.read_latest(PROCESSED_TABLE)? else {
        return Ok(vec![Insight {
            kind: InsightKind::NoData,
            text: String::from(NO_DATA_MESSAGE),
        }]);
    };

    let close = latest.value("close");
    let ma50 = latest.value("ma50");
    let ma200 = latest.value("ma200");
    let return_7d = latest.value("return_7d");

    let price_text = match close {
        Some(close) => format!("Current Price: {close:.2}"),
        None => String::from("Current Price: n/a"),
    };

    Ok(vec![
        Insight {
            kind: InsightKind::Price,
            text: price_text,
        },
        Insight {
            kind: InsightKind::Trend,
            text: TrendSignal::classify(close, ma50, ma200).as_str().to_owned(),
        },
        Insight {
            kind: InsightKind::Momentum,
            text: MomentumSignal::classify(return_7d).render(),
        },
    ])
}

fn gt(left: Option<f64>, right: Option<f64>) -> bool {
    matches!((left, right), (Some(left), Some(right)) if left > right)
}

fn lt(left: Option<f64>, right: Option<f64>) -> bool {
    matches!((left, right), (Some(left), Some(right)) if left < right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptrend_requires_both_strict_inequalities() {
        let signal = TrendSignal::classify(Some(5.0), Some(4.8), Some(4.5));
        assert_eq!(signal, TrendSignal::ClearUptrend);
    }

    #[test]
    fn equal_values_fall_through_to_sideways() {
        let signal = TrendSignal::classify(Some(5.0), Some(5.0), Some(5.0));
        assert_eq!(signal, TrendSignal::SidewaysMixed);
    }

    #[test]
    fn below_short_above_long_is_sideways_not_a_fifth_branch() {
        // close < ma50 but close > ma200: deliberately unclassified
        let signal = TrendSignal::classify(Some(5.0), Some(5.2), Some(4.8));
        assert_eq!(signal, TrendSignal::SidewaysMixed);
    }

    #[test]
    fn missing_indicators_compare_false() {
        assert_eq!(
            TrendSignal::classify(Some(5.0), None, None),
            TrendSignal::SidewaysMixed
        );
        assert_eq!(
            TrendSignal::classify(Some(5.0), Some(4.8), None),
            TrendSignal::SidewaysMixed
        );
    }

    #[test]
    fn momentum_gate_is_strict() {
        assert_eq!(
            MomentumSignal::classify(Some(0.05)),
            MomentumSignal::Neutral {
                return_7d: Some(0.05)
            }
        );
        assert_eq!(
            MomentumSignal::classify(Some(0.051)),
            MomentumSignal::StrongGreen
        );
        assert_eq!(
            MomentumSignal::classify(Some(-0.051)),
            MomentumSignal::StrongRed
        );
    }

    #[test]
    fn neutral_renders_the_literal_percentage() {
        let rendered = MomentumSignal::classify(Some(0.0234)).render();
        assert_eq!(rendered, "Momentum: Neutral (7d return: 2.3%)");
        let rendered = MomentumSignal::classify(None).render();
        assert_eq!(rendered, "Momentum: Neutral (7d return: n/a)");
    }
}
