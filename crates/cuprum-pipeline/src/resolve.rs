//! Canonical price-column resolution.
//!
//! An ordered list of strategies, each either naming a column or declaring
//! no match, composed first-match-wins. The precedence is fixed: an exact
//! `close`, then an exact `adj_close`, then the shortest close-like name
//! that avoids adjusted columns when it can.

use serde::Serialize;

/// One resolution strategy, applied against the normalized column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionRule {
    ExactClose,
    ExactAdjClose,
    ShortestCloseLike,
}

impl ResolutionRule {
    pub const ALL: [Self; 3] = [Self::ExactClose, Self::ExactAdjClose, Self::ShortestCloseLike];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactClose => "exact_close",
            Self::ExactAdjClose => "exact_adj_close",
            Self::ShortestCloseLike => "shortest_close_like",
        }
    }

    fn apply(self, names: &[String]) -> Option<String> {
        match self {
            Self::ExactClose => names.iter().find(|name| *name == "close").cloned(),
            Self::ExactAdjClose => names.iter().find(|name| *name == "adj_close").cloned(),
            Self::ShortestCloseLike => shortest_close_like(names),
        }
    }
}

/// Outcome of a successful resolution: the winning column and the rule that
/// selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub column: String,
    pub rule: ResolutionRule,
}

/// Resolve the canonical price column, or `None` when no name contains
/// `close` at all.
pub fn resolve_price_column(names: &[String]) -> Option<Resolution> {
    ResolutionRule::ALL.iter().find_map(|rule| {
        rule.apply(names).map(|column| Resolution {
            column,
            rule: *rule,
        })
    })
}

fn shortest_close_like(names: &[String]) -> Option<String> {
    let close_like: Vec<(usize, &String)> = names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_ascii_lowercase().contains("close"))
        .collect();

    let non_adjusted: Vec<(usize, &String)> = close_like
        .iter()
        .copied()
        .filter(|(_, name)| !name.to_ascii_lowercase().contains("adj"))
        .collect();

    let candidates = if non_adjusted.is_empty() {
        close_like
    } else {
        non_adjusted
    };

    // Shortest name wins; original column order breaks length ties
    candidates
        .into_iter()
        .min_by_key(|(index, name)| (name.len(), *index))
        .map(|(_, name)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(inputs: &[&str]) -> Vec<String> {
        inputs.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn exact_close_beats_everything() {
        let resolution =
            resolve_price_column(&names(&["adj_close", "close", "close_hg"])).expect("must match");
        assert_eq!(resolution.column, "close");
        assert_eq!(resolution.rule, ResolutionRule::ExactClose);
    }

    #[test]
    fn exact_adj_close_is_the_second_choice() {
        let resolution =
            resolve_price_column(&names(&["adj_close", "close_hg"])).expect("must match");
        assert_eq!(resolution.column, "adj_close");
        assert_eq!(resolution.rule, ResolutionRule::ExactAdjClose);
    }

    #[test]
    fn pattern_match_prefers_non_adjusted_then_shortest() {
        let resolution =
            resolve_price_column(&names(&["adj_close_hg", "close_hg_front", "close_hg"]))
                .expect("must match");
        assert_eq!(resolution.column, "close_hg");
        assert_eq!(resolution.rule, ResolutionRule::ShortestCloseLike);
    }

    #[test]
    fn pattern_match_falls_back_to_adjusted_names() {
        let resolution = resolve_price_column(&names(&["adj_close_hg"])).expect("must match");
        assert_eq!(resolution.column, "adj_close_hg");
        assert_eq!(resolution.rule, ResolutionRule::ShortestCloseLike);
    }

    #[test]
    fn length_ties_break_by_original_order() {
        let resolution =
            resolve_price_column(&names(&["close_ab", "close_cd"])).expect("must match");
        assert_eq!(resolution.column, "close_ab");
    }

    #[test]
    fn no_close_substring_is_no_match() {
        assert_eq!(resolve_price_column(&names(&["price", "volume"])), None);
        assert_eq!(resolve_price_column(&[]), None);
    }
}
