//! Statistics calculation engine.
//!
//! Every view is a pure function of a cleaned [`Dataset`] and at most one
//! filter value:
//! - Top run scorers and per-player batting summaries
//! - Team win counts, win percentage and head-to-head records
//! - Season summaries and per-match run distributions
//! - Bowling figures
//! - Match outcome tallies
//!
//! Views whose optional columns are absent return a [`StatsError`] that
//! callers show as an informational message instead of the view.
//!
//! [`Dataset`]: crate::models::Dataset

pub mod batting;
pub mod bowling;
pub mod outcomes;
pub mod overview;
pub mod seasons;
pub mod teams;

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use thiserror::Error;

use crate::models::{natural_cmp, Table};

pub use batting::*;
pub use bowling::*;
pub use outcomes::*;
pub use overview::*;
pub use seasons::*;
pub use teams::*;

/// Why a view could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("{what} data not available in {table} file.")]
    MissingColumn {
        what: &'static str,
        table: &'static str,
        column: &'static str,
    },

    #[error("No data for selected filters.")]
    NoData,
}

/// A view result as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ready { data: T },
    Unavailable { message: String },
}

impl<T> From<Result<T, StatsError>> for Section<T> {
    fn from(result: Result<T, StatsError>) -> Self {
        match result {
            Ok(data) => Section::Ready { data },
            Err(e) => Section::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl<T> Section<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ready { data } => Some(data),
            Section::Unavailable { .. } => None,
        }
    }
}

/// Fail with [`StatsError::MissingColumn`] on the first absent column.
pub(crate) fn require(
    table: &Table,
    columns: &[&'static str],
    what: &'static str,
    table_name: &'static str,
) -> Result<(), StatsError> {
    match columns.iter().find(|c| !table.has_column(c)) {
        Some(&column) => Err(StatsError::MissingColumn {
            what,
            table: table_name,
            column,
        }),
        None => Ok(()),
    }
}

/// Sum weights per key, keeping keys in order of first appearance.
pub(crate) fn tally<K, I>(items: I) -> Vec<(K, i64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, i64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<(K, i64)> = Vec::new();
    for (key, weight) in items {
        match index.get(&key) {
            Some(&i) => entries[i].1 += weight,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push((key, weight));
            }
        }
    }
    entries
}

/// Sort by weight, largest first. Stable, so ties keep first-appearance order.
pub(crate) fn sort_descending<K>(entries: &mut [(K, i64)]) {
    entries.sort_by(|a, b| b.1.cmp(&a.1));
}

/// Most frequent value; ties go to the smallest value in natural order.
pub(crate) fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let counts = tally(values.into_iter().map(|v| (v, 1)));
    let max = counts.iter().map(|(_, c)| *c).max()?;
    counts
        .into_iter()
        .filter(|(_, c)| *c == max)
        .map(|(v, _)| v)
        .min_by(|a, b| natural_cmp(a, b))
        .map(str::to_string)
}

/// Sorted unique values.
pub(crate) fn sorted_unique<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = tally(values.into_iter().map(|v| (v, 1)))
        .into_iter()
        .map(|(v, _)| v.to_string())
        .collect();
    out.sort_by(|a, b| natural_cmp(a, b));
    out
}

/// Runs per dismissal. Falls back to total runs when never dismissed.
pub fn calculate_average(total_runs: i64, dismissals: u32) -> f64 {
    if dismissals > 0 {
        total_runs as f64 / dismissals as f64
    } else {
        total_runs as f64
    }
}

/// Runs per 100 balls faced.
pub fn calculate_strike_rate(total_runs: i64, balls_faced: u32) -> f64 {
    if balls_faced == 0 {
        0.0
    } else {
        total_runs as f64 / balls_faced as f64 * 100.0
    }
}

/// Win percentage (0.0 to 100.0).
pub fn calculate_win_percentage(wins: u32, matches_played: u32) -> f64 {
    if matches_played == 0 {
        0.0
    } else {
        wins as f64 / matches_played as f64 * 100.0
    }
}

/// Overs bowled as a fractional count: whole overs plus remaining balls / 6.
pub fn overs_from_balls(balls: u32) -> f64 {
    (balls / 6) as f64 + (balls % 6) as f64 / 6.0
}

/// Runs conceded per over.
pub fn calculate_economy(runs_conceded: i64, overs: f64) -> f64 {
    if overs > 0.0 {
        runs_conceded as f64 / overs
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::ingest::load_dataset;
    use crate::models::Dataset;

    pub const MATCHES: &str = "\
id,season,team1,team2,toss_decision,result,winner,win_by_runs,win_by_wickets
1,2017,SRH,RCB,field,normal,SRH,35,0
2,2017,MI,RPS,field,normal,RPS,0,7
3,2017,GL,KKR,field,normal,KKR,0,10
4,2018,RCB,SRH,bat,normal,RCB,15,0
5,2018,KKR,SRH,bat,tie,,0,0
6,2018,MI,RCB,field,no result,,0,0
";

    pub const DELIVERIES: &str = "\
match_id,over,batting_team,bowling_team,batsman,bowler,batsman_runs,total_runs,player_dismissed
1,1,SRH,RCB,Warner,Chahal,4,4,
1,1,SRH,RCB,Warner,Chahal,1,1,
1,1,SRH,RCB,Dhawan,Chahal,0,0,Dhawan
1,2,RCB,SRH,Kohli,Rashid,6,6,
1,2,RCB,SRH,Kohli,Rashid,0,1,
4,1,RCB,SRH,Kohli,Rashid,2,2,
4,1,RCB,SRH,Kohli,Rashid,0,0,Kohli
4,1,RCB,SRH,Gayle,Rashid,0,0,Gayle
4,2,SRH,RCB,Warner,Chahal,6,6,
4,2,SRH,RCB,Warner,Chahal,0,5,
";

    pub fn dataset() -> Dataset {
        load_dataset(MATCHES.as_bytes(), DELIVERIES.as_bytes()).unwrap()
    }

    pub fn dataset_with(matches: &str, deliveries: &str) -> Dataset {
        load_dataset(matches.as_bytes(), deliveries.as_bytes()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_average() {
        assert_eq!(calculate_average(45, 0), 45.0);
        assert_eq!(calculate_average(45, 3), 15.0);
    }

    #[test]
    fn test_calculate_strike_rate() {
        assert_eq!(calculate_strike_rate(10, 0), 0.0);
        assert!((calculate_strike_rate(5, 4) - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_win_percentage() {
        assert_eq!(calculate_win_percentage(3, 0), 0.0);
        assert!((calculate_win_percentage(1, 3) - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_overs_and_economy() {
        let overs = overs_from_balls(7);
        assert!((overs - 1.1667).abs() < 0.001);
        assert!((calculate_economy(10, overs) - 8.57).abs() < 0.01);
        assert_eq!(overs_from_balls(0), 0.0);
        assert_eq!(calculate_economy(10, 0.0), 0.0);
        assert_eq!(overs_from_balls(12), 2.0);
    }

    #[test]
    fn test_tally_keeps_first_appearance() {
        let counts = tally(vec![("b", 1), ("a", 2), ("b", 3)]);
        assert_eq!(counts, vec![("b", 4), ("a", 2)]);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let mut entries = vec![("x", 1), ("y", 5), ("z", 1), ("w", 5)];
        sort_descending(&mut entries);
        assert_eq!(entries, vec![("y", 5), ("w", 5), ("x", 1), ("z", 1)]);
    }

    #[test]
    fn test_mode_breaks_ties_by_natural_order() {
        assert_eq!(mode(["RCB", "KKR", "RCB", "KKR"]), Some("KKR".to_string()));
        assert_eq!(mode(["SRH", "MI", "SRH"]), Some("SRH".to_string()));
        assert_eq!(mode(std::iter::empty()), None);
    }

    #[test]
    fn test_sorted_unique() {
        assert_eq!(sorted_unique(["10", "9", "10"]), vec!["9", "10"]);
    }

    #[test]
    fn test_section_from_result() {
        let ok: Section<u32> = Ok(3).into();
        assert_eq!(ok.data(), Some(&3));

        let err: Section<u32> = Err(StatsError::NoData).into();
        assert_eq!(
            err,
            Section::Unavailable {
                message: "No data for selected filters.".to_string()
            }
        );
    }

    #[test]
    fn test_section_serialization() {
        let section: Section<u32> = Section::Ready { data: 7 };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ready", "data": 7}));
    }

    #[test]
    fn test_missing_column_message() {
        let err = StatsError::MissingColumn {
            what: "Season",
            table: "matches",
            column: "season",
        };
        assert_eq!(err.to_string(), "Season data not available in matches file.");
    }
}
