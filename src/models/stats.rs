//! Derived statistics returned by the views.

use serde::{Deserialize, Serialize};

use super::table::ColumnKind;

/// A batsman and their aggregated runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunScorer {
    pub batsman: String,
    pub runs: i64,
}

/// A team and the number of matches it won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWins {
    pub team: String,
    pub wins: u32,
}

/// A category label with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u32,
}

/// Matches won by `winner` after the toss winner chose `decision`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TossOutcome {
    pub decision: String,
    pub winner: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverAverage {
    pub over: i64,
    pub average_runs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInsights {
    pub total_matches: u32,
    pub most_successful_team: Option<String>,
    pub top_batsman: Option<RunScorer>,
}

/// Batting summary for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: String,
    pub total_runs: i64,
    pub balls_faced: u32,
    pub dismissals: u32,
    /// Runs per dismissal; equals total runs when never dismissed.
    pub average: f64,
    /// Runs per 100 balls faced.
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub opponent: String,
    pub wins: u32,
}

/// Win record for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: String,
    pub matches_played: u32,
    pub wins: u32,
    /// Win percentage (0.0 to 100.0)
    pub win_percentage: f64,
    pub head_to_head: Vec<HeadToHead>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season: String,
    pub total_matches: u32,
    pub most_successful_team: Option<String>,
    pub top_run_scorer: Option<RunScorer>,
}

/// Bowling figures for one bowler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerSummary {
    pub bowler: String,
    pub wickets: u32,
    pub balls: u32,
    pub runs_conceded: i64,
    /// Whole overs plus the fraction of an over for remaining balls.
    pub overs: f64,
    pub economy: f64,
    /// Most wickets taken in a single match.
    pub best_bowling: Option<u32>,
}

/// Match result breakdown. A count is `None` when its column is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub won_by_runs: Option<u32>,
    pub won_by_wickets: Option<u32>,
    pub ties: Option<u32>,
    pub no_results: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRuns {
    pub match_id: String,
    pub runs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDistribution {
    pub team: String,
    pub season: Option<String>,
    pub matches: Vec<MatchRuns>,
}

// ── Dataset info ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

/// Shape of an uploaded dataset plus a preview of the matches table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: String,
    pub matches: TableInfo,
    pub deliveries: TableInfo,
    pub preview_columns: Vec<String>,
    pub preview: Vec<Vec<String>>,
}
