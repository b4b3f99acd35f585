//! Batting views: top run scorers and per-player summaries.

use crate::models::{Dataset, Delivery, PlayerSummary, RunScorer};

use super::{calculate_average, calculate_strike_rate, sort_descending, sorted_unique, tally};

/// Rank batsmen in `deliveries` by runs off the bat, keeping the top `n`.
pub fn rank_scorers<'a>(deliveries: impl IntoIterator<Item = &'a Delivery>, n: usize) -> Vec<RunScorer> {
    let mut totals = tally(
        deliveries
            .into_iter()
            .filter_map(|d| d.batsman.as_deref().map(|b| (b, d.batsman_runs))),
    );
    sort_descending(&mut totals);
    totals
        .into_iter()
        .take(n)
        .map(|(batsman, runs)| RunScorer {
            batsman: batsman.to_string(),
            runs,
        })
        .collect()
}

/// Top `n` run scorers across every delivery.
pub fn top_run_scorers(dataset: &Dataset, n: usize) -> Vec<RunScorer> {
    rank_scorers(&dataset.delivery_records, n)
}

/// Batting summary for one player.
///
/// A player with no deliveries gets zeroed figures.
pub fn player_summary(dataset: &Dataset, player: &str) -> PlayerSummary {
    let faced: Vec<&Delivery> = dataset
        .delivery_records
        .iter()
        .filter(|d| d.batsman.as_deref() == Some(player))
        .collect();

    let total_runs: i64 = faced.iter().map(|d| d.batsman_runs).sum();
    let balls_faced = faced.len() as u32;
    let dismissals = faced
        .iter()
        .filter(|d| d.player_dismissed.as_deref() == Some(player))
        .count() as u32;

    PlayerSummary {
        player: player.to_string(),
        total_runs,
        balls_faced,
        dismissals,
        average: calculate_average(total_runs, dismissals),
        strike_rate: calculate_strike_rate(total_runs, balls_faced),
    }
}

/// Every batsman, sorted.
pub fn batsmen(dataset: &Dataset) -> Vec<String> {
    sorted_unique(dataset.delivery_records.iter().filter_map(|d| d.batsman.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_scorer_example() {
        let dataset = fixtures::dataset_with(
            "id\n1\n",
            "batsman,batsman_runs,ball\nA,4,1\nA,1,2\nB,6,3\n",
        );
        let top = top_run_scorers(&dataset, 10);
        assert_eq!(
            top[0],
            RunScorer {
                batsman: "A".to_string(),
                runs: 5
            }
        );
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_top_scorers_sorted_with_ties_in_appearance_order() {
        let dataset = fixtures::dataset();
        let top = top_run_scorers(&dataset, 10);
        let names: Vec<&str> = top.iter().map(|s| s.batsman.as_str()).collect();
        assert_eq!(names, vec!["Warner", "Kohli", "Dhawan", "Gayle"]);
        assert!(top.windows(2).all(|w| w[0].runs >= w[1].runs));
    }

    #[test]
    fn test_aggregated_runs_match_column_total() {
        let dataset = fixtures::dataset();
        let aggregated: i64 = top_run_scorers(&dataset, usize::MAX).iter().map(|s| s.runs).sum();
        let column: i64 = dataset.delivery_records.iter().map(|d| d.batsman_runs).sum();
        assert_eq!(aggregated, column);
        assert_eq!(aggregated, 19);
    }

    #[test]
    fn test_top_n_truncates() {
        let dataset = fixtures::dataset();
        assert_eq!(top_run_scorers(&dataset, 2).len(), 2);
    }

    #[test]
    fn test_player_summary_dismissed() {
        let dataset = fixtures::dataset();
        let summary = player_summary(&dataset, "Kohli");
        assert_eq!(summary.total_runs, 8);
        assert_eq!(summary.balls_faced, 4);
        assert_eq!(summary.dismissals, 1);
        assert_eq!(summary.average, 8.0);
        assert_eq!(summary.strike_rate, 200.0);
    }

    #[test]
    fn test_player_summary_never_dismissed_average_is_runs() {
        let dataset = fixtures::dataset();
        let summary = player_summary(&dataset, "Warner");
        assert_eq!(summary.dismissals, 0);
        assert_eq!(summary.average, 11.0);
        assert_eq!(summary.strike_rate, 275.0);
    }

    #[test]
    fn test_player_summary_unknown_player() {
        let dataset = fixtures::dataset();
        let summary = player_summary(&dataset, "Nobody");
        assert_eq!(summary.balls_faced, 0);
        assert_eq!(summary.strike_rate, 0.0);
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn test_batsmen_sorted() {
        let dataset = fixtures::dataset();
        assert_eq!(batsmen(&dataset), vec!["Dhawan", "Gayle", "Kohli", "Warner"]);
    }
}
