//! Dashboard overview: headline charts and key insights.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{
    CategoryCount, Dataset, KeyInsights, OverAverage, RunScorer, TeamWins, TossOutcome,
};

use super::{mode, require, tally, team_win_counts, top_run_scorers, Section, StatsError};

/// Everything shown on the dashboard landing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub top_run_scorers: Vec<RunScorer>,
    pub top_winning_teams: Section<Vec<TeamWins>>,
    pub toss_decisions: Section<Vec<CategoryCount>>,
    pub toss_outcomes: Section<Vec<TossOutcome>>,
    pub average_runs_per_over: Section<Vec<OverAverage>>,
    pub key_insights: KeyInsights,
}

/// How often each toss decision was taken.
pub fn toss_decisions(dataset: &Dataset) -> Result<Vec<CategoryCount>, StatsError> {
    require(&dataset.matches, &["toss_decision"], "Toss", "matches")?;

    Ok(tally(
        dataset
            .match_records
            .iter()
            .filter_map(|m| m.toss_decision.as_deref().map(|d| (d, 1))),
    )
    .into_iter()
    .map(|(label, count)| CategoryCount {
        label: label.to_string(),
        count: count as u32,
    })
    .collect())
}

/// Wins per (toss decision, winner) pair.
pub fn toss_outcomes(dataset: &Dataset) -> Result<Vec<TossOutcome>, StatsError> {
    require(
        &dataset.matches,
        &["toss_decision", "winner"],
        "Toss",
        "matches",
    )?;

    Ok(tally(dataset.match_records.iter().filter_map(|m| {
        Some(((m.toss_decision.as_deref()?, m.winner.as_deref()?), 1))
    }))
    .into_iter()
    .map(|((decision, winner), count)| TossOutcome {
        decision: decision.to_string(),
        winner: winner.to_string(),
        count: count as u32,
    })
    .collect())
}

/// Mean total runs per delivery for each over.
pub fn average_runs_per_over(dataset: &Dataset) -> Result<Vec<OverAverage>, StatsError> {
    require(
        &dataset.deliveries,
        &["over", "total_runs"],
        "Over",
        "deliveries",
    )?;

    let mut per_over: BTreeMap<i64, (i64, u32)> = BTreeMap::new();
    for d in &dataset.delivery_records {
        if let Some(over) = d.over {
            let entry = per_over.entry(over).or_default();
            entry.0 += d.total_runs;
            entry.1 += 1;
        }
    }

    Ok(per_over
        .into_iter()
        .map(|(over, (runs, balls))| OverAverage {
            over,
            average_runs: runs as f64 / balls as f64,
        })
        .collect())
}

pub fn key_insights(dataset: &Dataset) -> KeyInsights {
    let most_successful_team = if dataset.matches.has_column("winner") {
        mode(dataset.match_records.iter().filter_map(|m| m.winner.as_deref()))
    } else {
        None
    };

    KeyInsights {
        total_matches: dataset.matches.len() as u32,
        most_successful_team,
        top_batsman: top_run_scorers(dataset, 1).into_iter().next(),
    }
}

pub fn dashboard_overview(dataset: &Dataset, top_n: usize) -> Overview {
    Overview {
        top_run_scorers: top_run_scorers(dataset, top_n),
        top_winning_teams: team_win_counts(dataset, top_n).into(),
        toss_decisions: toss_decisions(dataset).into(),
        toss_outcomes: toss_outcomes(dataset).into(),
        average_runs_per_over: average_runs_per_over(dataset).into(),
        key_insights: key_insights(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toss_decisions_in_appearance_order() {
        let dataset = fixtures::dataset();
        let counts = toss_decisions(&dataset).unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    label: "field".to_string(),
                    count: 4
                },
                CategoryCount {
                    label: "bat".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_toss_outcomes() {
        let dataset = fixtures::dataset();
        let outcomes = toss_outcomes(&dataset).unwrap();
        assert_eq!(outcomes.len(), 6);
        assert_eq!(outcomes[0].decision, "field");
        assert_eq!(outcomes[0].winner, "SRH");
        assert!(outcomes.iter().all(|o| o.count == 1));
    }

    #[test]
    fn test_average_runs_per_over() {
        let dataset = fixtures::dataset();
        let averages = average_runs_per_over(&dataset).unwrap();
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].over, 1);
        assert!((averages[0].average_runs - 7.0 / 6.0).abs() < 1e-9);
        assert_eq!(averages[1].average_runs, 4.5);
    }

    #[test]
    fn test_key_insights() {
        let dataset = fixtures::dataset();
        let insights = key_insights(&dataset);
        assert_eq!(insights.total_matches, 6);
        assert_eq!(insights.top_batsman.unwrap().batsman, "Warner");
    }

    #[test]
    fn test_overview_degrades_per_section() {
        let dataset = fixtures::dataset_with("id\n1\n", "batsman,batsman_runs\nA,4\n");
        let overview = dashboard_overview(&dataset, 10);

        assert_eq!(overview.top_run_scorers.len(), 1);
        assert_eq!(
            overview.toss_decisions,
            Section::Unavailable {
                message: "Toss data not available in matches file.".to_string()
            }
        );
        assert!(overview.top_winning_teams.data().is_none());
        assert!(overview.average_runs_per_over.data().is_none());
        assert_eq!(overview.key_insights.most_successful_team, None);
        assert_eq!(overview.key_insights.total_matches, 1);
    }
}
