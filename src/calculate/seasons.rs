//! Season views and the per-match run distribution.

use std::collections::HashSet;

use crate::models::{natural_cmp, Dataset, MatchRuns, RunDistribution, SeasonSummary};

use super::{mode, rank_scorers, require, sorted_unique, tally, StatsError};

fn require_season(dataset: &Dataset) -> Result<(), StatsError> {
    require(&dataset.matches, &["season"], "Season", "matches")
}

/// Match count, most successful team and top run scorer for a season.
///
/// The top scorer needs both the matches `id` and deliveries `match_id`
/// columns to link the two tables; it is `None` otherwise.
pub fn season_summary(dataset: &Dataset, season: &str) -> Result<SeasonSummary, StatsError> {
    require_season(dataset)?;

    let in_season: Vec<_> = dataset
        .match_records
        .iter()
        .filter(|m| m.season.as_deref() == Some(season))
        .collect();

    let most_successful_team = if dataset.matches.has_column("winner") {
        mode(in_season.iter().copied().filter_map(|m| m.winner.as_deref()))
    } else {
        None
    };

    let linked =
        dataset.matches.has_column("id") && dataset.deliveries.has_column("match_id");
    let top_run_scorer = if linked {
        let ids: HashSet<&str> = in_season
            .iter()
            .copied()
            .filter_map(|m| m.id.as_deref())
            .collect();
        let season_deliveries = dataset
            .delivery_records
            .iter()
            .filter(|d| d.match_id.as_deref().is_some_and(|id| ids.contains(id)));
        rank_scorers(season_deliveries, 1).into_iter().next()
    } else {
        None
    };

    Ok(SeasonSummary {
        season: season.to_string(),
        total_matches: in_season.len() as u32,
        most_successful_team,
        top_run_scorer,
    })
}

/// Every season, in numeric order.
pub fn seasons(dataset: &Dataset) -> Result<Vec<String>, StatsError> {
    require_season(dataset)?;
    Ok(sorted_unique(
        dataset.match_records.iter().filter_map(|m| m.season.as_deref()),
    ))
}

/// Total runs per match for a batting team, optionally within one season.
///
/// With a season, only matches of that season in which the team played
/// are considered. Matches are ordered by id.
pub fn run_distribution(
    dataset: &Dataset,
    team: &str,
    season: Option<&str>,
) -> Result<RunDistribution, StatsError> {
    require(
        &dataset.deliveries,
        &["batting_team", "match_id", "total_runs"],
        "Run distribution",
        "deliveries",
    )?;

    let season_ids: Option<HashSet<&str>> = match season {
        Some(season) => {
            require_season(dataset)?;
            require(&dataset.matches, &["id", "team1", "team2"], "Match", "matches")?;
            Some(
                dataset
                    .match_records
                    .iter()
                    .filter(|m| m.season.as_deref() == Some(season) && m.involves(team))
                    .filter_map(|m| m.id.as_deref())
                    .collect(),
            )
        }
        None => None,
    };

    let selected = dataset.delivery_records.iter().filter(|d| {
        d.batting_team.as_deref() == Some(team)
            && match &season_ids {
                Some(ids) => d.match_id.as_deref().is_some_and(|id| ids.contains(id)),
                None => true,
            }
    });

    let mut per_match = tally(
        selected.filter_map(|d| d.match_id.as_deref().map(|id| (id, d.total_runs))),
    );
    if per_match.is_empty() {
        return Err(StatsError::NoData);
    }
    per_match.sort_by(|a, b| natural_cmp(a.0, b.0));

    Ok(RunDistribution {
        team: team.to_string(),
        season: season.map(str::to_string),
        matches: per_match
            .into_iter()
            .map(|(match_id, runs)| MatchRuns {
                match_id: match_id.to_string(),
                runs,
            })
            .collect(),
    })
}
