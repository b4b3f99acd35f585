//! Team views: win counts, win percentage, head-to-head.

use crate::models::{Dataset, HeadToHead, TeamSummary, TeamWins};

use super::{calculate_win_percentage, require, sort_descending, sorted_unique, tally, StatsError};

/// Top `n` teams by number of matches won.
pub fn team_win_counts(dataset: &Dataset, n: usize) -> Result<Vec<TeamWins>, StatsError> {
    require(&dataset.matches, &["winner"], "Winner", "matches")?;

    let mut counts = tally(
        dataset
            .match_records
            .iter()
            .filter_map(|m| m.winner.as_deref().map(|w| (w, 1))),
    );
    sort_descending(&mut counts);

    Ok(counts
        .into_iter()
        .take(n)
        .map(|(team, wins)| TeamWins {
            team: team.to_string(),
            wins: wins as u32,
        })
        .collect())
}

/// Win record for one team.
///
/// The opponent in a won match is the `loser` column when the file has one,
/// otherwise whichever listed team is not the winner.
pub fn team_summary(dataset: &Dataset, team: &str) -> Result<TeamSummary, StatsError> {
    require(
        &dataset.matches,
        &["team1", "team2", "winner"],
        "Team",
        "matches",
    )?;

    let matches_played = dataset
        .match_records
        .iter()
        .filter(|m| m.involves(team))
        .count() as u32;

    let won: Vec<_> = dataset
        .match_records
        .iter()
        .filter(|m| m.winner.as_deref() == Some(team))
        .collect();
    let wins = won.len() as u32;

    let has_loser = dataset.matches.has_column("loser");
    let opponents = won.iter().copied().filter_map(|m| {
        if has_loser {
            m.loser.as_deref()
        } else if m.team1 == m.winner {
            m.team2.as_deref()
        } else {
            m.team1.as_deref()
        }
    });

    let mut h2h = tally(opponents.map(|o| (o, 1)));
    sort_descending(&mut h2h);

    Ok(TeamSummary {
        team: team.to_string(),
        matches_played,
        wins,
        win_percentage: calculate_win_percentage(wins, matches_played),
        head_to_head: h2h
            .into_iter()
            .map(|(opponent, wins)| HeadToHead {
                opponent: opponent.to_string(),
                wins: wins as u32,
            })
            .collect(),
    })
}

/// Every team listed on either side of a match, sorted.
pub fn teams(dataset: &Dataset) -> Result<Vec<String>, StatsError> {
    require(&dataset.matches, &["team1"], "Team", "matches")?;

    Ok(sorted_unique(dataset.match_records.iter().flat_map(|m| {
        [m.team1.as_deref(), m.team2.as_deref()].into_iter().flatten()
    })))
}
