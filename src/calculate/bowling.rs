//! Bowling figures.

use crate::models::{BowlerSummary, Dataset, Delivery};

use super::{calculate_economy, overs_from_balls, require, sorted_unique, tally, StatsError};

/// Wickets, economy and best match figures for one bowler.
///
/// Every non-empty `player_dismissed` on the bowler's deliveries counts as
/// a wicket.
pub fn bowler_summary(dataset: &Dataset, bowler: &str) -> Result<BowlerSummary, StatsError> {
    require(
        &dataset.deliveries,
        &["bowler", "total_runs"],
        "Bowling",
        "deliveries",
    )?;

    let bowled: Vec<&Delivery> = dataset
        .delivery_records
        .iter()
        .filter(|d| d.bowler.as_deref() == Some(bowler))
        .collect();

    let wickets = bowled.iter().filter(|d| d.player_dismissed.is_some()).count() as u32;
    let balls = bowled.len() as u32;
    let runs_conceded: i64 = bowled.iter().map(|d| d.total_runs).sum();
    let overs = overs_from_balls(balls);

    let best_bowling = if dataset.deliveries.has_column("match_id") {
        tally(bowled.iter().copied().filter_map(|d| {
            d.match_id
                .as_deref()
                .map(|id| (id, i64::from(d.player_dismissed.is_some())))
        }))
        .into_iter()
        .map(|(_, w)| w as u32)
        .max()
    } else {
        None
    };

    Ok(BowlerSummary {
        bowler: bowler.to_string(),
        wickets,
        balls,
        runs_conceded,
        overs,
        economy: calculate_economy(runs_conceded, overs),
        best_bowling,
    })
}

/// Every bowler, sorted.
pub fn bowlers(dataset: &Dataset) -> Result<Vec<String>, StatsError> {
    require(&dataset.deliveries, &["bowler"], "Bowling", "deliveries")?;
    Ok(sorted_unique(
        dataset.delivery_records.iter().filter_map(|d| d.bowler.as_deref()),
    ))
}
