//! Match outcome tally.

use crate::models::{Dataset, MatchRecord, OutcomeTally};

/// Count matches satisfying `pred`, or `None` when `column` is absent.
fn count_if(dataset: &Dataset, column: &str, pred: impl Fn(&MatchRecord) -> bool) -> Option<u32> {
    dataset
        .matches
        .has_column(column)
        .then(|| dataset.match_records.iter().filter(|m| pred(m)).count() as u32)
}

fn result_is(dataset: &Dataset, expected: &str) -> Option<u32> {
    count_if(dataset, "result", |m| {
        m.result
            .as_deref()
            .is_some_and(|r| r.to_lowercase() == expected)
    })
}

/// Matches won by a run margin, by a wicket margin, tied, and abandoned.
pub fn outcome_tally(dataset: &Dataset) -> OutcomeTally {
    OutcomeTally {
        won_by_runs: count_if(dataset, "win_by_runs", |m| {
            m.win_by_runs.is_some_and(|r| r > 0.0)
        }),
        won_by_wickets: count_if(dataset, "win_by_wickets", |m| {
            m.win_by_wickets.is_some_and(|w| w > 0.0)
        }),
        ties: result_is(dataset, "tie"),
        no_results: result_is(dataset, "no result"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_tally() {
        let dataset = fixtures::dataset();
        assert_eq!(
            outcome_tally(&dataset),
            OutcomeTally {
                won_by_runs: Some(2),
                won_by_wickets: Some(2),
                ties: Some(1),
                no_results: Some(1),
            }
        );
    }

    #[test]
    fn test_result_match_is_case_insensitive() {
        let dataset = fixtures::dataset_with(
            "id,result\n1,Tie\n2,No Result\n3,normal\n",
            "batsman,batsman_runs\nA,1\n",
        );
        let tally = outcome_tally(&dataset);
        assert_eq!(tally.ties, Some(1));
        assert_eq!(tally.no_results, Some(1));
    }

    #[test]
    fn test_absent_columns_disable_counts() {
        let dataset = fixtures::dataset_with("id,result\n1,tie\n", "batsman,batsman_runs\nA,1\n");
        let tally = outcome_tally(&dataset);
        assert_eq!(tally.won_by_runs, None);
        assert_eq!(tally.won_by_wickets, None);
        assert_eq!(tally.ties, Some(1));
    }
}
