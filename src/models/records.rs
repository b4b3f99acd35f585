//! Typed projections of the cleaned match and delivery tables.

use super::table::{Cell, Table};

/// One row of the matches table.
///
/// Every field is `None` when its column is absent; column presence is
/// checked on the table itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub id: Option<String>,
    pub season: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub toss_decision: Option<String>,
    pub result: Option<String>,
    pub win_by_runs: Option<f64>,
    pub win_by_wickets: Option<f64>,
}

impl MatchRecord {
    /// The opponent of `team` in this match, if `team` played in it.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        match (self.team1.as_deref(), self.team2.as_deref()) {
            (Some(t1), Some(t2)) if t1 == team => Some(t2),
            (Some(t1), Some(t2)) if t2 == team => Some(t1),
            _ => None,
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1.as_deref() == Some(team) || self.team2.as_deref() == Some(team)
    }
}

/// One ball bowled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delivery {
    pub match_id: Option<String>,
    pub over: Option<i64>,
    pub batting_team: Option<String>,
    pub batsman: Option<String>,
    pub bowler: Option<String>,
    pub batsman_runs: i64,
    pub total_runs: i64,
    pub player_dismissed: Option<String>,
}

/// Looks up cells of a row by column name.
struct RowReader<'a> {
    table: &'a Table,
}

impl<'a> RowReader<'a> {
    fn cell(&self, row: &'a [Cell], name: &str) -> Option<&'a Cell> {
        self.table.column_index(name).and_then(|idx| row.get(idx))
    }

    fn text(&self, row: &'a [Cell], name: &str) -> Option<String> {
        self.cell(row, name).and_then(Cell::as_text)
    }

    fn float(&self, row: &'a [Cell], name: &str) -> Option<f64> {
        self.cell(row, name).and_then(Cell::as_f64)
    }

    fn int(&self, row: &'a [Cell], name: &str) -> Option<i64> {
        self.cell(row, name).and_then(Cell::as_i64)
    }
}

impl MatchRecord {
    pub fn from_table(table: &Table) -> Vec<MatchRecord> {
        let reader = RowReader { table };
        table
            .rows
            .iter()
            .map(|row| MatchRecord {
                id: reader.text(row, "id"),
                season: reader.text(row, "season"),
                team1: reader.text(row, "team1"),
                team2: reader.text(row, "team2"),
                winner: reader.text(row, "winner"),
                loser: reader.text(row, "loser"),
                toss_decision: reader.text(row, "toss_decision"),
                result: reader.text(row, "result"),
                win_by_runs: reader.float(row, "win_by_runs"),
                win_by_wickets: reader.float(row, "win_by_wickets"),
            })
            .collect()
    }
}

impl Delivery {
    pub fn from_table(table: &Table) -> Vec<Delivery> {
        let reader = RowReader { table };
        table
            .rows
            .iter()
            .map(|row| Delivery {
                match_id: reader.text(row, "match_id"),
                over: reader.int(row, "over"),
                batting_team: reader.text(row, "batting_team"),
                batsman: reader.text(row, "batsman"),
                bowler: reader.text(row, "bowler"),
                batsman_runs: reader.int(row, "batsman_runs").unwrap_or(0),
                total_runs: reader.int(row, "total_runs").unwrap_or(0),
                player_dismissed: reader.text(row, "player_dismissed"),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_raw(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_match_projection() {
        let t = table(
            &["id", "season", "team1", "team2", "winner", "win_by_runs"],
            &[&["1", "2008", "KKR", "RCB", "KKR", "140"]],
        );
        let records = MatchRecord::from_table(&t);
        assert_eq!(records.len(), 1);
        let m = &records[0];
        assert_eq!(m.id.as_deref(), Some("1"));
        assert_eq!(m.season.as_deref(), Some("2008"));
        assert_eq!(m.win_by_runs, Some(140.0));
        assert_eq!(m.win_by_wickets, None);
        assert_eq!(m.loser, None);
        assert_eq!(m.opponent_of("RCB"), Some("KKR"));
        assert_eq!(m.opponent_of("CSK"), None);
        assert!(m.involves("KKR"));
    }

    #[test]
    fn test_delivery_projection() {
        let t = table(
            &["match_id", "over", "batsman", "bowler", "batsman_runs", "total_runs", "player_dismissed"],
            &[
                &["1", "1", "A", "X", "4", "4", ""],
                &["1", "1", "A", "X", "0", "1", "A"],
            ],
        );
        let records = Delivery::from_table(&t);
        assert_eq!(records[0].batsman_runs, 4);
        assert_eq!(records[0].player_dismissed, None);
        assert_eq!(records[1].total_runs, 1);
        assert_eq!(records[1].player_dismissed.as_deref(), Some("A"));
        assert_eq!(records[1].batting_team, None);
    }

    #[test]
    fn test_float_ids_render_like_ints() {
        let t = table(&["match_id", "batsman", "batsman_runs"], &[&["7.0", "A", "1.5"]]);
        let records = Delivery::from_table(&t);
        assert_eq!(records[0].match_id.as_deref(), Some("7"));
        // fractional runs are not whole numbers
        assert_eq!(records[0].batsman_runs, 0);
    }
}
