use super::match_table::{match_label, Match, MatchStatus, MatchTable};
use super::standings::StandingsEntry;
use crate::types::{MatchId, PlayerName};

#[derive(Debug, Clone, PartialEq)]
pub enum MatchView {
    Decided {
        players: [PlayerName; 2],
        winner: PlayerName,
    },
    PickWinner {
        players: [PlayerName; 2],
    },
    AwaitingResult {
        players: [PlayerName; 2],
    },
    NotScheduled,
}

impl MatchView {
    pub fn of(m: &Match, is_admin: bool) -> Self {
        match (m.status(), m.players.clone(), m.winner.clone()) {
            (MatchStatus::Decided, Some(players), Some(winner)) => Self::Decided { players, winner },
            (MatchStatus::Scheduled, Some(players), _) if is_admin => Self::PickWinner { players },
            (MatchStatus::Scheduled, Some(players), _) => Self::AwaitingResult { players },
            _ => Self::NotScheduled,
        }
    }

    pub fn describe(&self, match_id: MatchId) -> String {
        let label = match_label(match_id);
        match self {
            Self::Decided {
                players: [home, away],
                winner,
            } => format!("✅ {label} ({home} vs {away}) → Winner: {winner}"),
            Self::PickWinner {
                players: [home, away],
            } => format!("Pick winner of {label}: [1] {home}  [2] {away}"),
            Self::AwaitingResult {
                players: [home, away],
            } => format!("{label}: {home} vs {away}"),
            Self::NotScheduled => format!("{label}: not yet scheduled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowRow {
    pub label: String,
    pub players: String,
    pub winner: String,
}

/// One row per match, blank cells where nothing is set yet.
pub fn match_flow(table: &MatchTable) -> Vec<FlowRow> {
    table
        .iter()
        .map(|(id, m)| FlowRow {
            label: match_label(*id),
            players: m.fixture().unwrap_or_default(),
            winner: m.winner.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn upcoming_fixtures(table: &MatchTable) -> Vec<(String, String)> {
    table
        .upcoming()
        .into_iter()
        .filter_map(|(id, m)| Some((match_label(id), m.fixture()?)))
        .collect()
}

/// Shown instead of the upcoming list once nothing is left to play.
pub fn completion_message(table: &MatchTable) -> Option<String> {
    if !table.upcoming().is_empty() {
        return None;
    }
    Some(match table.champion() {
        Some(winner) => format!("All matches completed. Winner: {winner} 🏆"),
        None => "All matches completed.".to_string(),
    })
}

pub fn standings_rows(standings: &[StandingsEntry]) -> Vec<[String; 3]> {
    standings
        .iter()
        .map(|entry| {
            [
                entry.rank.to_string(),
                entry.player.clone(),
                entry.wins.to_string(),
            ]
        })
        .collect()
}

pub const TOURNAMENT_PROCESS: [&str; 6] = [
    "Group Stage: everyone plays each other once",
    "Matches 1-6: round robin",
    "Semi Final 1: 1st vs 4th",
    "Semi Final 2: 2nd vs 3rd",
    "Match 9: Final (winners of the semis)",
    "Match 10: 3rd place (losers of the semis)",
];

/// Plain text rendering of the dashboard, used when running without a terminal UI.
pub fn text_report(table: &MatchTable, standings: &[StandingsEntry]) -> String {
    let mut lines = vec!["Matches".to_string()];
    lines.extend(
        table
            .iter()
            .map(|(id, m)| format!("  {}", MatchView::of(m, false).describe(*id))),
    );

    lines.push(String::new());
    match completion_message(table) {
        Some(message) => lines.push(message),
        None => {
            lines.push("Upcoming".to_string());
            lines.extend(
                upcoming_fixtures(table)
                    .into_iter()
                    .map(|(label, fixture)| format!("  {label}: {fixture}")),
            );
        }
    }

    lines.push(String::new());
    lines.push("Standings".to_string());
    lines.extend(
        standings_rows(standings)
            .into_iter()
            .map(|[rank, player, wins]| format!("  {rank}. {player} ({wins})")),
    );
    lines.join("\n")
}
