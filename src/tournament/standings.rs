use super::bracket::ScoreBoard;
use super::match_table::MatchTable;
use crate::types::PlayerName;
use serde::{Deserialize, Serialize};
use strum::Display;

/// How ties in win count are ordered when seeding the semi finals.
#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedingPolicy {
    // Ties keep roster order.
    #[default]
    WinsOnly,
    // Ties go through the same head-to-head pass as the final standings.
    HeadToHead,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsEntry {
    pub rank: usize,
    pub player: PlayerName,
    pub wins: u32,
}

/// Winner of the first match, by id, played between `a` and `b`.
/// None if they never met or the match has no result yet.
pub fn head_to_head<'a>(table: &'a MatchTable, a: &str, b: &str) -> Option<&'a PlayerName> {
    table
        .iter()
        .map(|(_, m)| m)
        .find(|m| m.is_between(a, b))
        .and_then(|m| m.winner.as_ref())
}

fn sorted_by_wins(roster: Vec<PlayerName>, wins_of: impl Fn(&str) -> u32) -> Vec<(PlayerName, u32)> {
    let mut sorted = roster
        .into_iter()
        .map(|player| {
            let wins = wins_of(&player);
            (player, wins)
        })
        .collect::<Vec<_>>();
    // Stable, so equal counts keep roster order.
    sorted.sort_by(|(_, a), (_, b)| b.cmp(a));
    sorted
}

// A single left-to-right pass over adjacent pairs. A swapped player is carried
// forward and compared with the next one, but earlier positions are never revisited.
fn apply_head_to_head(table: &MatchTable, sorted: &mut [(PlayerName, u32)]) {
    for i in 0..sorted.len().saturating_sub(1) {
        if sorted[i].1 != sorted[i + 1].1 {
            continue;
        }
        let second_won = head_to_head(table, &sorted[i].0, &sorted[i + 1].0)
            .map(|winner| *winner == sorted[i + 1].0)
            .unwrap_or_default();
        if second_won {
            sorted.swap(i, i + 1);
        }
    }
}

/// Players in seeding order, from the score board counters.
pub fn seeding_order(
    table: &MatchTable,
    scores: &ScoreBoard,
    policy: SeedingPolicy,
) -> Vec<PlayerName> {
    let mut sorted = sorted_by_wins(table.roster(), |player| scores.get(player));
    if policy == SeedingPolicy::HeadToHead {
        apply_head_to_head(table, &mut sorted);
    }
    sorted.into_iter().map(|(player, _)| player).collect()
}

/// Leaderboard over all ten matches, with the head-to-head tie-break pass.
pub fn final_standings(table: &MatchTable) -> Vec<StandingsEntry> {
    let mut sorted = sorted_by_wins(table.roster(), |player| table.wins_of(player));
    apply_head_to_head(table, &mut sorted);
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, (player, wins))| StandingsEntry {
            rank: index + 1,
            player,
            wins,
        })
        .collect()
}
