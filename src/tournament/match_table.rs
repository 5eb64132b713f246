use super::constants::*;
use crate::error::TournamentError;
use crate::types::{MatchId, MatchMap, PlayerName, WinsMap};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, Hash)]
pub enum MatchKind {
    #[strum(to_string = "Group")]
    Group,
    #[strum(to_string = "Semi Final")]
    SemiFinal,
    #[strum(to_string = "Final")]
    Final,
    #[strum(to_string = "Third Place")]
    ThirdPlace,
}

impl MatchKind {
    pub fn of(match_id: MatchId) -> Option<Self> {
        match match_id {
            id if GROUP_STAGE.contains(&id) => Some(Self::Group),
            SEMI_FINAL_1 | SEMI_FINAL_2 => Some(Self::SemiFinal),
            FINAL => Some(Self::Final),
            THIRD_PLACE => Some(Self::ThirdPlace),
            _ => None,
        }
    }
}

pub fn match_label(match_id: MatchId) -> String {
    match MatchKind::of(match_id) {
        Some(kind @ MatchKind::SemiFinal) => format!("{kind} {}", match_id - SEMI_FINAL_1 + 1),
        Some(kind @ (MatchKind::Final | MatchKind::ThirdPlace)) => kind.to_string(),
        _ => format!("Match {match_id}"),
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    // Players are not known yet.
    Undetermined,
    // Players are set, waiting for a result.
    Scheduled,
    Decided,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BracketState {
    GroupStage,
    SemisSeeded,
    SemisDecided,
    FinalsSeeded,
    Complete,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub players: Option<[PlayerName; PLAYERS_PER_MATCH]>,
    pub winner: Option<PlayerName>,
}

impl Match {
    pub fn undetermined() -> Self {
        Self::default()
    }

    pub fn scheduled(home: impl Into<PlayerName>, away: impl Into<PlayerName>) -> Self {
        Self {
            players: Some([home.into(), away.into()]),
            winner: None,
        }
    }

    pub fn status(&self) -> MatchStatus {
        match (&self.players, &self.winner) {
            (None, _) => MatchStatus::Undetermined,
            (Some(_), None) => MatchStatus::Scheduled,
            (Some(_), Some(_)) => MatchStatus::Decided,
        }
    }

    pub fn has_players(&self) -> bool {
        self.players.is_some()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn involves(&self, player: &str) -> bool {
        self.players
            .as_ref()
            .map(|players| players.iter().any(|p| p == player))
            .unwrap_or_default()
    }

    /// True when the two players of this match are exactly `a` and `b`, in any order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        match self.players.as_ref() {
            Some([home, away]) => (home == a && away == b) || (home == b && away == a),
            None => false,
        }
    }

    pub fn loser(&self) -> Option<&PlayerName> {
        let winner = self.winner.as_ref()?;
        self.players.as_ref()?.iter().find(|p| *p != winner)
    }

    pub fn fixture(&self) -> Option<String> {
        self.players
            .as_ref()
            .map(|[home, away]| format!("{home} vs {away}"))
    }
}

// `default` is the freshly created match with the same id.
fn check_stored(kind: MatchKind, default: &Match, stored: &Match) -> Result<(), String> {
    match (&stored.players, &stored.winner) {
        (None, Some(winner)) => return Err(format!("winner {winner} without players")),
        (Some([home, away]), _) if home == away => {
            return Err(format!("{home} cannot play against themselves"))
        }
        (Some(players), _) => {
            if let Some(unknown) = players.iter().find(|p| !ROSTER.contains(&p.as_str())) {
                return Err(format!("{unknown} is not in the roster"));
            }
        }
        (None, None) => {}
    }

    if let Some(winner) = stored.winner.as_ref() {
        if !stored.involves(winner) {
            return Err(format!("winner {winner} is not one of the players"));
        }
    }

    if kind == MatchKind::Group {
        let fixed = default.players.as_ref().map(|[home, away]| (home, away));
        let keeps_pairing = match fixed {
            Some((home, away)) => stored.is_between(home, away),
            None => false,
        };
        if !keeps_pairing {
            return Err("group match pairing differs from the fixed round robin".to_string());
        }
    }

    Ok(())
}

/// The ten-match table: six group matches, two semi finals, final and third place.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTable {
    matches: MatchMap,
}

impl Default for MatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchTable {
    pub fn new() -> Self {
        let mut matches: MatchMap = MATCH_IDS.map(|id| (id, Match::undetermined())).collect();
        for (id, home, away) in GROUP_STAGE_PAIRINGS {
            matches.insert(id, Match::scheduled(home, away));
        }
        Self { matches }
    }

    /// Overlays stored matches onto the default structure. Ids outside the table are
    /// dropped, a document breaking the match invariants fails the whole load.
    pub fn from_stored(stored: MatchMap) -> Result<Self, TournamentError> {
        let mut table = Self::new();
        for (id, stored_match) in stored {
            let Some(kind) = MatchKind::of(id) else {
                log::warn!("Ignoring stored match with unknown id {id}");
                continue;
            };
            check_stored(kind, &table.matches[&id], &stored_match).map_err(|reason| {
                TournamentError::InvalidStoredMatch {
                    match_id: id,
                    reason,
                }
            })?;
            table.matches.insert(id, stored_match);
        }
        Ok(table)
    }

    pub fn get(&self, match_id: MatchId) -> Result<&Match, TournamentError> {
        self.matches
            .get(&match_id)
            .ok_or(TournamentError::UnknownMatch(match_id))
    }

    pub(crate) fn get_mut(&mut self, match_id: MatchId) -> Result<&mut Match, TournamentError> {
        self.matches
            .get_mut(&match_id)
            .ok_or(TournamentError::UnknownMatch(match_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MatchId, &Match)> {
        self.matches.iter()
    }

    pub fn as_map(&self) -> &MatchMap {
        &self.matches
    }

    /// Participants in order of first appearance in the group stage.
    pub fn roster(&self) -> Vec<PlayerName> {
        GROUP_STAGE
            .filter_map(|id| self.matches.get(&id))
            .filter_map(|m| m.players.as_ref())
            .flat_map(|players| players.iter().cloned())
            .unique()
            .collect()
    }

    pub fn wins(&self) -> WinsMap {
        let mut wins: WinsMap = self.roster().into_iter().map(|p| (p, 0)).collect();
        for winner in self.matches.values().filter_map(|m| m.winner.as_ref()) {
            *wins.entry(winner.clone()).or_default() += 1;
        }
        wins
    }

    pub fn wins_of(&self, player: &str) -> u32 {
        self.matches
            .values()
            .filter(|m| m.winner.as_deref() == Some(player))
            .count() as u32
    }

    pub fn all_decided(&self, ids: impl IntoIterator<Item = MatchId>) -> bool {
        ids.into_iter()
            .all(|id| self.matches.get(&id).map(|m| m.is_decided()).unwrap_or_default())
    }

    pub fn has_players(&self, match_id: MatchId) -> bool {
        self.matches
            .get(&match_id)
            .map(|m| m.has_players())
            .unwrap_or_default()
    }

    /// Matches with players and no winner, by id.
    pub fn upcoming(&self) -> Vec<(MatchId, &Match)> {
        self.matches
            .iter()
            .filter(|(_, m)| m.status() == MatchStatus::Scheduled)
            .map(|(id, m)| (*id, m))
            .collect()
    }

    pub fn state(&self) -> BracketState {
        let is_decided = |id: MatchId| self.all_decided([id]);

        if is_decided(FINAL) {
            BracketState::Complete
        } else if self.has_players(FINAL) {
            BracketState::FinalsSeeded
        } else if is_decided(SEMI_FINAL_1) && is_decided(SEMI_FINAL_2) {
            BracketState::SemisDecided
        } else if self.has_players(SEMI_FINAL_1) {
            BracketState::SemisSeeded
        } else {
            BracketState::GroupStage
        }
    }

    pub fn champion(&self) -> Option<&PlayerName> {
        self.matches.get(&FINAL).and_then(|m| m.winner.as_ref())
    }

    pub(crate) fn seed(&mut self, match_id: MatchId, players: [PlayerName; PLAYERS_PER_MATCH]) {
        if let Some(m) = self.matches.get_mut(&match_id) {
            // Seeding never overwrites players that are already set.
            if m.players.is_none() {
                m.players = Some(players);
            }
        }
    }
}
