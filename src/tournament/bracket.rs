use super::constants::*;
use super::match_table::{BracketState, MatchTable, MatchStatus};
use super::standings::{final_standings, seeding_order, SeedingPolicy, StandingsEntry};
use crate::error::TournamentError;
use crate::types::{MatchId, PlayerName, WinsMap};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Win counters per player, incremented on every recorded result.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBoard {
    scores: WinsMap,
}

impl ScoreBoard {
    pub fn new(roster: &[PlayerName]) -> Self {
        Self {
            scores: roster.iter().map(|p| (p.clone(), 0)).collect(),
        }
    }

    pub fn from_map(scores: WinsMap) -> Self {
        Self { scores }
    }

    pub fn get(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or_default()
    }

    pub fn increment(&mut self, player: &str) {
        *self.scores.entry(player.to_string()).or_default() += 1;
    }

    pub fn as_map(&self) -> &WinsMap {
        &self.scores
    }

    /// True when every player has exactly the given number of wins. Missing entries count as zero.
    pub fn agrees_with(&self, wins: &WinsMap) -> bool {
        wins.iter().all(|(player, count)| self.get(player) == *count)
            && self
                .scores
                .iter()
                .all(|(player, count)| wins.get(player).copied().unwrap_or_default() == *count)
    }
}

/// Owned tournament state: the match table plus the score board.
#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    matches: MatchTable,
    scores: ScoreBoard,
    seeding_policy: SeedingPolicy,
}

impl Default for Bracket {
    fn default() -> Self {
        let matches = MatchTable::new();
        let scores = ScoreBoard::new(&matches.roster());
        Self::new(matches, scores, SeedingPolicy::default())
    }
}

impl Bracket {
    pub fn new(matches: MatchTable, scores: ScoreBoard, seeding_policy: SeedingPolicy) -> Self {
        Self {
            matches,
            scores,
            seeding_policy,
        }
    }

    pub fn matches(&self) -> &MatchTable {
        &self.matches
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn seeding_policy(&self) -> SeedingPolicy {
        self.seeding_policy
    }

    pub fn state(&self) -> BracketState {
        self.matches.state()
    }

    pub fn champion(&self) -> Option<&PlayerName> {
        self.matches.champion()
    }

    pub fn standings(&self) -> Vec<StandingsEntry> {
        final_standings(&self.matches)
    }

    pub fn seeding(&self) -> Vec<PlayerName> {
        seeding_order(&self.matches, &self.scores, self.seeding_policy)
    }

    /// Records the result of a scheduled match. Fails without touching any state
    /// if the match is unknown, has no players, is already decided or the winner
    /// is not one of its players.
    pub fn record_winner(&mut self, match_id: MatchId, winner: &str) -> Result<(), TournamentError> {
        let m = self.matches.get_mut(match_id)?;

        match m.status() {
            MatchStatus::Undetermined => return Err(TournamentError::MatchNotReady(match_id)),
            MatchStatus::Decided => {
                return Err(TournamentError::AlreadyDecided {
                    match_id,
                    winner: m.winner.clone().unwrap_or_default(),
                })
            }
            MatchStatus::Scheduled => {}
        }

        if !m.involves(winner) {
            return Err(TournamentError::InvalidWinner {
                match_id,
                winner: winner.to_string(),
            });
        }

        m.winner = Some(winner.to_string());
        self.scores.increment(winner);
        info!("Match {match_id} won by {winner}");

        Ok(())
    }

    /// Seeds semi finals and final/third place when their prerequisites are decided.
    /// Only empty matches are filled, so calling it again is a no-op.
    /// Returns the ids of the matches that were seeded.
    pub fn advance(&mut self) -> Vec<MatchId> {
        let mut seeded = vec![];

        if self.matches.all_decided(GROUP_STAGE) && !self.matches.has_players(SEMI_FINAL_1) {
            let top = self.seeding();
            if let [first, second, third, fourth, ..] = top.as_slice() {
                info!("Semi finals: {first} vs {fourth}, {second} vs {third}");
                self.matches
                    .seed(SEMI_FINAL_1, [first.clone(), fourth.clone()]);
                self.matches
                    .seed(SEMI_FINAL_2, [second.clone(), third.clone()]);
                seeded.extend([SEMI_FINAL_1, SEMI_FINAL_2]);
            } else {
                debug!("Cannot seed semi finals with {} players", top.len());
            }
        }

        if self.matches.all_decided([SEMI_FINAL_1, SEMI_FINAL_2]) && !self.matches.has_players(FINAL)
        {
            if let Some((finalists, losers)) = self.semi_final_outcome() {
                info!(
                    "Final: {} vs {}, third place: {} vs {}",
                    finalists[0], finalists[1], losers[0], losers[1]
                );
                self.matches.seed(FINAL, finalists);
                self.matches.seed(THIRD_PLACE, losers);
                seeded.extend([FINAL, THIRD_PLACE]);
            }
        }

        seeded
    }

    fn semi_final_outcome(
        &self,
    ) -> Option<([PlayerName; PLAYERS_PER_MATCH], [PlayerName; PLAYERS_PER_MATCH])> {
        let semi_1 = self.matches.get(SEMI_FINAL_1).ok()?;
        let semi_2 = self.matches.get(SEMI_FINAL_2).ok()?;
        let finalists = [semi_1.winner.clone()?, semi_2.winner.clone()?];

        let losers = semi_1
            .players
            .iter()
            .chain(semi_2.players.iter())
            .flatten()
            .filter(|p| !finalists.contains(p))
            .cloned()
            .collect::<Vec<_>>();

        match losers.as_slice() {
            [a, b] => Some((finalists, [a.clone(), b.clone()])),
            _ => {
                debug!("Semi finals did not produce two losers: {losers:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bracket, ScoreBoard};
    use crate::error::TournamentError;
    use crate::tournament::constants::*;
    use crate::tournament::{BracketState, Match, MatchTable, SeedingPolicy};
    use crate::types::MatchMap;
    use crate::types::AppResult;

    const GROUP_WINNERS: [(u8, &str); 6] = [
        (1, "Ankush"),
        (2, "Jaspreet"),
        (3, "Ankush"),
        (4, "Jaspreet"),
        (5, "Ankush"),
        (6, "Aman"),
    ];

    fn play_group_stage(bracket: &mut Bracket) -> AppResult<()> {
        for (match_id, winner) in GROUP_WINNERS {
            bracket.record_winner(match_id, winner)?;
            bracket.advance();
        }
        Ok(())
    }

    fn players_of(bracket: &Bracket, match_id: u8) -> Vec<String> {
        bracket
            .matches()
            .get(match_id)
            .ok()
            .and_then(|m| m.players.clone())
            .map(|p| p.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_record_winner_increments_score() -> AppResult<()> {
        let mut bracket = Bracket::default();
        bracket.record_winner(1, "Aman")?;
        assert_eq!(bracket.scores().get("Aman"), 1);
        assert_eq!(bracket.scores().get("Ankush"), 0);
        assert_eq!(
            bracket.matches().get(1)?.winner.as_deref(),
            Some("Aman")
        );
        Ok(())
    }

    #[test]
    fn test_record_winner_errors_leave_state_unchanged() -> AppResult<()> {
        let mut bracket = Bracket::default();
        let untouched = bracket.clone();

        assert!(matches!(
            bracket.record_winner(11, "Ankush"),
            Err(TournamentError::UnknownMatch(11))
        ));
        assert!(matches!(
            bracket.record_winner(7, "Ankush"),
            Err(TournamentError::MatchNotReady(7))
        ));
        for match_id in GROUP_STAGE {
            assert!(matches!(
                bracket.record_winner(match_id, "Magnus"),
                Err(TournamentError::InvalidWinner { .. })
            ));
        }
        // Yogesh does not play match 1.
        assert!(matches!(
            bracket.record_winner(1, "Yogesh"),
            Err(TournamentError::InvalidWinner { match_id: 1, .. })
        ));
        assert_eq!(bracket, untouched);

        bracket.record_winner(1, "Ankush")?;
        let decided = bracket.clone();
        assert!(matches!(
            bracket.record_winner(1, "Ankush"),
            Err(TournamentError::AlreadyDecided { match_id: 1, .. })
        ));
        assert!(matches!(
            bracket.record_winner(1, "Aman"),
            Err(TournamentError::AlreadyDecided { .. })
        ));
        assert_eq!(bracket, decided);
        assert_eq!(bracket.scores().get("Ankush"), 1);
        Ok(())
    }

    #[test]
    fn test_semi_finals_wait_for_group_stage() -> AppResult<()> {
        let mut bracket = Bracket::default();
        for (match_id, winner) in GROUP_WINNERS.iter().take(5) {
            bracket.record_winner(*match_id, winner)?;
            assert!(bracket.advance().is_empty());
        }
        assert_eq!(bracket.state(), BracketState::GroupStage);
        assert!(players_of(&bracket, SEMI_FINAL_1).is_empty());
        Ok(())
    }

    #[test]
    fn test_full_bracket_progression() -> AppResult<()> {
        let mut bracket = Bracket::default();
        play_group_stage(&mut bracket)?;

        assert_eq!(bracket.scores().get("Ankush"), 3);
        assert_eq!(bracket.scores().get("Jaspreet"), 2);
        assert_eq!(bracket.scores().get("Aman"), 1);
        assert_eq!(bracket.scores().get("Yogesh"), 0);

        assert_eq!(bracket.state(), BracketState::SemisSeeded);
        assert_eq!(players_of(&bracket, SEMI_FINAL_1), vec!["Ankush", "Yogesh"]);
        assert_eq!(players_of(&bracket, SEMI_FINAL_2), vec!["Jaspreet", "Aman"]);

        bracket.record_winner(SEMI_FINAL_1, "Ankush")?;
        assert!(bracket.advance().is_empty());
        bracket.record_winner(SEMI_FINAL_2, "Jaspreet")?;
        assert_eq!(bracket.state(), BracketState::SemisDecided);
        assert_eq!(bracket.advance(), vec![FINAL, THIRD_PLACE]);

        assert_eq!(bracket.state(), BracketState::FinalsSeeded);
        assert_eq!(players_of(&bracket, FINAL), vec!["Ankush", "Jaspreet"]);
        assert_eq!(players_of(&bracket, THIRD_PLACE), vec!["Yogesh", "Aman"]);

        bracket.record_winner(THIRD_PLACE, "Aman")?;
        assert_eq!(bracket.champion(), None);
        bracket.record_winner(FINAL, "Jaspreet")?;
        assert!(bracket.advance().is_empty());
        assert_eq!(bracket.state(), BracketState::Complete);
        assert_eq!(bracket.champion().map(String::as_str), Some("Jaspreet"));
        assert!(bracket.matches().upcoming().is_empty());
        Ok(())
    }

    #[test]
    fn test_advance_is_idempotent() -> AppResult<()> {
        let mut bracket = Bracket::default();
        for (match_id, winner) in GROUP_WINNERS {
            bracket.record_winner(match_id, winner)?;
        }
        assert_eq!(bracket.advance(), vec![SEMI_FINAL_1, SEMI_FINAL_2]);
        let once = bracket.clone();
        assert!(bracket.advance().is_empty());
        assert_eq!(bracket, once);

        bracket.record_winner(SEMI_FINAL_1, "Yogesh")?;
        bracket.record_winner(SEMI_FINAL_2, "Aman")?;
        bracket.advance();
        let once = bracket.clone();
        bracket.advance();
        assert_eq!(bracket, once);

        // Semi-final and final players together are the same four players.
        let mut semis = players_of(&bracket, SEMI_FINAL_1);
        semis.extend(players_of(&bracket, SEMI_FINAL_2));
        let mut finals = players_of(&bracket, FINAL);
        finals.extend(players_of(&bracket, THIRD_PLACE));
        semis.sort();
        finals.sort();
        assert_eq!(semis, finals);
        assert_eq!(players_of(&bracket, FINAL), vec!["Yogesh", "Aman"]);
        Ok(())
    }

    #[test]
    fn test_standings_tie_broken_by_head_to_head() -> AppResult<()> {
        let mut bracket = Bracket::default();
        // Aman beats Ankush in the group stage, both finish on three wins.
        for (match_id, winner) in [
            (1, "Aman"),
            (2, "Yogesh"),
            (3, "Ankush"),
            (4, "Jaspreet"),
            (5, "Ankush"),
            (6, "Aman"),
        ] {
            bracket.record_winner(match_id, winner)?;
            bracket.advance();
        }
        assert_eq!(
            bracket.matches().get(SEMI_FINAL_1)?.fixture().as_deref(),
            Some("Ankush vs Jaspreet")
        );
        assert_eq!(
            bracket.matches().get(SEMI_FINAL_2)?.fixture().as_deref(),
            Some("Aman vs Yogesh")
        );
        bracket.record_winner(SEMI_FINAL_1, "Ankush")?;
        bracket.record_winner(SEMI_FINAL_2, "Aman")?;
        bracket.advance();
        bracket.record_winner(THIRD_PLACE, "Yogesh")?;

        let standings = bracket
            .standings()
            .into_iter()
            .map(|entry| (entry.player, entry.wins))
            .collect::<Vec<_>>();
        assert_eq!(
            standings,
            vec![
                ("Aman".to_string(), 3),
                ("Ankush".to_string(), 3),
                ("Yogesh".to_string(), 2),
                ("Jaspreet".to_string(), 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_head_to_head_seeding_policy() -> AppResult<()> {
        let matches = MatchTable::new();
        let scores = ScoreBoard::new(&matches.roster());
        let mut bracket = Bracket::new(matches, scores, SeedingPolicy::HeadToHead);
        // Ankush and Aman tie on two wins, Aman won their match.
        for (match_id, winner) in [
            (1, "Aman"),
            (2, "Yogesh"),
            (3, "Ankush"),
            (4, "Jaspreet"),
            (5, "Ankush"),
            (6, "Aman"),
        ] {
            bracket.record_winner(match_id, winner)?;
        }
        bracket.advance();
        assert_eq!(
            bracket.matches().get(SEMI_FINAL_1)?.fixture().as_deref(),
            Some("Aman vs Jaspreet")
        );
        assert_eq!(
            bracket.matches().get(SEMI_FINAL_2)?.fixture().as_deref(),
            Some("Ankush vs Yogesh")
        );
        Ok(())
    }

    fn bracket_from(stored: MatchMap) -> AppResult<Bracket> {
        let matches = MatchTable::from_stored(stored)?;
        let scores = ScoreBoard::from_map(matches.wins());
        Ok(Bracket::new(matches, scores, SeedingPolicy::default()))
    }

    fn decided_group_stage() -> MatchMap {
        let mut stored = MatchTable::new().as_map().clone();
        for (match_id, winner) in GROUP_WINNERS {
            if let Some(m) = stored.get_mut(&match_id) {
                m.winner = Some(winner.to_string());
            }
        }
        stored
    }

    #[test]
    fn test_advance_keeps_existing_semi_final_players() -> AppResult<()> {
        let mut stored = decided_group_stage();
        stored.insert(SEMI_FINAL_1, Match::scheduled("Yogesh", "Aman"));
        stored.insert(SEMI_FINAL_2, Match::scheduled("Ankush", "Jaspreet"));
        let mut bracket = bracket_from(stored)?;

        assert!(bracket.advance().is_empty());
        assert_eq!(players_of(&bracket, SEMI_FINAL_1), vec!["Yogesh", "Aman"]);
        assert_eq!(players_of(&bracket, SEMI_FINAL_2), vec!["Ankush", "Jaspreet"]);
        Ok(())
    }

    #[test]
    fn test_advance_keeps_existing_final_players() -> AppResult<()> {
        let mut stored = decided_group_stage();
        let mut semi_1 = Match::scheduled("Ankush", "Yogesh");
        semi_1.winner = Some("Ankush".to_string());
        let mut semi_2 = Match::scheduled("Jaspreet", "Aman");
        semi_2.winner = Some("Aman".to_string());
        stored.insert(SEMI_FINAL_1, semi_1);
        stored.insert(SEMI_FINAL_2, semi_2);
        stored.insert(FINAL, Match::scheduled("Yogesh", "Jaspreet"));
        let mut bracket = bracket_from(stored)?;

        assert!(bracket.advance().is_empty());
        assert_eq!(players_of(&bracket, FINAL), vec!["Yogesh", "Jaspreet"]);
        // The third place match is seeded together with the final, so it stays empty.
        assert!(!bracket.matches().has_players(THIRD_PLACE));
        Ok(())
    }
}
