use crate::auth::AdminGate;
use crate::error::TournamentError;
use crate::store::MatchStore;
use crate::tournament::{
    Bracket, BracketState, Match, MatchTable, ScoreBoard, SeedingPolicy, StandingsEntry,
};
use crate::types::{MatchId, PlayerName};
use log::{info, warn};

/// One admin session over the stored tournament. All state is owned here and
/// every change is written back to the store before the call returns.
#[derive(Debug)]
pub struct Session<S: MatchStore> {
    bracket: Bracket,
    store: S,
    gate: AdminGate,
}

impl<S: MatchStore> Session<S> {
    /// Loads the tournament from the store, writing the default table when the store
    /// is empty. Fails if the store cannot be reached or holds a broken match.
    pub fn load(
        mut store: S,
        gate: AdminGate,
        seeding_policy: SeedingPolicy,
    ) -> Result<Self, TournamentError> {
        let stored_matches = store
            .load_matches()
            .map_err(|e| TournamentError::persistence("load matches", e))?;

        let matches = if stored_matches.is_empty() {
            info!("No stored matches, initializing default table");
            let table = MatchTable::new();
            store
                .save_matches(&Self::documents(&table, table.as_map().keys().copied()))
                .map_err(|e| TournamentError::persistence("initialize matches", e))?;
            table
        } else {
            MatchTable::from_stored(stored_matches)?
        };

        // The match table is authoritative, the score board is rebuilt from it when
        // it is missing or out of date.
        let derived = ScoreBoard::from_map(matches.wins());
        let scores = match store
            .load_scores()
            .map_err(|e| TournamentError::persistence("load scores", e))?
        {
            Some(scores) if scores.agrees_with(derived.as_map()) => scores,
            stored => {
                if stored.is_some() {
                    warn!("Stored scores disagree with the match table, rebuilding them");
                } else {
                    info!("No stored scores, initializing score board");
                }
                store
                    .save_scores(&derived)
                    .map_err(|e| TournamentError::persistence("initialize scores", e))?;
                derived
            }
        };

        let mut session = Self {
            bracket: Bracket::new(matches, scores, seeding_policy),
            store,
            gate,
        };

        // Picks up a seeding that was interrupted after its winner was saved.
        session.advance_and_save()?;
        info!("Session loaded in state {}", session.bracket.state());

        Ok(session)
    }

    fn documents(
        table: &MatchTable,
        ids: impl IntoIterator<Item = MatchId>,
    ) -> Vec<(MatchId, Match)> {
        ids.into_iter()
            .filter_map(|id| table.get(id).ok().map(|m| (id, m.clone())))
            .collect()
    }

    // Seeding is kept in memory only once the store has it.
    fn advance_and_save(&mut self) -> Result<Vec<MatchId>, TournamentError> {
        let mut bracket = self.bracket.clone();
        let seeded = bracket.advance();
        if !seeded.is_empty() {
            let documents = Self::documents(bracket.matches(), seeded.iter().copied());
            self.store
                .save_matches(&documents)
                .map_err(|e| TournamentError::persistence("save seeded matches", e))?;
        }
        self.bracket = bracket;
        Ok(seeded)
    }

    /// Records a result as admin, persists it, then advances the bracket once.
    /// Returns the ids of any matches seeded as a consequence. On a failed save
    /// the result is not kept, so the same call can be retried.
    pub fn record_winner(
        &mut self,
        match_id: MatchId,
        winner: &str,
    ) -> Result<Vec<MatchId>, TournamentError> {
        if !self.gate.is_admin() {
            return Err(TournamentError::NotAuthorized);
        }

        let mut bracket = self.bracket.clone();
        bracket.record_winner(match_id, winner)?;

        let m = bracket.matches().get(match_id)?.clone();
        self.store
            .save_match(match_id, &m)
            .map_err(|e| TournamentError::persistence("save match", e))?;
        self.store
            .save_scores(bracket.scores())
            .map_err(|e| TournamentError::persistence("save scores", e))?;
        self.bracket = bracket;

        self.advance_and_save()
    }

    pub fn unlock(&mut self, secret: &str) -> bool {
        self.gate.unlock(secret)
    }

    pub fn lock(&mut self) {
        self.gate.lock();
    }

    pub fn is_admin(&self) -> bool {
        self.gate.is_admin()
    }

    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    pub fn bracket_state(&self) -> BracketState {
        self.bracket.state()
    }

    pub fn standings(&self) -> Vec<StandingsEntry> {
        self.bracket.standings()
    }

    pub fn upcoming(&self) -> Vec<(MatchId, &Match)> {
        self.bracket.matches().upcoming()
    }

    pub fn champion(&self) -> Option<&PlayerName> {
        self.bracket.champion()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
