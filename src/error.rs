use crate::types::{MatchId, PlayerName};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Match {0} does not exist.")]
    UnknownMatch(MatchId),
    #[error("Match {0} has no players yet.")]
    MatchNotReady(MatchId),
    #[error("{winner} is not playing in match {match_id}.")]
    InvalidWinner {
        match_id: MatchId,
        winner: PlayerName,
    },
    #[error("Match {match_id} was already won by {winner}.")]
    AlreadyDecided {
        match_id: MatchId,
        winner: PlayerName,
    },
    #[error("Stored match {match_id} is invalid: {reason}.")]
    InvalidStoredMatch { match_id: MatchId, reason: String },
    #[error("Results are view-only unless you're admin.")]
    NotAuthorized,
    #[error("Store unavailable while trying to {action}: {source}")]
    PersistenceUnavailable {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TournamentError {
    pub fn persistence(action: &'static str, source: anyhow::Error) -> Self {
        Self::PersistenceUnavailable {
            action,
            source: source.into(),
        }
    }
}
