pub mod bracket;
pub mod constants;
pub mod match_table;
pub mod standings;
pub mod views;

pub use bracket::{Bracket, ScoreBoard};
pub use match_table::{match_label, BracketState, Match, MatchKind, MatchStatus, MatchTable};
pub use standings::{final_standings, head_to_head, seeding_order, SeedingPolicy, StandingsEntry};
