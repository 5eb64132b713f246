use crate::types::MatchId;
use std::ops::RangeInclusive;

pub const FIRST_MATCH: MatchId = 1;
pub const LAST_MATCH: MatchId = 10;
pub const MATCH_IDS: RangeInclusive<MatchId> = FIRST_MATCH..=LAST_MATCH;

pub const GROUP_STAGE: RangeInclusive<MatchId> = 1..=6;
pub const SEMI_FINAL_1: MatchId = 7;
pub const SEMI_FINAL_2: MatchId = 8;
pub const FINAL: MatchId = 9;
pub const THIRD_PLACE: MatchId = 10;

pub const PLAYERS_PER_MATCH: usize = 2;

pub const ROSTER: [&str; 4] = ["Ankush", "Aman", "Yogesh", "Jaspreet"];

// Everyone plays everyone else once.
pub const GROUP_STAGE_PAIRINGS: [(MatchId, &str, &str); 6] = [
    (1, "Ankush", "Aman"),
    (2, "Yogesh", "Jaspreet"),
    (3, "Ankush", "Yogesh"),
    (4, "Aman", "Jaspreet"),
    (5, "Ankush", "Jaspreet"),
    (6, "Aman", "Yogesh"),
];

pub const DEFAULT_ADMIN_PASSWORD: &str = "chess123";
