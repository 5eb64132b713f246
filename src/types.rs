use chrono::{DateTime, Local};
use std::collections::{BTreeMap, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

// A Tick is a wall-clock timestamp in milliseconds.
pub type Tick = u64;

pub type MatchId = u8;
pub type PlayerName = String;

pub type AppResult<T> = Result<T, anyhow::Error>;

pub type MatchMap = BTreeMap<MatchId, crate::tournament::Match>;
pub type WinsMap = HashMap<PlayerName, u32>;

pub trait SystemTimeTick {
    fn now() -> Self;
    fn formatted_as_time(&self) -> String;
}

impl SystemTimeTick for Tick {
    fn now() -> Tick {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Tick)
            .unwrap_or_default()
    }

    fn formatted_as_time(&self) -> String {
        let d = UNIX_EPOCH + std::time::Duration::from_millis(*self);
        let datetime = DateTime::<Local>::from(d);
        datetime.format("%H:%M:%S").to_string()
    }
}
