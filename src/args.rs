use crate::tournament::constants::DEFAULT_ADMIN_PASSWORD;
use crate::tournament::SeedingPolicy;
use crate::types::MatchId;
use clap::{ArgAction, Parser};

pub const DEFAULT_STORE_PREFIX: &str = "local";

#[derive(Parser, Debug)]
#[clap(name="Chess cup", about = "Four player chess tournament tracker", author, version, long_about = None)]
pub struct AppArgs {
    #[clap(long, action=ArgAction::Set, help = "Set store prefix")]
    store_prefix: Option<String>,
    #[clap(long, short='r', action=ArgAction::SetTrue, help = "Reset stored matches and scores")]
    pub reset_store: bool,
    #[clap(long, action=ArgAction::Set, help = "Set admin password")]
    admin_password: Option<String>,
    #[clap(long, action=ArgAction::SetTrue, help = "Break seeding ties on head-to-head results")]
    seed_with_head_to_head: bool,
    #[clap(long, short='u', action=ArgAction::SetTrue, help = "Disable UI and print a report")]
    disable_ui: bool,
    #[clap(long, action=ArgAction::Set, requires = "winner", help = "Record a result for this match (needs admin password)")]
    pub record_match: Option<MatchId>,
    #[clap(long, action=ArgAction::Set, requires = "record_match", help = "Winner of the recorded match")]
    pub winner: Option<String>,
}

impl AppArgs {
    pub fn is_ui_disabled(&self) -> bool {
        self.disable_ui || self.record_match.is_some()
    }

    pub fn store_prefix(&self) -> &str {
        self.store_prefix.as_deref().unwrap_or(DEFAULT_STORE_PREFIX)
    }

    pub fn admin_password(&self) -> &str {
        self.admin_password
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PASSWORD)
    }

    pub fn seeding_policy(&self) -> SeedingPolicy {
        if self.seed_with_head_to_head {
            SeedingPolicy::HeadToHead
        } else {
            SeedingPolicy::WinsOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppArgs;
    use crate::tournament::SeedingPolicy;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let args = AppArgs::parse_from(["chess-cup"]);
        assert_eq!(args.store_prefix(), "local");
        assert_eq!(args.admin_password(), "chess123");
        assert_eq!(args.seeding_policy(), SeedingPolicy::WinsOnly);
        assert!(!args.is_ui_disabled());
    }

    #[test]
    fn test_record_match_is_headless() {
        let args = AppArgs::parse_from([
            "chess-cup",
            "--record-match",
            "3",
            "--winner",
            "Yogesh",
            "--seed-with-head-to-head",
        ]);
        assert_eq!(args.record_match, Some(3));
        assert_eq!(args.winner.as_deref(), Some("Yogesh"));
        assert_eq!(args.seeding_policy(), SeedingPolicy::HeadToHead);
        assert!(args.is_ui_disabled());
    }

    #[test]
    fn test_record_match_needs_winner() {
        assert!(AppArgs::try_parse_from(["chess-cup", "--record-match", "3"]).is_err());
    }
}
