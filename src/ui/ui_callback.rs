use super::constants::UiText;
use crate::app::App;
use crate::store::MatchStore;
use crate::tournament::match_label;
use crate::types::{AppResult, MatchId, PlayerName};
use anyhow::anyhow;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiCallback {
    #[default]
    None,
    Quit,
    RecordWinner {
        match_id: MatchId,
        winner: PlayerName,
    },
    SubmitAdminPassword {
        password: String,
    },
    AdminLogout,
    ClosePopup,
}

impl UiCallback {
    pub fn call<S: MatchStore>(&self, app: &mut App<S>) -> AppResult<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Quit => {
                app.quit();
                Ok(None)
            }
            Self::RecordWinner { match_id, winner } => {
                let seeded = app.session.record_winner(*match_id, winner)?;
                app.ui.select_match(*match_id);
                if seeded.is_empty() {
                    return Ok(None);
                }
                let fixtures = seeded
                    .iter()
                    .filter_map(|id| {
                        let fixture = app.session.bracket().matches().get(*id).ok()?.fixture()?;
                        Some(format!("{}: {}", match_label(*id), fixture))
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Some(format!("New matches scheduled\n{fixtures}")))
            }
            Self::SubmitAdminPassword { password } => {
                app.ui.close_admin_prompt();
                if !app.session.unlock(password) {
                    return Err(anyhow!("Wrong admin password."));
                }
                Ok(Some(UiText::ACCESS_GRANTED.to_string()))
            }
            Self::AdminLogout => {
                app.session.lock();
                Ok(None)
            }
            Self::ClosePopup => {
                app.ui.close_popup();
                Ok(None)
            }
        }
    }
}
