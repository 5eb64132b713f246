use crate::crossterm_event_handler::start_event_handler;
use crate::store::MatchStore;
use crate::session::Session;
use crate::tui::{TerminalEvent, Tui};
use crate::types::{AppResult, SystemTimeTick, Tick};
use crate::ui::popup_message::PopupMessage;
use crate::ui::ui::Ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{error, info};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_SIZE: usize = 64;
// The only thing changing without input is the footer clock.
const CLOCK_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq)]
pub enum AppState {
    Started,
    Quitting,
}

#[derive(Debug)]
pub struct App<S: MatchStore> {
    pub session: Session<S>,
    pub ui: Ui,
    state: AppState,
}

impl<S: MatchStore> App<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            session,
            ui: Ui::new(),
            state: AppState::Started,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state != AppState::Quitting
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    fn draw(&mut self, tui: &mut Tui) {
        if let Err(e) = tui.draw(
            &mut self.ui,
            self.session.bracket(),
            self.session.is_admin(),
        ) {
            error!("Drawing error: {e}");
        }
    }

    pub async fn run(&mut self, mut tui: Tui) -> AppResult<()> {
        let (event_sender, mut event_receiver) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let cancellation_token = CancellationToken::new();
        let terminal_handle = start_event_handler(event_sender, cancellation_token.clone());

        let mut clock = time::interval(CLOCK_REFRESH_INTERVAL);
        clock.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        while self.is_running() {
            select! {
                _ = clock.tick() => self.handle_tick_events(Tick::now()),
                terminal_event = event_receiver.recv() => match terminal_event {
                    Some(TerminalEvent::Key(key_event)) => self.handle_key_events(key_event),
                    Some(TerminalEvent::Resize(w, h)) => tui.resize((w, h))?,
                    None => {
                        info!("Terminal event channel closed");
                        break;
                    }
                },
            }
            self.draw(&mut tui);
        }

        cancellation_token.cancel();
        if let Err(e) = terminal_handle.await {
            error!("Terminal event handler failed: {e}");
        }

        info!("Dashboard loop closed");
        tui.exit()?;
        Ok(())
    }

    pub fn handle_tick_events(&mut self, current_tick: Tick) {
        self.ui.update(current_tick);
    }

    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if key_event.modifiers == KeyModifiers::CONTROL
            && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        let Some(callback) =
            self.ui
                .handle_key_events(key_event, self.session.bracket(), self.session.is_admin())
        else {
            return;
        };

        match callback.call(self) {
            Ok(Some(message)) => self.ui.push_popup(PopupMessage::Ok {
                message,
                tick: Tick::now(),
            }),
            Ok(None) => {}
            Err(e) => {
                error!("{e}");
                self.ui.push_popup(PopupMessage::Error {
                    message: e.to_string(),
                    tick: Tick::now(),
                })
            }
        }
    }
}
