use super::constants::*;
use super::popup_message::PopupMessage;
use super::ui_callback::UiCallback;
use super::ui_key;
use super::utils::input_from_key_event;
use super::widgets::{default_block, header_table, popup_rect};
use crate::tournament::views::{
    completion_message, match_flow, standings_rows, upcoming_fixtures, MatchView,
    TOURNAMENT_PROCESS,
};
use crate::tournament::{constants::MATCH_IDS, Bracket, BracketState};
use crate::types::{MatchId, SystemTimeTick, Tick};
use crossterm::event::{KeyCode, KeyEvent};
use itertools::Itertools;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tui_textarea::TextArea;

#[derive(Debug)]
pub struct Ui {
    selected_match: MatchId,
    admin_prompt: Option<TextArea<'static>>,
    popup_messages: Vec<PopupMessage>,
    last_tick: Tick,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            selected_match: *MATCH_IDS.start(),
            admin_prompt: None,
            popup_messages: vec![],
            last_tick: Tick::now(),
        }
    }

    pub fn selected_match(&self) -> MatchId {
        self.selected_match
    }

    pub fn select_match(&mut self, match_id: MatchId) {
        if MATCH_IDS.contains(&match_id) {
            self.selected_match = match_id;
        }
    }

    fn next_match(&mut self) {
        if self.selected_match < *MATCH_IDS.end() {
            self.selected_match += 1;
        }
    }

    fn previous_match(&mut self) {
        if self.selected_match > *MATCH_IDS.start() {
            self.selected_match -= 1;
        }
    }

    pub fn push_popup(&mut self, popup_message: PopupMessage) {
        // Avoid pushing twice the same popup
        if let Some(last_popup) = self.popup_messages.last() {
            if last_popup.message() == popup_message.message() {
                return;
            }
        }
        self.popup_messages.push(popup_message);
        if self.popup_messages.len() > MAX_POPUP_MESSAGES {
            self.popup_messages.remove(0);
        }
    }

    pub fn close_popup(&mut self) {
        if !self.popup_messages.is_empty() {
            self.popup_messages.remove(0);
        }
    }

    pub fn has_popup(&self) -> bool {
        !self.popup_messages.is_empty()
    }

    pub fn open_admin_prompt(&mut self) {
        let mut textarea = TextArea::default();
        textarea.set_mask_char(PASSWORD_MASK_CHAR);
        textarea.set_cursor_style(UiStyle::SELECTED);
        textarea.set_cursor_line_style(UiStyle::DEFAULT);
        textarea.set_block(default_block().title("Enter admin password"));
        self.admin_prompt = Some(textarea);
    }

    pub fn close_admin_prompt(&mut self) {
        self.admin_prompt = None;
    }

    pub fn is_admin_prompt_open(&self) -> bool {
        self.admin_prompt.is_some()
    }

    pub fn update(&mut self, tick: Tick) {
        self.last_tick = tick;
    }

    pub fn handle_key_events(
        &mut self,
        key_event: KeyEvent,
        bracket: &Bracket,
        is_admin: bool,
    ) -> Option<UiCallback> {
        if self.has_popup() {
            return match key_event.code {
                ui_key::YES_TO_DIALOG | ui_key::ESC | KeyCode::Backspace => {
                    Some(UiCallback::ClosePopup)
                }
                _ => None,
            };
        }

        if let Some(textarea) = self.admin_prompt.as_mut() {
            return match key_event.code {
                ui_key::YES_TO_DIALOG => {
                    let password = textarea.lines().concat();
                    Some(UiCallback::SubmitAdminPassword { password })
                }
                ui_key::ESC => {
                    self.close_admin_prompt();
                    None
                }
                _ => {
                    textarea.input(input_from_key_event(key_event));
                    None
                }
            };
        }

        match key_event.code {
            ui_key::QUIT | ui_key::ESC => Some(UiCallback::Quit),
            ui_key::NEXT_SELECTION => {
                self.next_match();
                None
            }
            ui_key::PREVIOUS_SELECTION => {
                self.previous_match();
                None
            }
            ui_key::ADMIN_LOGIN if !is_admin => {
                self.open_admin_prompt();
                None
            }
            ui_key::ADMIN_LOGOUT if is_admin => Some(UiCallback::AdminLogout),
            ui_key::PICK_FIRST_PLAYER | ui_key::PICK_SECOND_PLAYER => {
                let index = if key_event.code == ui_key::PICK_FIRST_PLAYER {
                    0
                } else {
                    1
                };
                let m = bracket.matches().get(self.selected_match).ok()?;
                match MatchView::of(m, is_admin) {
                    MatchView::PickWinner { players } => Some(UiCallback::RecordWinner {
                        match_id: self.selected_match,
                        winner: players[index].clone(),
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, bracket: &Bracket, is_admin: bool) {
        let split = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(FLOW_TABLE_HEIGHT),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_title(frame, bracket, split[0]);

        let columns = Layout::horizontal([
            Constraint::Length(LEFT_PANEL_WIDTH),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(split[1]);

        self.render_left_panel(frame, is_admin, columns[0]);
        self.render_matches(frame, bracket, is_admin, columns[1]);
        self.render_right_panel(frame, bracket, columns[2]);
        self.render_flow(frame, bracket, split[2]);
        self.render_footer(frame, is_admin, split[3]);

        let area = frame.area();
        if let Some(textarea) = self.admin_prompt.as_ref() {
            let mut rect = popup_rect(area);
            rect.height = rect.height.min(3);
            frame.render_widget(Clear, rect);
            frame.render_widget(textarea, rect);
        } else if let Some(popup) = self.popup_messages.first() {
            popup.render(frame, area);
        }
    }

    fn render_title(&self, frame: &mut Frame, bracket: &Bracket, area: Rect) {
        let roster = bracket.matches().roster().join(", ");
        frame.render_widget(
            Paragraph::new(format!("{}: {roster}", UiText::TITLE))
                .centered()
                .style(UiStyle::HEADER)
                .block(default_block()),
            area,
        );
    }

    fn render_left_panel(&self, frame: &mut Frame, is_admin: bool, area: Rect) {
        let split = Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).split(area);

        let (status, style) = if is_admin {
            (UiText::ACCESS_GRANTED, UiStyle::OK)
        } else {
            (UiText::VIEW_ONLY, UiStyle::WARNING)
        };
        frame.render_widget(
            Paragraph::new(status)
                .style(style)
                .wrap(Wrap { trim: true })
                .block(default_block().title("🔐 Admin Control")),
            split[0],
        );

        let lines = TOURNAMENT_PROCESS
            .iter()
            .map(|step| Line::from(format!("- {step}")))
            .collect_vec();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(default_block().title("Process of Tournament")),
            split[1],
        );
    }

    fn render_matches(&self, frame: &mut Frame, bracket: &Bracket, is_admin: bool, area: Rect) {
        let items = bracket
            .matches()
            .iter()
            .map(|(id, m)| {
                let view = MatchView::of(m, is_admin);
                let style = match view {
                    MatchView::Decided { .. } => UiStyle::OK,
                    MatchView::PickWinner { .. } => UiStyle::HIGHLIGHT,
                    MatchView::AwaitingResult { .. } => UiStyle::DEFAULT,
                    MatchView::NotScheduled => UiStyle::UNSELECTABLE,
                };
                ListItem::new(Span::styled(view.describe(*id), style))
            })
            .collect_vec();

        let selected = MATCH_IDS.position(|id| id == self.selected_match);
        let list = List::new(items)
            .highlight_style(UiStyle::SELECTED)
            .block(default_block().title("Matches ↓/↑"));
        frame.render_stateful_widget(list, area, &mut ListState::default().with_selected(selected));
    }

    fn render_right_panel(&self, frame: &mut Frame, bracket: &Bracket, area: Rect) {
        let split = Layout::vertical([Constraint::Fill(1), Constraint::Length(8)]).split(area);

        let upcoming_block = default_block().title("📅 Upcoming Matches");
        if let Some(message) = completion_message(bracket.matches()) {
            let style = if bracket.state() == BracketState::Complete {
                UiStyle::CHAMPION
            } else {
                UiStyle::DEFAULT
            };
            frame.render_widget(
                Paragraph::new(message)
                    .style(style)
                    .wrap(Wrap { trim: true })
                    .block(upcoming_block),
                split[0],
            );
        } else {
            let rows = upcoming_fixtures(bracket.matches())
                .into_iter()
                .map(|(label, fixture)| [label, fixture])
                .collect_vec();
            frame.render_widget(
                header_table(
                    ["Match", "Fixture"],
                    rows,
                    [Constraint::Length(14), Constraint::Fill(1)],
                )
                .block(upcoming_block),
                split[0],
            );
        }

        frame.render_widget(
            header_table(
                ["Rank", "Player", "Wins"],
                standings_rows(&bracket.standings()),
                [
                    Constraint::Length(6),
                    Constraint::Fill(1),
                    Constraint::Length(6),
                ],
            )
            .block(default_block().title("📊 Current Scores")),
            split[1],
        );
    }

    fn render_flow(&self, frame: &mut Frame, bracket: &Bracket, area: Rect) {
        let rows = match_flow(bracket.matches())
            .into_iter()
            .map(|row| [row.label, row.players, row.winner])
            .collect_vec();
        frame.render_widget(
            header_table(
                ["Match", "Players", "Winner"],
                rows,
                [
                    Constraint::Length(14),
                    Constraint::Fill(2),
                    Constraint::Fill(1),
                ],
            )
            .block(default_block().title("🧾 Full Match Flow")),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, is_admin: bool, area: Rect) {
        let keys = if is_admin {
            "↑/↓ select  1/2 pick winner  l lock  q quit"
        } else {
            "↑/↓ select  a admin login  q quit"
        };
        let split = Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).split(area);
        frame.render_widget(Paragraph::new(keys).style(UiStyle::UNSELECTABLE), split[0]);
        frame.render_widget(
            Paragraph::new(self.last_tick.formatted_as_time()).right_aligned(),
            split[1].inner(Margin {
                horizontal: 1,
                vertical: 0,
            }),
        );
    }
}
