use ratatui::style::{Color, Modifier, Style};

pub const LEFT_PANEL_WIDTH: u16 = 44;
pub const FLOW_TABLE_HEIGHT: u16 = 14;
pub const POPUP_WIDTH: u16 = 48;
pub const POPUP_HEIGHT: u16 = 9;

pub const MAX_POPUP_MESSAGES: usize = 4;
pub const PASSWORD_MASK_CHAR: char = '•';

const DEFAULT_STYLE: Style = Style {
    fg: None,
    bg: None,
    underline_color: None,
    add_modifier: Modifier::empty(),
    sub_modifier: Modifier::empty(),
};

pub struct UiStyle;

impl UiStyle {
    pub const DEFAULT: Style = DEFAULT_STYLE;
    pub const SELECTED: Style = DEFAULT_STYLE.bg(Color::Rgb(70, 70, 86));
    pub const UNSELECTABLE: Style = DEFAULT_STYLE.fg(Color::DarkGray);
    pub const ERROR: Style = DEFAULT_STYLE.fg(Color::Red);
    pub const HEADER: Style = DEFAULT_STYLE.fg(Color::LightBlue);
    pub const HIGHLIGHT: Style = DEFAULT_STYLE.fg(Color::Rgb(118, 213, 192));
    pub const OK: Style = DEFAULT_STYLE.fg(Color::Green);
    pub const WARNING: Style = DEFAULT_STYLE.fg(Color::Yellow);
    pub const CHAMPION: Style = DEFAULT_STYLE.fg(Color::Rgb(255, 215, 0));
}

pub struct UiText;

impl UiText {
    pub const TITLE: &'static str = "♟️ Chess Tournament";
    pub const ACCESS_GRANTED: &'static str = "Access granted: you can edit match results.";
    pub const VIEW_ONLY: &'static str = "Results are view-only unless you're admin.";
}
